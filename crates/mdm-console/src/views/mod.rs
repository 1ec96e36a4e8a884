//! Resource views: list state, the create/edit modal and delete flow.
//!
//! Every resource page follows the same contract:
//!
//! - **Refresh** replaces the list with the server's answer. A failed
//!   fetch is logged and keeps the previous rows visible.
//! - **Open create / open edit** seed a form buffer from defaults or from
//!   the target record.
//! - **Submit** creates or updates, refreshes the list, then closes the
//!   modal. On failure the modal stays open with the form intact.
//! - **Delete** asks for confirmation first and refreshes on success.
//!
//! [`ResourceView`] implements this once for any [`Resource`]. The
//! attribute and catalog pages wrap it with their filter and drill-down.

mod attributes;
mod catalogs;

use std::mem;

use mdm_client::{Entity, Form, Id, MdmApi};
use tracing::{debug, error, info, warn};

use crate::confirm::Confirm;
use crate::error::ViewError;
use crate::resource::Resource;

pub use attributes::AttributesView;
pub use catalogs::CatalogsView;

/// View over the entity list.
pub type EntitiesView = ResourceView<Entity>;

/// Load state of a resource list.
#[derive(Debug, Clone, PartialEq)]
pub enum ListState<T> {
    /// Nothing requested yet.
    Idle,
    /// A fetch is in flight; the previous rows stay visible.
    Loading {
        /// Rows from the last successful fetch.
        previous: Vec<T>,
    },
    /// Last fetch succeeded.
    Loaded(Vec<T>),
    /// Last fetch failed.
    Failed {
        /// Rows from the last successful fetch.
        items: Vec<T>,
        /// Why the fetch failed.
        message: String,
    },
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> ListState<T> {
    /// Rows currently shown, in server order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        match self {
            Self::Idle => &[],
            Self::Loading { previous } => previous,
            Self::Loaded(items) | Self::Failed { items, .. } => items,
        }
    }

    /// True until the first fetch settles.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Idle | Self::Loading { .. })
    }

    /// Message of the last failed fetch.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }

    fn into_items(self) -> Vec<T> {
        match self {
            Self::Idle => Vec::new(),
            Self::Loading { previous: items } | Self::Loaded(items) | Self::Failed { items, .. } => {
                items
            }
        }
    }
}

/// Create/edit modal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal<F> {
    /// No form open.
    Closed,
    /// Drafting a new record.
    Creating(F),
    /// Editing an existing record.
    Editing {
        /// Record being edited.
        id: Id,
        /// Form buffer.
        form: F,
    },
}

impl<F> Default for Modal<F> {
    fn default() -> Self {
        Self::Closed
    }
}

impl<F> Modal<F> {
    /// True while a form is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// The open form, if any.
    #[must_use]
    pub const fn form(&self) -> Option<&F> {
        match self {
            Self::Closed => None,
            Self::Creating(form) | Self::Editing { form, .. } => Some(form),
        }
    }

    fn form_mut(&mut self) -> Option<&mut F> {
        match self {
            Self::Closed => None,
            Self::Creating(form) | Self::Editing { form, .. } => Some(form),
        }
    }

    /// Identifier of the record being edited.
    #[must_use]
    pub const fn editing_id(&self) -> Option<&Id> {
        match self {
            Self::Editing { id, .. } => Some(id),
            _ => None,
        }
    }
}

/// List, modal and delete flow for one resource.
#[derive(Debug, Clone)]
pub struct ResourceView<R: Resource> {
    list: ListState<R>,
    modal: Modal<R::Form>,
    filter: R::Filter,
}

impl<R: Resource> Default for ResourceView<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> ResourceView<R> {
    /// Empty view with the default filter.
    #[must_use]
    pub fn new() -> Self {
        Self::with_filter(R::Filter::default())
    }

    /// Empty view with a list filter.
    #[must_use]
    pub fn with_filter(filter: R::Filter) -> Self {
        Self {
            list: ListState::Idle,
            modal: Modal::Closed,
            filter,
        }
    }

    /// Rows from the last successful fetch.
    #[must_use]
    pub fn items(&self) -> &[R] {
        self.list.items()
    }

    /// Current list state.
    #[must_use]
    pub const fn list_state(&self) -> &ListState<R> {
        &self.list
    }

    /// Current modal state.
    #[must_use]
    pub const fn modal(&self) -> &Modal<R::Form> {
        &self.modal
    }

    /// The open form, if any.
    #[must_use]
    pub const fn form(&self) -> Option<&R::Form> {
        self.modal.form()
    }

    /// Active list filter.
    #[must_use]
    pub const fn filter(&self) -> &R::Filter {
        &self.filter
    }

    /// Replace the list filter. Takes effect on the next refresh.
    pub fn set_filter(&mut self, filter: R::Filter) {
        self.filter = filter;
    }

    /// Find a listed record by identifier.
    #[must_use]
    pub fn find(&self, id: &Id) -> Option<&R> {
        self.items().iter().find(|item| item.id() == id)
    }

    /// Re-fetch the list. Failures are logged and leave the rows in place.
    pub async fn refresh<A: MdmApi>(&mut self, api: &A) {
        let previous = mem::take(&mut self.list).into_items();
        self.list = ListState::Loading { previous };

        let result = R::list(api, &self.filter).await;
        let previous = mem::take(&mut self.list).into_items();

        self.list = match result {
            Ok(items) => {
                debug!(resource = R::PLURAL, count = items.len(), "list loaded");
                ListState::Loaded(items)
            }
            Err(e) => {
                error!(resource = R::PLURAL, error = %e, "failed to load list");
                ListState::Failed {
                    items: previous,
                    message: e.user_message(),
                }
            }
        };
    }

    /// Open a blank form.
    pub fn open_create(&mut self) {
        self.open_create_with(R::Form::default());
    }

    /// Open a create form seeded with some values.
    pub fn open_create_with(&mut self, form: R::Form) {
        self.modal = Modal::Creating(form);
    }

    /// Open the edit form for a record. Identity fields become read-only.
    pub fn open_edit(&mut self, record: &R) {
        let mut form = R::Form::from_record(record);
        form.lock_for_edit();
        self.modal = Modal::Editing {
            id: record.id().clone(),
            form,
        };
    }

    /// Open the edit form for a record by identifier, fetching it when it
    /// is not in the current list.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Fetch`] if the record cannot be loaded.
    pub async fn open_edit_by_id<A: MdmApi>(&mut self, api: &A, id: &Id) -> Result<(), ViewError> {
        if let Some(record) = self.find(id).cloned() {
            self.open_edit(&record);
            return Ok(());
        }

        let record = R::get(api, id).await.map_err(|source| ViewError::Fetch {
            noun: R::NOUN,
            id: id.clone(),
            message: source.user_message(),
            source,
        })?;
        self.open_edit(&record);
        Ok(())
    }

    /// Assign a field of the open form.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::NoOpenForm`] when the modal is closed, or the
    /// form's rejection.
    pub fn set_field(&mut self, field: &str, raw: &str) -> Result<(), ViewError> {
        let form = self.modal.form_mut().ok_or(ViewError::NoOpenForm)?;
        form.set_field(field, raw)?;
        Ok(())
    }

    /// Close the modal and discard the form.
    pub fn cancel(&mut self) {
        self.modal = Modal::Closed;
    }

    /// Validate and submit the open form.
    ///
    /// Creates when drafting, updates when editing. On success the list is
    /// refreshed before the modal closes.
    ///
    /// # Errors
    ///
    /// Returns a form error if validation fails, or [`ViewError::Save`]
    /// carrying the server's detail. The modal and form are kept either way.
    pub async fn submit<A: MdmApi>(&mut self, api: &A) -> Result<R, ViewError> {
        let result = match &self.modal {
            Modal::Closed => return Err(ViewError::NoOpenForm),
            Modal::Creating(form) => {
                form.validate()?;
                R::create(api, &form.to_payload()).await
            }
            Modal::Editing { id, form } => {
                form.validate()?;
                R::update(api, id, &form.to_payload()).await
            }
        };

        match result {
            Ok(saved) => {
                info!(resource = R::NOUN, id = %saved.id(), "saved");
                self.refresh(api).await;
                self.modal = Modal::Closed;
                Ok(saved)
            }
            Err(source) => {
                warn!(resource = R::NOUN, error = %source, "save failed");
                Err(ViewError::Save {
                    noun: R::NOUN,
                    message: source.user_message(),
                    source,
                })
            }
        }
    }

    /// Delete a record after confirmation.
    ///
    /// Returns `Ok(false)` when the user declines; no call is made.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Delete`] if the server rejects the delete. The
    /// list is left untouched.
    pub async fn delete<A: MdmApi>(
        &mut self,
        api: &A,
        id: &Id,
        confirm: &mut dyn Confirm,
    ) -> Result<bool, ViewError> {
        let prompt = format!("Are you sure you want to delete this {}?", R::NOUN);
        if !confirm.confirm(&prompt) {
            debug!(resource = R::NOUN, %id, "delete declined");
            return Ok(false);
        }

        if let Err(source) = R::delete(api, id).await {
            error!(resource = R::NOUN, %id, error = %source, "delete failed");
            return Err(ViewError::Delete {
                noun: R::NOUN,
                message: source.user_message(),
                source,
            });
        }

        info!(resource = R::NOUN, %id, "deleted");
        self.refresh(api).await;
        Ok(true)
    }
}
