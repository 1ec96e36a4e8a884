//! Attribute page: the resource view plus the entity filter.

use mdm_client::{Attribute, AttributeForm, AttributeQuery, Entity, EntityQuery, Id, MdmApi};
use tracing::warn;

use super::ResourceView;
use crate::confirm::Confirm;
use crate::error::ViewError;

/// Attributes with their owning entities.
#[derive(Debug, Clone, Default)]
pub struct AttributesView {
    view: ResourceView<Attribute>,
    entities: Vec<Entity>,
}

impl AttributesView {
    /// Empty view listing every attribute.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty view scoped to one entity, or to every attribute with `None`.
    #[must_use]
    pub fn with_entity_filter(entity_id: Option<Id>) -> Self {
        Self {
            view: ResourceView::with_filter(AttributeQuery { entity_id }),
            entities: Vec::new(),
        }
    }

    /// Fetch attributes and entities concurrently.
    ///
    /// Each failure is logged on its own; the other list still loads.
    pub async fn load<A: MdmApi>(&mut self, api: &A) {
        let query = EntityQuery::default();
        let ((), entities) = futures::join!(self.view.refresh(api), api.list_entities(&query));

        match entities {
            Ok(page) => self.entities = page.items,
            Err(e) => warn!(error = %e, "failed to load entities for attribute view"),
        }
    }

    /// The wrapped resource view.
    #[must_use]
    pub const fn view(&self) -> &ResourceView<Attribute> {
        &self.view
    }

    /// Listed attributes.
    #[must_use]
    pub fn items(&self) -> &[Attribute] {
        self.view.items()
    }

    /// Known entities.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Entity the list is scoped to; `None` lists every attribute.
    #[must_use]
    pub fn entity_filter(&self) -> Option<&Id> {
        self.view.filter().entity_id.as_ref()
    }

    /// Scope the list to one entity, or clear the scope, and re-fetch.
    pub async fn set_entity_filter<A: MdmApi>(&mut self, api: &A, entity_id: Option<Id>) {
        self.view.set_filter(AttributeQuery { entity_id });
        self.view.refresh(api).await;
    }

    /// True when at least one entity exists.
    #[must_use]
    pub fn can_create(&self) -> bool {
        !self.entities.is_empty()
    }

    /// Open a blank form, preselecting the filtered entity.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::NoEntities`] while no entity exists.
    pub fn open_create(&mut self) -> Result<(), ViewError> {
        if !self.can_create() {
            return Err(ViewError::NoEntities);
        }
        let form = AttributeForm::for_entity(self.entity_filter());
        self.view.open_create_with(form);
        Ok(())
    }

    /// Open the edit form for a listed attribute.
    pub fn open_edit(&mut self, record: &Attribute) {
        self.view.open_edit(record);
    }

    /// Open the edit form for an attribute by id.
    ///
    /// # Errors
    ///
    /// See [`ResourceView::open_edit_by_id`].
    pub async fn open_edit_by_id<A: MdmApi>(&mut self, api: &A, id: &Id) -> Result<(), ViewError> {
        self.view.open_edit_by_id(api, id).await
    }

    /// Set a field on the open form.
    ///
    /// # Errors
    ///
    /// See [`ResourceView::set_field`].
    pub fn set_field(&mut self, field: &str, raw: &str) -> Result<(), ViewError> {
        self.view.set_field(field, raw)
    }

    /// Discard the open form.
    pub fn cancel(&mut self) {
        self.view.cancel();
    }

    /// Display name of an entity, falling back to its identifier.
    #[must_use]
    pub fn entity_name<'a>(&'a self, entity_id: &'a Id) -> &'a str {
        self.entities
            .iter()
            .find(|e| &e.id == entity_id)
            .map_or(entity_id.as_str(), |e| e.entity_name.as_str())
    }

    /// Submit the open form.
    ///
    /// # Errors
    ///
    /// See [`ResourceView::submit`].
    pub async fn submit<A: MdmApi>(&mut self, api: &A) -> Result<Attribute, ViewError> {
        self.view.submit(api).await
    }

    /// Delete an attribute after confirmation.
    ///
    /// # Errors
    ///
    /// See [`ResourceView::delete`].
    pub async fn delete<A: MdmApi>(
        &mut self,
        api: &A,
        id: &Id,
        confirm: &mut dyn Confirm,
    ) -> Result<bool, ViewError> {
        self.view.delete(api, id, confirm).await
    }
}
