//! Catalog page: the resource view plus the values drill-down.

use mdm_client::{Catalog, CatalogValue, Id, MdmApi};
use tracing::{debug, warn};

use super::ResourceView;
use crate::confirm::Confirm;
use crate::error::ViewError;
use crate::resource::Resource;

/// Catalogs with one optionally selected for its values.
#[derive(Debug, Clone, Default)]
pub struct CatalogsView {
    view: ResourceView<Catalog>,
    selected: Option<Id>,
    values: Vec<CatalogValue>,
}

impl CatalogsView {
    /// Empty view with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the catalog list.
    pub async fn load<A: MdmApi>(&mut self, api: &A) {
        self.view.refresh(api).await;
    }

    /// The wrapped resource view.
    #[must_use]
    pub const fn view(&self) -> &ResourceView<Catalog> {
        &self.view
    }

    /// The wrapped resource view, mutably.
    pub fn view_mut(&mut self) -> &mut ResourceView<Catalog> {
        &mut self.view
    }

    /// Listed catalogs.
    #[must_use]
    pub fn items(&self) -> &[Catalog] {
        self.view.items()
    }

    /// The selected catalog as currently listed.
    #[must_use]
    pub fn selected(&self) -> Option<&Catalog> {
        self.selected.as_ref().and_then(|id| self.view.find(id))
    }

    /// Values of the selected catalog.
    #[must_use]
    pub fn values(&self) -> &[CatalogValue] {
        &self.values
    }

    /// Select a listed catalog and fetch its values.
    ///
    /// A failed values fetch leaves the list empty without an error.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::NotFound`] if the catalog is not listed.
    pub async fn select<A: MdmApi>(&mut self, api: &A, id: &Id) -> Result<(), ViewError> {
        if self.view.find(id).is_none() {
            return Err(ViewError::NotFound {
                noun: Catalog::NOUN,
                id: id.clone(),
            });
        }

        self.selected = Some(id.clone());
        self.values = match api.list_catalog_values(id).await {
            Ok(values) => {
                debug!(catalog = %id, count = values.len(), "catalog values loaded");
                values
            }
            Err(e) => {
                warn!(catalog = %id, error = %e, "failed to load catalog values");
                Vec::new()
            }
        };
        Ok(())
    }

    /// Clear the selection and its values.
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.values.clear();
    }

    /// Submit the open form.
    ///
    /// # Errors
    ///
    /// See [`ResourceView::submit`].
    pub async fn submit<A: MdmApi>(&mut self, api: &A) -> Result<Catalog, ViewError> {
        self.view.submit(api).await
    }

    /// Delete a catalog after confirmation, clearing the selection if it
    /// was the selected one.
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
        let deleted = self.view.delete(api, id, confirm).await?;
        if deleted && self.selected.as_ref() == Some(id) {
            self.clear_selection();
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::AssumeYes;
    use crate::testing::FakeApi;
    use mdm_client::CatalogType;

    fn seeded() -> FakeApi {
        let api = FakeApi::new();
        let countries = api.add_catalog("1", "COUNTRIES");
        api.add_value(&countries, "10", "US", "United States", 1);
        api
    }

    #[tokio::test]
    async fn selecting_a_catalog_loads_its_values() {
        let api = seeded();
        let mut view = CatalogsView::new();
        view.load(&api).await;

        view.select(&api, &Id::from("1")).await.unwrap();

        assert_eq!(view.selected().map(|c| c.catalog_code.as_str()), Some("COUNTRIES"));
        let values = view.values();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].value_code, "US");
        assert_eq!(values[0].value_name, "United States");
        assert_eq!(values[0].sort_order, 1);
    }

    #[tokio::test]
    async fn selecting_unlisted_catalog_fails() {
        let api = seeded();
        let mut view = CatalogsView::new();
        view.load(&api).await;

        let err = view.select(&api, &Id::from("99")).await.unwrap_err();
        assert!(matches!(err, ViewError::NotFound { noun: "catalog", .. }));
        assert!(view.selected().is_none());
        assert_eq!(api.count_calls("list_catalog_values"), 0);
    }

    #[tokio::test]
    async fn values_failure_resets_to_empty() {
        let api = seeded();
        let mut view = CatalogsView::new();
        view.load(&api).await;
        view.select(&api, &Id::from("1")).await.unwrap();

        api.fail_with("list_catalog_values", 500, "boom");
        view.select(&api, &Id::from("1")).await.unwrap();
        assert!(view.values().is_empty());
        assert!(view.selected().is_some());
    }

    #[tokio::test]
    async fn deleting_selected_catalog_clears_selection_and_values() {
        let api = seeded();
        let mut view = CatalogsView::new();
        view.load(&api).await;
        view.select(&api, &Id::from("1")).await.unwrap();

        assert!(view.delete(&api, &Id::from("1"), &mut AssumeYes).await.unwrap());
        assert!(view.selected().is_none());
        assert!(view.values().is_empty());
        assert!(view.items().is_empty());
    }

    #[tokio::test]
    async fn deleting_other_catalog_keeps_selection() {
        let api = seeded();
        api.add_catalog("2", "CURRENCIES");
        let mut view = CatalogsView::new();
        view.load(&api).await;
        view.select(&api, &Id::from("1")).await.unwrap();

        view.delete(&api, &Id::from("2"), &mut AssumeYes).await.unwrap();
        assert_eq!(view.values().len(), 1);
        assert!(view.selected().is_some());
    }

    #[tokio::test]
    async fn edit_changes_every_field_and_resyncs_selection() {
        let api = seeded();
        let mut view = CatalogsView::new();
        view.load(&api).await;
        view.select(&api, &Id::from("1")).await.unwrap();

        let record = view.items()[0].clone();
        view.view_mut().open_edit(&record);
        let form = view.view_mut();
        form.set_field("catalog_code", "nations").unwrap();
        form.set_field("catalog_type", "HIERARCHICAL").unwrap();
        form.set_field("allow_user_values", "yes").unwrap();
        view.submit(&api).await.unwrap();

        let selected = view.selected().unwrap();
        assert_eq!(selected.catalog_code, "NATIONS");
        assert_eq!(selected.catalog_type, CatalogType::Hierarchical);
        assert!(selected.allow_user_values);
    }
}
