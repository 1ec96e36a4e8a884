//! The MDM API contract.
//!
//! One method per (resource, verb) pair. Implementations are thin
//! pass-throughs: no retry, no caching, no pagination traversal. Failures
//! carry the transport error or the server's structured detail.
//!
//! | Resource       | Verb/Path                         |
//! |----------------|-----------------------------------|
//! | Entities       | `GET/POST /entities`              |
//! | Entities       | `GET/PUT/DELETE /entities/{id}`   |
//! | Entities       | `GET /entities/code/{code}`       |
//! | Attributes     | `GET /attributes?entity_id=`      |
//! | Attributes     | `GET/POST/PUT/DELETE /attributes[/{id}]` |
//! | Catalogs       | `GET/POST/PUT/DELETE /catalogs[/{id}]`   |
//! | Catalogs       | `GET /catalogs/code/{code}`       |
//! | Catalog Values | `GET /catalogs/{id}/values`       |
//! | Catalog Values | `POST /catalogs/values`           |
//! | Health         | `GET /health`                     |

use std::future::Future;

use crate::error::ApiResult;
use crate::id::Id;
use crate::model::{
    Attribute, AttributePayload, AttributeQuery, Catalog, CatalogPayload, CatalogValue,
    CatalogValuePayload, Entity, EntityPayload, EntityQuery, HealthReport, Page,
};

/// Client side of the MDM REST API.
///
/// This trait allows for testing with fake implementations.
pub trait MdmApi: Send + Sync {
    // ========================================================================
    // Entities
    // ========================================================================

    /// List entities.
    fn list_entities(
        &self,
        query: &EntityQuery,
    ) -> impl Future<Output = ApiResult<Page<Entity>>> + Send;

    /// Fetch one entity.
    fn get_entity(&self, id: &Id) -> impl Future<Output = ApiResult<Entity>> + Send;

    /// Fetch one entity by its code.
    fn get_entity_by_code(&self, code: &str) -> impl Future<Output = ApiResult<Entity>> + Send;

    /// Create an entity.
    fn create_entity(
        &self,
        payload: &EntityPayload,
    ) -> impl Future<Output = ApiResult<Entity>> + Send;

    /// Update an entity.
    fn update_entity(
        &self,
        id: &Id,
        payload: &EntityPayload,
    ) -> impl Future<Output = ApiResult<Entity>> + Send;

    /// Delete an entity.
    fn delete_entity(&self, id: &Id) -> impl Future<Output = ApiResult<()>> + Send;

    // ========================================================================
    // Attributes
    // ========================================================================

    /// List attributes, optionally scoped to one entity.
    fn list_attributes(
        &self,
        query: &AttributeQuery,
    ) -> impl Future<Output = ApiResult<Vec<Attribute>>> + Send;

    /// Fetch one attribute.
    fn get_attribute(&self, id: &Id) -> impl Future<Output = ApiResult<Attribute>> + Send;

    /// Create an attribute.
    fn create_attribute(
        &self,
        payload: &AttributePayload,
    ) -> impl Future<Output = ApiResult<Attribute>> + Send;

    /// Update an attribute.
    fn update_attribute(
        &self,
        id: &Id,
        payload: &AttributePayload,
    ) -> impl Future<Output = ApiResult<Attribute>> + Send;

    /// Delete an attribute.
    fn delete_attribute(&self, id: &Id) -> impl Future<Output = ApiResult<()>> + Send;

    // ========================================================================
    // Catalogs
    // ========================================================================

    /// List catalogs.
    fn list_catalogs(&self) -> impl Future<Output = ApiResult<Vec<Catalog>>> + Send;

    /// Fetch one catalog.
    fn get_catalog(&self, id: &Id) -> impl Future<Output = ApiResult<Catalog>> + Send;

    /// Fetch one catalog by its code.
    fn get_catalog_by_code(&self, code: &str)
    -> impl Future<Output = ApiResult<Catalog>> + Send;

    /// Create a catalog.
    fn create_catalog(
        &self,
        payload: &CatalogPayload,
    ) -> impl Future<Output = ApiResult<Catalog>> + Send;

    /// Update a catalog.
    fn update_catalog(
        &self,
        id: &Id,
        payload: &CatalogPayload,
    ) -> impl Future<Output = ApiResult<Catalog>> + Send;

    /// Delete a catalog.
    fn delete_catalog(&self, id: &Id) -> impl Future<Output = ApiResult<()>> + Send;

    // ========================================================================
    // Catalog values
    // ========================================================================

    /// List the values of a catalog.
    fn list_catalog_values(
        &self,
        catalog_id: &Id,
    ) -> impl Future<Output = ApiResult<Vec<CatalogValue>>> + Send;

    /// Create a catalog value.
    fn create_catalog_value(
        &self,
        payload: &CatalogValuePayload,
    ) -> impl Future<Output = ApiResult<CatalogValue>> + Send;

    // ========================================================================
    // Health
    // ========================================================================

    /// Probe backend health.
    fn health(&self) -> impl Future<Output = ApiResult<HealthReport>> + Send;
}
