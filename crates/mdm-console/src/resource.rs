//! Binding between a record type and its API operations.

use std::fmt;
use std::future::Future;

use mdm_client::{
    ApiResult, Attribute, AttributeForm, AttributeQuery, Catalog, CatalogForm, Entity,
    EntityForm, EntityQuery, Form, Id, MdmApi,
};
use serde::Serialize;

/// Payload type submitted for a resource.
pub type PayloadOf<R> = <<R as Resource>::Form as Form>::Payload;

/// A record managed through list, create, update and delete.
pub trait Resource: Clone + fmt::Debug + Serialize + Send + Sync + Sized {
    /// Form buffer editing this record.
    type Form: Form<Record = Self>;
    /// Parameters narrowing the list call.
    type Filter: Clone + Default + fmt::Debug + Send + Sync;

    /// Singular noun used in prompts and messages.
    const NOUN: &'static str;
    /// Plural noun.
    const PLURAL: &'static str;

    /// Server-assigned identifier.
    fn id(&self) -> &Id;

    /// Fetch the current list.
    fn list<A: MdmApi>(
        api: &A,
        filter: &Self::Filter,
    ) -> impl Future<Output = ApiResult<Vec<Self>>> + Send;

    /// Fetch one record.
    fn get<A: MdmApi>(api: &A, id: &Id) -> impl Future<Output = ApiResult<Self>> + Send;

    /// Create a record.
    fn create<A: MdmApi>(
        api: &A,
        payload: &PayloadOf<Self>,
    ) -> impl Future<Output = ApiResult<Self>> + Send;

    /// Replace a record.
    fn update<A: MdmApi>(
        api: &A,
        id: &Id,
        payload: &PayloadOf<Self>,
    ) -> impl Future<Output = ApiResult<Self>> + Send;

    /// Delete a record.
    fn delete<A: MdmApi>(api: &A, id: &Id) -> impl Future<Output = ApiResult<()>> + Send;
}

impl Resource for Entity {
    type Form = EntityForm;
    type Filter = EntityQuery;

    const NOUN: &'static str = "entity";
    const PLURAL: &'static str = "entities";

    fn id(&self) -> &Id {
        &self.id
    }

    async fn list<A: MdmApi>(api: &A, filter: &EntityQuery) -> ApiResult<Vec<Self>> {
        Ok(api.list_entities(filter).await?.items)
    }

    async fn get<A: MdmApi>(api: &A, id: &Id) -> ApiResult<Self> {
        api.get_entity(id).await
    }

    async fn create<A: MdmApi>(api: &A, payload: &PayloadOf<Self>) -> ApiResult<Self> {
        api.create_entity(payload).await
    }

    async fn update<A: MdmApi>(api: &A, id: &Id, payload: &PayloadOf<Self>) -> ApiResult<Self> {
        api.update_entity(id, payload).await
    }

    async fn delete<A: MdmApi>(api: &A, id: &Id) -> ApiResult<()> {
        api.delete_entity(id).await
    }
}

impl Resource for Attribute {
    type Form = AttributeForm;
    type Filter = AttributeQuery;

    const NOUN: &'static str = "attribute";
    const PLURAL: &'static str = "attributes";

    fn id(&self) -> &Id {
        &self.id
    }

    async fn list<A: MdmApi>(api: &A, filter: &AttributeQuery) -> ApiResult<Vec<Self>> {
        api.list_attributes(filter).await
    }

    async fn get<A: MdmApi>(api: &A, id: &Id) -> ApiResult<Self> {
        api.get_attribute(id).await
    }

    async fn create<A: MdmApi>(api: &A, payload: &PayloadOf<Self>) -> ApiResult<Self> {
        api.create_attribute(payload).await
    }

    async fn update<A: MdmApi>(api: &A, id: &Id, payload: &PayloadOf<Self>) -> ApiResult<Self> {
        api.update_attribute(id, payload).await
    }

    async fn delete<A: MdmApi>(api: &A, id: &Id) -> ApiResult<()> {
        api.delete_attribute(id).await
    }
}

impl Resource for Catalog {
    type Form = CatalogForm;
    type Filter = ();

    const NOUN: &'static str = "catalog";
    const PLURAL: &'static str = "catalogs";

    fn id(&self) -> &Id {
        &self.id
    }

    async fn list<A: MdmApi>(api: &A, _filter: &()) -> ApiResult<Vec<Self>> {
        api.list_catalogs().await
    }

    async fn get<A: MdmApi>(api: &A, id: &Id) -> ApiResult<Self> {
        api.get_catalog(id).await
    }

    async fn create<A: MdmApi>(api: &A, payload: &PayloadOf<Self>) -> ApiResult<Self> {
        api.create_catalog(payload).await
    }

    async fn update<A: MdmApi>(api: &A, id: &Id, payload: &PayloadOf<Self>) -> ApiResult<Self> {
        api.update_catalog(id, payload).await
    }

    async fn delete<A: MdmApi>(api: &A, id: &Id) -> ApiResult<()> {
        api.delete_catalog(id).await
    }
}
