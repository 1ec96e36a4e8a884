//! In-memory `MdmApi` used by the console's unit tests.

use std::collections::HashMap;

use mdm_client::{
    ApiError, ApiResult, Attribute, AttributePayload, AttributeQuery, Catalog, CatalogPayload,
    CatalogType, CatalogValue, CatalogValuePayload, DataType, Entity, EntityPayload, EntityQuery,
    HealthReport, Id, MdmApi, Page,
};
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone)]
enum Failure {
    Transport(String),
    Server(u16, Option<String>),
}

impl Failure {
    fn to_error(&self) -> ApiError {
        match self {
            Self::Transport(message) => ApiError::Transport(message.clone()),
            Self::Server(status, detail) => ApiError::Server {
                status: *status,
                detail: detail.clone(),
            },
        }
    }
}

#[derive(Debug, Default)]
struct State {
    entities: Vec<Entity>,
    attributes: Vec<Attribute>,
    catalogs: Vec<Catalog>,
    values: Vec<CatalogValue>,
    health: HealthReport,
    failures: HashMap<&'static str, Failure>,
    calls: Vec<String>,
    payloads: Vec<Value>,
}

/// Backend double keeping records in memory.
#[derive(Debug, Default)]
pub struct FakeApi {
    state: Mutex<State>,
}

fn new_id() -> Id {
    Id::new(uuid::Uuid::new_v4().to_string())
}

fn not_found(noun: &str) -> ApiError {
    ApiError::Server {
        status: 404,
        detail: Some(format!("{noun} not found")),
    }
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_health(self, status: &str) -> Self {
        self.state.lock().health = HealthReport {
            status: Some(status.to_string()),
            version: Some("1.0.0".into()),
            database: Some("connected".into()),
        };
        self
    }

    pub fn add_entity(&self, code: &str, name: &str) -> Id {
        let id = new_id();
        self.state.lock().entities.push(Entity {
            id: id.clone(),
            entity_code: code.to_string(),
            entity_name: name.to_string(),
            description: None,
            table_name: None,
            is_active: true,
            created_at: None,
            updated_at: None,
        });
        id
    }

    pub fn add_attribute(&self, entity_id: &Id, code: &str, data_type: DataType) -> Id {
        let id = new_id();
        self.state.lock().attributes.push(Attribute {
            id: id.clone(),
            entity_id: entity_id.clone(),
            attribute_code: code.to_string(),
            attribute_name: code.to_string(),
            data_type,
            is_required: false,
            is_unique: false,
            default_value: None,
            created_at: None,
            updated_at: None,
        });
        id
    }

    pub fn add_catalog(&self, id: &str, code: &str) -> Id {
        let id = Id::from(id);
        self.state.lock().catalogs.push(Catalog {
            id: id.clone(),
            catalog_code: code.to_string(),
            catalog_name: code.to_string(),
            catalog_type: CatalogType::Simple,
            allow_user_values: false,
            cache_enabled: true,
            is_active: true,
            created_at: None,
            updated_at: None,
        });
        id
    }

    pub fn add_value(&self, catalog_id: &Id, id: &str, code: &str, name: &str, sort_order: i32) {
        self.state.lock().values.push(CatalogValue {
            id: Id::from(id),
            catalog_id: Some(catalog_id.clone()),
            value_code: code.to_string(),
            value_name: name.to_string(),
            sort_order,
        });
    }

    /// Make every later call to `operation` fail with a server error.
    pub fn fail_with(&self, operation: &'static str, status: u16, detail: &str) {
        self.state
            .lock()
            .failures
            .insert(operation, Failure::Server(status, Some(detail.to_string())));
    }

    /// Make every later call to `operation` fail at the transport level.
    pub fn fail_transport(&self, operation: &'static str) {
        self.state
            .lock()
            .failures
            .insert(operation, Failure::Transport("connection refused".into()));
    }

    pub fn recover(&self, operation: &'static str) {
        self.state.lock().failures.remove(operation);
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().calls.clone()
    }

    pub fn count_calls(&self, operation: &str) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|call| call.as_str() == operation)
            .count()
    }

    pub fn last_payload(&self) -> Option<Value> {
        self.state.lock().payloads.last().cloned()
    }

    pub fn entities(&self) -> Vec<Entity> {
        self.state.lock().entities.clone()
    }

    pub fn attributes(&self) -> Vec<Attribute> {
        self.state.lock().attributes.clone()
    }

    fn enter(&self, operation: &'static str) -> ApiResult<parking_lot::MutexGuard<'_, State>> {
        let mut state = self.state.lock();
        state.calls.push(operation.to_string());
        if let Some(failure) = state.failures.get(operation) {
            return Err(failure.to_error());
        }
        Ok(state)
    }

    fn enter_with<P: Serialize>(
        &self,
        operation: &'static str,
        payload: &P,
    ) -> ApiResult<parking_lot::MutexGuard<'_, State>> {
        let mut state = self.enter(operation)?;
        state.payloads.push(serde_json::to_value(payload)?);
        Ok(state)
    }
}

fn entity_from(id: Id, payload: &EntityPayload) -> Entity {
    Entity {
        id,
        entity_code: payload.entity_code.clone(),
        entity_name: payload.entity_name.clone(),
        description: Some(payload.description.clone()).filter(|d| !d.is_empty()),
        table_name: Some(payload.table_name.clone()).filter(|t| !t.is_empty()),
        is_active: true,
        created_at: None,
        updated_at: None,
    }
}

fn attribute_from(id: Id, payload: &AttributePayload) -> Attribute {
    Attribute {
        id,
        entity_id: payload.entity_id.clone(),
        attribute_code: payload.attribute_code.clone(),
        attribute_name: payload.attribute_name.clone(),
        data_type: payload.data_type,
        is_required: payload.is_required,
        is_unique: payload.is_unique,
        default_value: payload.default_value.clone(),
        created_at: None,
        updated_at: None,
    }
}

fn catalog_from(id: Id, payload: &CatalogPayload) -> Catalog {
    Catalog {
        id,
        catalog_code: payload.catalog_code.clone(),
        catalog_name: payload.catalog_name.clone(),
        catalog_type: payload.catalog_type,
        allow_user_values: payload.allow_user_values,
        cache_enabled: payload.cache_enabled,
        is_active: true,
        created_at: None,
        updated_at: None,
    }
}

impl MdmApi for FakeApi {
    async fn list_entities(&self, query: &EntityQuery) -> ApiResult<Page<Entity>> {
        let state = self.enter("list_entities")?;
        let items = state
            .entities
            .iter()
            .filter(|e| {
                query.search.as_deref().is_none_or(|needle| {
                    e.entity_code.contains(needle) || e.entity_name.contains(needle)
                })
            })
            .cloned()
            .collect();
        Ok(Page::of(items))
    }

    async fn get_entity(&self, id: &Id) -> ApiResult<Entity> {
        let state = self.enter("get_entity")?;
        state
            .entities
            .iter()
            .find(|e| &e.id == id)
            .cloned()
            .ok_or_else(|| not_found("Entity"))
    }

    async fn get_entity_by_code(&self, code: &str) -> ApiResult<Entity> {
        let state = self.enter("get_entity_by_code")?;
        state
            .entities
            .iter()
            .find(|e| e.entity_code == code)
            .cloned()
            .ok_or_else(|| not_found("Entity"))
    }

    async fn create_entity(&self, payload: &EntityPayload) -> ApiResult<Entity> {
        let mut state = self.enter_with("create_entity", payload)?;
        let entity = entity_from(new_id(), payload);
        state.entities.push(entity.clone());
        Ok(entity)
    }

    async fn update_entity(&self, id: &Id, payload: &EntityPayload) -> ApiResult<Entity> {
        let mut state = self.enter_with("update_entity", payload)?;
        let slot = state
            .entities
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| not_found("Entity"))?;
        *slot = entity_from(id.clone(), payload);
        Ok(slot.clone())
    }

    async fn delete_entity(&self, id: &Id) -> ApiResult<()> {
        let mut state = self.enter("delete_entity")?;
        let before = state.entities.len();
        state.entities.retain(|e| &e.id != id);
        if state.entities.len() == before {
            return Err(not_found("Entity"));
        }
        Ok(())
    }

    async fn list_attributes(&self, query: &AttributeQuery) -> ApiResult<Vec<Attribute>> {
        let state = self.enter("list_attributes")?;
        Ok(state
            .attributes
            .iter()
            .filter(|a| query.entity_id.as_ref().is_none_or(|id| &a.entity_id == id))
            .cloned()
            .collect())
    }

    async fn get_attribute(&self, id: &Id) -> ApiResult<Attribute> {
        let state = self.enter("get_attribute")?;
        state
            .attributes
            .iter()
            .find(|a| &a.id == id)
            .cloned()
            .ok_or_else(|| not_found("Attribute"))
    }

    async fn create_attribute(&self, payload: &AttributePayload) -> ApiResult<Attribute> {
        let mut state = self.enter_with("create_attribute", payload)?;
        let attribute = attribute_from(new_id(), payload);
        state.attributes.push(attribute.clone());
        Ok(attribute)
    }

    async fn update_attribute(&self, id: &Id, payload: &AttributePayload) -> ApiResult<Attribute> {
        let mut state = self.enter_with("update_attribute", payload)?;
        let slot = state
            .attributes
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or_else(|| not_found("Attribute"))?;
        *slot = attribute_from(id.clone(), payload);
        Ok(slot.clone())
    }

    async fn delete_attribute(&self, id: &Id) -> ApiResult<()> {
        let mut state = self.enter("delete_attribute")?;
        state.attributes.retain(|a| &a.id != id);
        Ok(())
    }

    async fn list_catalogs(&self) -> ApiResult<Vec<Catalog>> {
        let state = self.enter("list_catalogs")?;
        Ok(state.catalogs.clone())
    }

    async fn get_catalog(&self, id: &Id) -> ApiResult<Catalog> {
        let state = self.enter("get_catalog")?;
        state
            .catalogs
            .iter()
            .find(|c| &c.id == id)
            .cloned()
            .ok_or_else(|| not_found("Catalog"))
    }

    async fn get_catalog_by_code(&self, code: &str) -> ApiResult<Catalog> {
        let state = self.enter("get_catalog_by_code")?;
        state
            .catalogs
            .iter()
            .find(|c| c.catalog_code == code)
            .cloned()
            .ok_or_else(|| not_found("Catalog"))
    }

    async fn create_catalog(&self, payload: &CatalogPayload) -> ApiResult<Catalog> {
        let mut state = self.enter_with("create_catalog", payload)?;
        let catalog = catalog_from(new_id(), payload);
        state.catalogs.push(catalog.clone());
        Ok(catalog)
    }

    async fn update_catalog(&self, id: &Id, payload: &CatalogPayload) -> ApiResult<Catalog> {
        let mut state = self.enter_with("update_catalog", payload)?;
        let slot = state
            .catalogs
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| not_found("Catalog"))?;
        *slot = catalog_from(id.clone(), payload);
        Ok(slot.clone())
    }

    async fn delete_catalog(&self, id: &Id) -> ApiResult<()> {
        let mut state = self.enter("delete_catalog")?;
        state.catalogs.retain(|c| &c.id != id);
        state.values.retain(|v| v.catalog_id.as_ref() != Some(id));
        Ok(())
    }

    async fn list_catalog_values(&self, catalog_id: &Id) -> ApiResult<Vec<CatalogValue>> {
        let state = self.enter("list_catalog_values")?;
        let mut values: Vec<CatalogValue> = state
            .values
            .iter()
            .filter(|v| v.catalog_id.as_ref() == Some(catalog_id))
            .cloned()
            .collect();
        values.sort_by_key(|v| v.sort_order);
        Ok(values)
    }

    async fn create_catalog_value(&self, payload: &CatalogValuePayload) -> ApiResult<CatalogValue> {
        let mut state = self.enter_with("create_catalog_value", payload)?;
        let value = CatalogValue {
            id: new_id(),
            catalog_id: Some(payload.catalog_id.clone()),
            value_code: payload.value_code.clone(),
            value_name: payload.value_name.clone(),
            sort_order: payload.sort_order,
        };
        state.values.push(value.clone());
        Ok(value)
    }

    async fn health(&self) -> ApiResult<HealthReport> {
        let state = self.enter("health")?;
        Ok(state.health.clone())
    }
}
