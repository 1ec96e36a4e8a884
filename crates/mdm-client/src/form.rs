//! Form buffers for creating and editing records.
//!
//! A form holds the editable fields of one record as the user types them.
//! Input-time normalization happens here: entity and catalog codes are
//! upper-cased, attribute codes and table names lower-cased. Forms opened
//! for editing refuse changes to the fields that identify the record.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::id::Id;
use crate::model::{
    Attribute, AttributePayload, Catalog, CatalogPayload, CatalogType, DataType, Entity,
    EntityPayload,
};

/// Maximum length of entity and catalog codes.
pub const MAX_CODE_LENGTH: usize = 50;

/// Maximum length of attribute codes.
pub const MAX_ATTRIBUTE_CODE_LENGTH: usize = 100;

/// Maximum length of display names.
pub const MAX_NAME_LENGTH: usize = 200;

/// Errors raised while editing or validating a form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// The form has no field with this name.
    #[error("unknown field '{field}', expected one of: {expected}")]
    UnknownField {
        /// Requested field.
        field: String,
        /// Fields the form accepts.
        expected: String,
    },

    /// The raw value could not be converted for this field.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Field being set.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A required field is blank.
    #[error("{0} is required")]
    Required(&'static str),

    /// A field exceeds its maximum length.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Offending field.
        field: &'static str,
        /// Maximum length.
        max: usize,
    },

    /// The field cannot change once the record exists.
    #[error("{0} cannot be changed on an existing record")]
    Locked(&'static str),
}

/// An editable buffer for one kind of record.
pub trait Form: Clone + Default + fmt::Debug {
    /// Record type this form edits.
    type Record;
    /// Body submitted to the server.
    type Payload: Serialize + fmt::Debug;

    /// Names accepted by [`Form::set_field`], in display order.
    const FIELDS: &'static [&'static str];

    /// Seed a form from an existing record. Absent optionals become empty.
    fn from_record(record: &Self::Record) -> Self;

    /// Assign a field from raw user input, applying normalization.
    fn set_field(&mut self, field: &str, raw: &str) -> Result<(), FormError>;

    /// Check required fields and length limits.
    fn validate(&self) -> Result<(), FormError>;

    /// Build the submission body.
    fn to_payload(&self) -> Self::Payload;

    /// Make identity fields read-only for editing an existing record.
    fn lock_for_edit(&mut self) {}
}

fn unknown_field<F: Form>(field: &str) -> FormError {
    FormError::UnknownField {
        field: field.to_string(),
        expected: F::FIELDS.join(", "),
    }
}

/// Parse a checkbox-style value.
fn parse_flag(field: &'static str, raw: &str) -> Result<bool, FormError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "on" | "1" => Ok(true),
        "false" | "no" | "n" | "off" | "0" => Ok(false),
        other => Err(FormError::InvalidValue {
            field,
            reason: format!("'{other}' is not a boolean"),
        }),
    }
}

fn require(field: &'static str, value: &str, max: usize) -> Result<(), FormError> {
    if value.trim().is_empty() {
        return Err(FormError::Required(field));
    }
    if value.chars().count() > max {
        return Err(FormError::TooLong { field, max });
    }
    Ok(())
}

// ============================================================================
// Entity
// ============================================================================

/// Form buffer for an entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityForm {
    /// Entity code, upper-cased.
    pub entity_code: String,
    /// Display label.
    pub entity_name: String,
    /// Free-text description.
    pub description: String,
    /// Storage hint, lower-cased.
    pub table_name: String,
    locked: bool,
}

impl EntityForm {
    /// Set the code; input is upper-cased. Fixed once the entity exists.
    pub fn set_entity_code(&mut self, input: &str) -> Result<(), FormError> {
        if self.locked {
            return Err(FormError::Locked("entity_code"));
        }
        self.entity_code = input.to_uppercase();
        Ok(())
    }

    /// Set the display label.
    pub fn set_entity_name(&mut self, input: &str) {
        self.entity_name = input.to_string();
    }

    /// Set the description.
    pub fn set_description(&mut self, input: &str) {
        self.description = input.to_string();
    }

    /// Set the storage hint; input is lower-cased.
    pub fn set_table_name(&mut self, input: &str) {
        self.table_name = input.to_lowercase();
    }
}

impl Form for EntityForm {
    type Record = Entity;
    type Payload = EntityPayload;

    const FIELDS: &'static [&'static str] =
        &["entity_code", "entity_name", "entity_description", "table_name"];

    fn from_record(record: &Entity) -> Self {
        Self {
            entity_code: record.entity_code.clone(),
            entity_name: record.entity_name.clone(),
            description: record.description.clone().unwrap_or_default(),
            table_name: record.table_name.clone().unwrap_or_default(),
            locked: false,
        }
    }

    fn set_field(&mut self, field: &str, raw: &str) -> Result<(), FormError> {
        match field {
            "entity_code" | "code" => self.set_entity_code(raw)?,
            "entity_name" | "name" => self.set_entity_name(raw),
            "entity_description" | "description" => self.set_description(raw),
            "table_name" | "table" => self.set_table_name(raw),
            other => return Err(unknown_field::<Self>(other)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), FormError> {
        require("entity_code", &self.entity_code, MAX_CODE_LENGTH)?;
        require("entity_name", &self.entity_name, MAX_NAME_LENGTH)
    }

    fn to_payload(&self) -> EntityPayload {
        EntityPayload {
            entity_code: self.entity_code.clone(),
            entity_name: self.entity_name.clone(),
            description: self.description.clone(),
            table_name: self.table_name.clone(),
        }
    }

    fn lock_for_edit(&mut self) {
        self.locked = true;
    }
}

// ============================================================================
// Attribute
// ============================================================================

/// Form buffer for an attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeForm {
    /// Owning entity; empty until chosen.
    pub entity_id: String,
    /// Attribute code, lower-cased.
    pub attribute_code: String,
    /// Display label.
    pub attribute_name: String,
    /// Value type.
    pub data_type: DataType,
    /// Whether a value must be supplied.
    pub is_required: bool,
    /// Whether values must be unique.
    pub is_unique: bool,
    /// Default value; empty means none.
    pub default_value: String,
    locked: bool,
}

impl AttributeForm {
    /// Empty form with the owning entity preselected.
    #[must_use]
    pub fn for_entity(entity_id: Option<&Id>) -> Self {
        Self {
            entity_id: entity_id.map(ToString::to_string).unwrap_or_default(),
            ..Self::default()
        }
    }

    fn ensure_unlocked(&self, field: &'static str) -> Result<(), FormError> {
        if self.locked {
            Err(FormError::Locked(field))
        } else {
            Ok(())
        }
    }

    /// Choose the owning entity.
    pub fn set_entity_id(&mut self, input: &str) -> Result<(), FormError> {
        self.ensure_unlocked("entity_id")?;
        self.entity_id = input.trim().to_string();
        Ok(())
    }

    /// Set the code; input is lower-cased.
    pub fn set_attribute_code(&mut self, input: &str) -> Result<(), FormError> {
        self.ensure_unlocked("attribute_code")?;
        self.attribute_code = input.to_lowercase();
        Ok(())
    }

    /// Set the display label.
    pub fn set_attribute_name(&mut self, input: &str) {
        self.attribute_name = input.to_string();
    }

    /// Set the value type.
    pub fn set_data_type(&mut self, data_type: DataType) -> Result<(), FormError> {
        self.ensure_unlocked("data_type")?;
        self.data_type = data_type;
        Ok(())
    }

    /// Set the default value.
    pub fn set_default_value(&mut self, input: &str) {
        self.default_value = input.to_string();
    }
}

impl Form for AttributeForm {
    type Record = Attribute;
    type Payload = AttributePayload;

    const FIELDS: &'static [&'static str] = &[
        "entity_id",
        "attribute_code",
        "attribute_name",
        "data_type",
        "is_required",
        "is_unique",
        "default_value",
    ];

    fn from_record(record: &Attribute) -> Self {
        Self {
            entity_id: record.entity_id.to_string(),
            attribute_code: record.attribute_code.clone(),
            attribute_name: record.attribute_name.clone(),
            data_type: record.data_type,
            is_required: record.is_required,
            is_unique: record.is_unique,
            default_value: record.default_value.clone().unwrap_or_default(),
            locked: false,
        }
    }

    fn set_field(&mut self, field: &str, raw: &str) -> Result<(), FormError> {
        match field {
            "entity_id" | "entity" => self.set_entity_id(raw),
            "attribute_code" | "code" => self.set_attribute_code(raw),
            "attribute_name" | "name" => {
                self.set_attribute_name(raw);
                Ok(())
            }
            "data_type" | "type" => {
                let data_type = raw.parse().map_err(|e: crate::model::UnknownVariant| {
                    FormError::InvalidValue {
                        field: "data_type",
                        reason: e.to_string(),
                    }
                })?;
                self.set_data_type(data_type)
            }
            "is_required" | "required" => {
                self.is_required = parse_flag("is_required", raw)?;
                Ok(())
            }
            "is_unique" | "unique" => {
                self.is_unique = parse_flag("is_unique", raw)?;
                Ok(())
            }
            "default_value" | "default" => {
                self.set_default_value(raw);
                Ok(())
            }
            other => Err(unknown_field::<Self>(other)),
        }
    }

    fn validate(&self) -> Result<(), FormError> {
        if self.entity_id.trim().is_empty() {
            return Err(FormError::Required("entity_id"));
        }
        require("attribute_code", &self.attribute_code, MAX_ATTRIBUTE_CODE_LENGTH)?;
        require("attribute_name", &self.attribute_name, MAX_NAME_LENGTH)
    }

    fn to_payload(&self) -> AttributePayload {
        AttributePayload {
            entity_id: Id::new(self.entity_id.clone()),
            attribute_code: self.attribute_code.clone(),
            attribute_name: self.attribute_name.clone(),
            data_type: self.data_type,
            is_required: self.is_required,
            is_unique: self.is_unique,
            default_value: (!self.default_value.is_empty()).then(|| self.default_value.clone()),
        }
    }

    fn lock_for_edit(&mut self) {
        self.locked = true;
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Form buffer for a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogForm {
    /// Catalog code, upper-cased.
    pub catalog_code: String,
    /// Display label.
    pub catalog_name: String,
    /// Structure of the value set.
    pub catalog_type: CatalogType,
    /// Whether end users may add ad-hoc values.
    pub allow_user_values: bool,
    /// Cache hint.
    pub cache_enabled: bool,
}

impl Default for CatalogForm {
    fn default() -> Self {
        Self {
            catalog_code: String::new(),
            catalog_name: String::new(),
            catalog_type: CatalogType::Simple,
            allow_user_values: false,
            cache_enabled: true,
        }
    }
}

impl CatalogForm {
    /// Set the code; input is upper-cased.
    pub fn set_catalog_code(&mut self, input: &str) {
        self.catalog_code = input.to_uppercase();
    }

    /// Set the display label.
    pub fn set_catalog_name(&mut self, input: &str) {
        self.catalog_name = input.to_string();
    }
}

impl Form for CatalogForm {
    type Record = Catalog;
    type Payload = CatalogPayload;

    const FIELDS: &'static [&'static str] = &[
        "catalog_code",
        "catalog_name",
        "catalog_type",
        "allow_user_values",
        "cache_enabled",
    ];

    fn from_record(record: &Catalog) -> Self {
        Self {
            catalog_code: record.catalog_code.clone(),
            catalog_name: record.catalog_name.clone(),
            catalog_type: record.catalog_type,
            allow_user_values: record.allow_user_values,
            cache_enabled: record.cache_enabled,
        }
    }

    fn set_field(&mut self, field: &str, raw: &str) -> Result<(), FormError> {
        match field {
            "catalog_code" | "code" => self.set_catalog_code(raw),
            "catalog_name" | "name" => self.set_catalog_name(raw),
            "catalog_type" | "type" => {
                self.catalog_type = raw.parse().map_err(|e: crate::model::UnknownVariant| {
                    FormError::InvalidValue {
                        field: "catalog_type",
                        reason: e.to_string(),
                    }
                })?;
            }
            "allow_user_values" => {
                self.allow_user_values = parse_flag("allow_user_values", raw)?;
            }
            "cache_enabled" | "cache" => {
                self.cache_enabled = parse_flag("cache_enabled", raw)?;
            }
            other => return Err(unknown_field::<Self>(other)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), FormError> {
        require("catalog_code", &self.catalog_code, MAX_CODE_LENGTH)?;
        require("catalog_name", &self.catalog_name, MAX_NAME_LENGTH)
    }

    fn to_payload(&self) -> CatalogPayload {
        CatalogPayload {
            catalog_code: self.catalog_code.clone(),
            catalog_name: self.catalog_name.clone(),
            catalog_type: self.catalog_type,
            allow_user_values: self.allow_user_values,
            cache_enabled: self.cache_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    fn sample_attribute() -> Attribute {
        Attribute {
            id: Id::from("a1"),
            entity_id: Id::from("e1"),
            attribute_code: "email".into(),
            attribute_name: "Email".into(),
            data_type: DataType::String,
            is_required: true,
            is_unique: true,
            default_value: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn entity_code_is_upper_cased_as_typed() {
        let mut form = EntityForm::default();
        form.set_field("entity_code", "customer").unwrap();
        form.set_field("table_name", "MDM_Customer").unwrap();
        assert_eq!(form.entity_code, "CUSTOMER");
        assert_eq!(form.table_name, "mdm_customer");
        assert_eq!(form.to_payload().entity_code, "CUSTOMER");
    }

    #[test]
    fn entity_from_record_blanks_missing_optionals() {
        let entity = Entity {
            id: Id::from("e1"),
            entity_code: "VENDOR".into(),
            entity_name: "Vendor".into(),
            description: None,
            table_name: Some("vendor".into()),
            is_active: true,
            created_at: None,
            updated_at: None,
        };
        let form = EntityForm::from_record(&entity);
        assert_eq!(form.description, "");
        assert_eq!(form.table_name, "vendor");
    }

    #[test]
    fn entity_description_survives_edit() {
        let entity: Entity = serde_json::from_value(serde_json::json!({
            "id": "e1",
            "entity_code": "CUSTOMER",
            "entity_name": "Customer",
            "entity_description": "People we sell to",
            "is_active": true
        }))
        .unwrap();

        let mut form = EntityForm::from_record(&entity);
        form.lock_for_edit();
        form.set_field("entity_name", "Client").unwrap();
        let body = serde_json::to_value(form.to_payload()).unwrap();

        assert_eq!(body["entity_description"], "People we sell to");
        assert!(body.get("description").is_none());
    }

    #[test]
    fn entity_code_is_fixed_when_editing() {
        let mut form = EntityForm::default();
        form.set_entity_code("customer").unwrap();
        form.lock_for_edit();

        assert_eq!(
            form.set_field("code", "client"),
            Err(FormError::Locked("entity_code"))
        );
        form.set_field("name", "Client").unwrap();
        assert_eq!(form.to_payload().entity_code, "CUSTOMER");
        assert_eq!(form.to_payload().entity_name, "Client");
    }

    #[test_case("", "Customer", FormError::Required("entity_code"))]
    #[test_case("CUSTOMER", "  ", FormError::Required("entity_name"))]
    fn entity_validation_requires_code_and_name(code: &str, name: &str, expected: FormError) {
        let mut form = EntityForm::default();
        form.set_entity_code(code).unwrap();
        form.set_entity_name(name);
        assert_eq!(form.validate(), Err(expected));
    }

    #[test]
    fn entity_code_length_is_bounded() {
        let mut form = EntityForm::default();
        form.set_entity_code(&"x".repeat(MAX_CODE_LENGTH + 1)).unwrap();
        form.set_entity_name("Too long");
        assert_eq!(
            form.validate(),
            Err(FormError::TooLong {
                field: "entity_code",
                max: MAX_CODE_LENGTH
            })
        );
    }

    #[test]
    fn attribute_code_is_lower_cased() {
        let mut form = AttributeForm::default();
        form.set_field("attribute_code", "First_Name").unwrap();
        assert_eq!(form.attribute_code, "first_name");
    }

    #[test]
    fn attribute_empty_default_becomes_none() {
        let mut form = AttributeForm::for_entity(Some(&Id::from("e1")));
        form.set_field("code", "email").unwrap();
        form.set_field("name", "Email").unwrap();
        assert_eq!(form.to_payload().default_value, None);

        form.set_field("default", "n/a").unwrap();
        assert_eq!(form.to_payload().default_value.as_deref(), Some("n/a"));
    }

    #[test]
    fn attribute_locked_identity_fields_reject_changes() {
        let mut form = AttributeForm::from_record(&sample_attribute());
        form.lock_for_edit();

        assert_eq!(
            form.set_field("entity_id", "e2"),
            Err(FormError::Locked("entity_id"))
        );
        assert_eq!(
            form.set_field("attribute_code", "other"),
            Err(FormError::Locked("attribute_code"))
        );
        assert_eq!(
            form.set_field("data_type", "INTEGER"),
            Err(FormError::Locked("data_type"))
        );

        form.set_field("attribute_name", "E-mail").unwrap();
        form.set_field("is_required", "no").unwrap();

        let payload = form.to_payload();
        assert_eq!(payload.entity_id, Id::from("e1"));
        assert_eq!(payload.attribute_code, "email");
        assert_eq!(payload.data_type, DataType::String);
        assert_eq!(payload.attribute_name, "E-mail");
        assert!(!payload.is_required);
    }

    #[test]
    fn attribute_requires_entity() {
        let mut form = AttributeForm::default();
        form.set_attribute_code("email").unwrap();
        form.set_attribute_name("Email");
        assert_eq!(form.validate(), Err(FormError::Required("entity_id")));
    }

    #[test]
    fn attribute_rejects_bad_flag_and_type() {
        let mut form = AttributeForm::default();
        assert!(matches!(
            form.set_field("is_unique", "maybe"),
            Err(FormError::InvalidValue { field: "is_unique", .. })
        ));
        assert!(matches!(
            form.set_field("data_type", "BLOB"),
            Err(FormError::InvalidValue { field: "data_type", .. })
        ));
    }

    #[test]
    fn catalog_defaults_enable_cache() {
        let form = CatalogForm::default();
        assert_eq!(form.catalog_type, CatalogType::Simple);
        assert!(!form.allow_user_values);
        assert!(form.cache_enabled);
    }

    #[test]
    fn catalog_fields_stay_mutable() {
        let mut form = CatalogForm::default();
        form.lock_for_edit();
        form.set_field("code", "country").unwrap();
        form.set_field("type", "hierarchical").unwrap();
        form.set_field("cache", "off").unwrap();
        assert_eq!(form.catalog_code, "COUNTRY");
        assert_eq!(form.catalog_type, CatalogType::Hierarchical);
        assert!(!form.cache_enabled);
    }

    #[test]
    fn unknown_field_lists_expected_names() {
        let err = CatalogForm::default().set_field("colour", "red").unwrap_err();
        assert!(err.to_string().contains("catalog_code, catalog_name"));
    }

    proptest! {
        #[test]
        fn entity_code_always_upper(input in "[a-zA-Z0-9_]{1,40}") {
            let mut form = EntityForm::default();
            form.set_entity_code(&input).unwrap();
            prop_assert_eq!(form.to_payload().entity_code, input.to_uppercase());
        }

        #[test]
        fn catalog_code_always_upper(input in "[a-zA-Z0-9_]{1,40}") {
            let mut form = CatalogForm::default();
            form.set_catalog_code(&input);
            prop_assert_eq!(form.catalog_code, input.to_uppercase());
        }

        #[test]
        fn attribute_code_always_lower(input in "[a-zA-Z0-9_]{1,40}") {
            let mut form = AttributeForm::default();
            form.set_attribute_code(&input).unwrap();
            prop_assert_eq!(form.attribute_code, input.to_lowercase());
        }
    }
}
