//! MDM data model: entities, attributes, catalogs and catalog values.
//!
//! Records mirror the JSON shapes served by the REST backend. Payload types
//! are what the client submits on create and update.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::id::Id;

/// Health status token the backend reports when it is fully operational.
pub const HEALTHY_STATUS: &str = "healthy";

fn default_true() -> bool {
    true
}

/// Treat an explicit JSON `null` as an empty collection.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Enumerations
// ============================================================================

/// Error returned when parsing an enumeration token fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}', expected one of: {expected}")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
    expected: String,
}

impl UnknownVariant {
    fn new<T: fmt::Display>(kind: &'static str, value: &str, all: &[T]) -> Self {
        let expected = all
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            kind,
            value: value.to_string(),
            expected,
        }
    }
}

/// Data type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataType {
    /// Short text.
    #[default]
    String,
    /// Whole number.
    Integer,
    /// Fixed-point number.
    Decimal,
    /// True or false.
    Boolean,
    /// Calendar date.
    Date,
    /// Date and time.
    Datetime,
    /// UUID value.
    Uuid,
    /// Arbitrary JSON document.
    Json,
    /// Long text.
    Text,
}

impl DataType {
    /// All data types in display order.
    pub const ALL: [Self; 9] = [
        Self::String,
        Self::Integer,
        Self::Decimal,
        Self::Boolean,
        Self::Date,
        Self::Datetime,
        Self::Uuid,
        Self::Json,
        Self::Text,
    ];

    /// Wire token for this data type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Integer => "INTEGER",
            Self::Decimal => "DECIMAL",
            Self::Boolean => "BOOLEAN",
            Self::Date => "DATE",
            Self::Datetime => "DATETIME",
            Self::Uuid => "UUID",
            Self::Json => "JSON",
            Self::Text => "TEXT",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(token))
            .ok_or_else(|| UnknownVariant::new("data type", token, &Self::ALL))
    }
}

/// Structure of a catalog's value set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CatalogType {
    /// Flat list of values.
    #[default]
    Simple,
    /// Values arranged in a parent/child tree.
    Hierarchical,
    /// Values filtered by a value of another catalog.
    Dependent,
}

impl CatalogType {
    /// All catalog types in display order.
    pub const ALL: [Self; 3] = [Self::Simple, Self::Hierarchical, Self::Dependent];

    /// Wire token for this catalog type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "SIMPLE",
            Self::Hierarchical => "HIERARCHICAL",
            Self::Dependent => "DEPENDENT",
        }
    }
}

impl fmt::Display for CatalogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for CatalogType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(token))
            .ok_or_else(|| UnknownVariant::new("catalog type", token, &Self::ALL))
    }
}

// ============================================================================
// Records
// ============================================================================

/// A logical record type managed by the MDM system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Server-assigned identifier.
    pub id: Id,
    /// Upper-case code, unique and fixed after creation.
    pub entity_code: String,
    /// Display label.
    pub entity_name: String,
    /// Free-text description.
    #[serde(default, alias = "entity_description")]
    pub description: Option<String>,
    /// Lower-case physical storage hint.
    #[serde(default)]
    pub table_name: Option<String>,
    /// Display flag controlled by the server.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A typed field belonging to exactly one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Server-assigned identifier.
    pub id: Id,
    /// Owning entity.
    pub entity_id: Id,
    /// Lower-case code, unique within the entity.
    pub attribute_code: String,
    /// Display label.
    pub attribute_name: String,
    /// Value type.
    pub data_type: DataType,
    /// Whether a value must be supplied.
    #[serde(default)]
    pub is_required: bool,
    /// Whether values must be unique across records.
    #[serde(default)]
    pub is_unique: bool,
    /// Default value, if any.
    #[serde(default)]
    pub default_value: Option<String>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A named, typed set of lookup values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Server-assigned identifier.
    pub id: Id,
    /// Upper-case code, unique.
    pub catalog_code: String,
    /// Display label.
    pub catalog_name: String,
    /// Structure of the value set.
    #[serde(default)]
    pub catalog_type: CatalogType,
    /// Whether end users may add ad-hoc values.
    #[serde(default)]
    pub allow_user_values: bool,
    /// Hint that values may be cached by the backend.
    #[serde(default = "default_true")]
    pub cache_enabled: bool,
    /// Display flag controlled by the server.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One member of a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogValue {
    /// Server-assigned identifier.
    pub id: Id,
    /// Owning catalog. Some list endpoints omit it.
    #[serde(default)]
    pub catalog_id: Option<Id>,
    /// Value code.
    pub value_code: String,
    /// Display label.
    pub value_name: String,
    /// Position in display order.
    #[serde(default)]
    pub sort_order: i32,
}

// ============================================================================
// Payloads
// ============================================================================

/// Body submitted when creating or updating an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityPayload {
    /// Entity code.
    pub entity_code: String,
    /// Display label.
    pub entity_name: String,
    /// Description, possibly empty.
    #[serde(rename = "entity_description", alias = "description")]
    pub description: String,
    /// Storage hint, possibly empty.
    pub table_name: String,
}

/// Body submitted when creating or updating an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributePayload {
    /// Owning entity.
    pub entity_id: Id,
    /// Attribute code.
    pub attribute_code: String,
    /// Display label.
    pub attribute_name: String,
    /// Value type.
    pub data_type: DataType,
    /// Whether a value must be supplied.
    pub is_required: bool,
    /// Whether values must be unique.
    pub is_unique: bool,
    /// Default value; `null` rather than an empty string.
    pub default_value: Option<String>,
}

/// Body submitted when creating or updating a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPayload {
    /// Catalog code.
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

/// Body submitted when creating a catalog value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogValuePayload {
    /// Owning catalog.
    pub catalog_id: Id,
    /// Value code.
    pub value_code: String,
    /// Display label.
    pub value_name: String,
    /// Position in display order.
    pub sort_order: i32,
}

// ============================================================================
// Envelopes and queries
// ============================================================================

/// Paginated list envelope.
///
/// The entities list endpoint always answers with this shape. Only `items`
/// is required; the counters are optional on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    /// Records on this page.
    #[serde(default = "Vec::new", deserialize_with = "null_as_empty")]
    pub items: Vec<T>,
    /// Total matching records across all pages.
    #[serde(default)]
    pub total: Option<u64>,
    /// One-based page number.
    #[serde(default)]
    pub page: Option<u32>,
    /// Page size used by the server.
    #[serde(default)]
    pub page_size: Option<u32>,
    /// Number of pages.
    #[serde(default)]
    pub pages: Option<u32>,
}

impl<T> Page<T> {
    /// Build a single page holding every item.
    #[must_use]
    pub fn of(items: Vec<T>) -> Self {
        let total = items.len() as u64;
        Self {
            items,
            total: Some(total),
            page: Some(1),
            page_size: None,
            pages: Some(1),
        }
    }

    /// Record count: the server-reported total when non-zero, else the
    /// page length.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.total
            .filter(|total| *total > 0)
            .unwrap_or(self.items.len() as u64)
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: None,
            page: None,
            page_size: None,
            pages: None,
        }
    }
}

/// Query parameters for listing entities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntityQuery {
    /// One-based page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Records per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// Substring match over code and name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Restrict to active or inactive entities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Query parameters for listing attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttributeQuery {
    /// Restrict to one entity; absent means every entity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<Id>,
}

impl AttributeQuery {
    /// Query scoped to one entity.
    #[must_use]
    pub fn for_entity(entity_id: Id) -> Self {
        Self {
            entity_id: Some(entity_id),
        }
    }
}

/// Health probe response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HealthReport {
    /// Status token.
    #[serde(default)]
    pub status: Option<String>,
    /// Backend version.
    #[serde(default)]
    pub version: Option<String>,
    /// Database connectivity.
    #[serde(default)]
    pub database: Option<String>,
}

impl HealthReport {
    /// Healthy only on an exact match of the status token.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status.as_deref() == Some(HEALTHY_STATUS)
    }
}
