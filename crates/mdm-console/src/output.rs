//! Output formatting for console commands.
//!
//! Supports table (human-readable) and JSON output formats.

use std::io::Write;

use mdm_client::{Attribute, Catalog, CatalogValue, Entity, HealthReport};
use serde::Serialize;

use crate::cli::Format;
use crate::dashboard::DashboardStats;
use crate::error::CliError;
use crate::views::{AttributesView, CatalogsView};

/// Output formatter that handles both table and JSON output.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Create a new output formatter.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Get the current format.
    #[must_use]
    pub const fn format(&self) -> Format {
        self.format
    }

    /// Check if JSON format is selected.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self.format, Format::Json)
    }

    /// Write a serializable value to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize + TableDisplay,
    {
        match self.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
                writeln!(writer)?;
            }
            Format::Table => {
                value.write_table(writer)?;
            }
        }
        Ok(())
    }

    /// Write a serializable value to a string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_string<T>(&self, value: &T) -> Result<String, CliError>
    where
        T: Serialize + TableDisplay,
    {
        let mut buf = Vec::new();
        self.write(&mut buf, value)?;
        String::from_utf8(buf).map_err(|e| CliError::Format(format!("UTF-8 error: {e}")))
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::new(Format::Table)
    }
}

/// Trait for types that can be displayed as a table.
pub trait TableDisplay {
    /// Write the value as a human-readable table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError>;
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

// ============================================================================
// Dashboard and health
// ============================================================================

impl TableDisplay for DashboardStats {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Dashboard")?;
        writeln!(writer, "══════════════════════════════════")?;
        writeln!(writer, "Entities:         {}", self.entities)?;
        writeln!(writer, "Catalogs:         {}", self.catalogs)?;
        writeln!(writer, "API Status:       {}", self.status_label())?;
        if let Some(version) = &self.version {
            writeln!(writer, "API Version:      {version}")?;
        }
        writeln!(writer)?;
        writeln!(writer, "Quick Start")?;
        writeln!(
            writer,
            "  1. Create entities to define master data structures (customers, products, vendors)"
        )?;
        writeln!(writer, "  2. Add attributes to entities to define their properties")?;
        writeln!(writer, "  3. Set up catalogs for lookup values")?;
        Ok(())
    }
}

impl TableDisplay for HealthReport {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        let label = if self.is_healthy() { "Healthy" } else { "Unhealthy" };
        writeln!(writer, "Status:    {label}")?;
        if let Some(version) = &self.version {
            writeln!(writer, "Version:   {version}")?;
        }
        if let Some(database) = &self.database {
            writeln!(writer, "Database:  {database}")?;
        }
        Ok(())
    }
}

// ============================================================================
// Entities
// ============================================================================

/// Entities for listing.
#[derive(Debug, Clone, Serialize)]
pub struct EntityList {
    /// Listed entities.
    pub items: Vec<Entity>,
}

impl TableDisplay for EntityList {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.items.is_empty() {
            writeln!(writer, "No entities yet. Create one to get started.")?;
            return Ok(());
        }

        writeln!(
            writer,
            "{:<20}  {:<24}  {:<20}  {:<8}  {}",
            "CODE", "NAME", "TABLE", "ACTIVE", "ID"
        )?;
        writeln!(writer, "{}", "─".repeat(96))?;

        for entity in &self.items {
            writeln!(
                writer,
                "{:<20}  {:<24}  {:<20}  {:<8}  {}",
                truncate(&entity.entity_code, 20),
                truncate(&entity.entity_name, 24),
                truncate(entity.table_name.as_deref().unwrap_or("-"), 20),
                if entity.is_active { "Active" } else { "Inactive" },
                entity.id
            )?;
        }

        writeln!(writer)?;
        writeln!(writer, "Total: {} entity(ies)", self.items.len())?;
        Ok(())
    }
}

impl TableDisplay for Entity {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Entity: {}", self.entity_code)?;
        writeln!(writer, "══════════════════════════════════")?;
        writeln!(writer, "ID:           {}", self.id)?;
        writeln!(writer, "Name:         {}", self.entity_name)?;
        writeln!(
            writer,
            "Description:  {}",
            self.description.as_deref().unwrap_or("-")
        )?;
        writeln!(
            writer,
            "Table:        {}",
            self.table_name.as_deref().unwrap_or("-")
        )?;
        writeln!(writer, "Active:       {}", yes_no(self.is_active))?;
        if let Some(created) = self.created_at {
            writeln!(writer, "Created:      {}", created.format("%Y-%m-%d %H:%M:%S UTC"))?;
        }
        Ok(())
    }
}

// ============================================================================
// Attributes
// ============================================================================

/// One attribute with its owning entity's display name.
#[derive(Debug, Clone, Serialize)]
pub struct AttributeRow {
    /// The attribute.
    #[serde(flatten)]
    pub attribute: Attribute,
    /// Owning entity's name, or its id when unknown.
    pub entity_name: String,
}

/// Attributes for listing.
#[derive(Debug, Clone, Serialize)]
pub struct AttributeList {
    /// Listed attributes.
    pub items: Vec<AttributeRow>,
}

impl AttributeList {
    /// Build the listing from a loaded view.
    #[must_use]
    pub fn from_view(view: &AttributesView) -> Self {
        let items = view
            .items()
            .iter()
            .map(|attribute| AttributeRow {
                entity_name: view.entity_name(&attribute.entity_id).to_string(),
                attribute: attribute.clone(),
            })
            .collect();
        Self { items }
    }
}

impl TableDisplay for AttributeList {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.items.is_empty() {
            writeln!(writer, "No attributes found.")?;
            return Ok(());
        }

        writeln!(
            writer,
            "{:<20}  {:<20}  {:<18}  {:<9}  {:<8}  {:<6}  {}",
            "CODE", "NAME", "ENTITY", "TYPE", "REQUIRED", "UNIQUE", "ID"
        )?;
        writeln!(writer, "{}", "─".repeat(110))?;

        for row in &self.items {
            let a = &row.attribute;
            writeln!(
                writer,
                "{:<20}  {:<20}  {:<18}  {:<9}  {:<8}  {:<6}  {}",
                truncate(&a.attribute_code, 20),
                truncate(&a.attribute_name, 20),
                truncate(&row.entity_name, 18),
                a.data_type,
                yes_no(a.is_required),
                yes_no(a.is_unique),
                a.id
            )?;
        }

        writeln!(writer)?;
        writeln!(writer, "Total: {} attribute(s)", self.items.len())?;
        Ok(())
    }
}

impl TableDisplay for Attribute {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Attribute: {}", self.attribute_code)?;
        writeln!(writer, "══════════════════════════════════")?;
        writeln!(writer, "ID:        {}", self.id)?;
        writeln!(writer, "Entity:    {}", self.entity_id)?;
        writeln!(writer, "Name:      {}", self.attribute_name)?;
        writeln!(writer, "Type:      {}", self.data_type)?;
        writeln!(writer, "Required:  {}", yes_no(self.is_required))?;
        writeln!(writer, "Unique:    {}", yes_no(self.is_unique))?;
        writeln!(
            writer,
            "Default:   {}",
            self.default_value.as_deref().unwrap_or("-")
        )?;
        Ok(())
    }
}

// ============================================================================
// Catalogs
// ============================================================================

/// Catalogs for listing.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogList {
    /// Listed catalogs.
    pub items: Vec<Catalog>,
}

impl TableDisplay for CatalogList {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.items.is_empty() {
            writeln!(writer, "No catalogs found.")?;
            return Ok(());
        }

        writeln!(
            writer,
            "{:<20}  {:<24}  {:<12}  {:<11}  {:<5}  {}",
            "CODE", "NAME", "TYPE", "USER VALUES", "CACHE", "ID"
        )?;
        writeln!(writer, "{}", "─".repeat(96))?;

        for catalog in &self.items {
            writeln!(
                writer,
                "{:<20}  {:<24}  {:<12}  {:<11}  {:<5}  {}",
                truncate(&catalog.catalog_code, 20),
                truncate(&catalog.catalog_name, 24),
                catalog.catalog_type,
                yes_no(catalog.allow_user_values),
                yes_no(catalog.cache_enabled),
                catalog.id
            )?;
        }

        writeln!(writer)?;
        writeln!(writer, "Total: {} catalog(s)", self.items.len())?;
        Ok(())
    }
}

impl TableDisplay for Catalog {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Catalog: {}", self.catalog_code)?;
        writeln!(writer, "══════════════════════════════════")?;
        writeln!(writer, "ID:           {}", self.id)?;
        writeln!(writer, "Name:         {}", self.catalog_name)?;
        writeln!(writer, "Type:         {}", self.catalog_type)?;
        writeln!(writer, "User values:  {}", yes_no(self.allow_user_values))?;
        writeln!(writer, "Cache:        {}", yes_no(self.cache_enabled))?;
        Ok(())
    }
}

/// A catalog with its values.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogDetail {
    /// The catalog.
    pub catalog: Catalog,
    /// Its values in server order.
    pub values: Vec<CatalogValue>,
}

impl CatalogDetail {
    /// Build from the selection of a catalogs view.
    #[must_use]
    pub fn from_view(view: &CatalogsView) -> Option<Self> {
        view.selected().map(|catalog| Self {
            catalog: catalog.clone(),
            values: view.values().to_vec(),
        })
    }
}

impl TableDisplay for CatalogDetail {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        self.catalog.write_table(writer)?;
        writeln!(writer)?;
        writeln!(writer, "Values")?;

        if self.values.is_empty() {
            writeln!(writer, "  No values in this catalog.")?;
            return Ok(());
        }

        writeln!(writer, "  {:<16}  {:<32}  {:>5}", "CODE", "NAME", "ORDER")?;
        writeln!(writer, "  {}", "─".repeat(57))?;
        for value in &self.values {
            writeln!(
                writer,
                "  {:<16}  {:<32}  {:>5}",
                truncate(&value.value_code, 16),
                truncate(&value.value_name, 32),
                value.sort_order
            )?;
        }
        Ok(())
    }
}

// ============================================================================
// Messages
// ============================================================================

/// Simple message output.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    /// Message text.
    pub message: String,
    /// Whether this is a success message.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub success: bool,
}

impl Message {
    /// Create a success message.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    /// Create an informational message.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

impl TableDisplay for Message {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.success {
            writeln!(writer, "✓ {}", self.message)?;
        } else {
            writeln!(writer, "{}", self.message)?;
        }
        Ok(())
    }
}

/// Truncate a string to a maximum number of characters.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    } else {
        s.chars().take(max_len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdm_client::{CatalogType, DataType, Id};

    fn entity(code: &str, name: &str) -> Entity {
        Entity {
            id: Id::from(1),
            entity_code: code.into(),
            entity_name: name.into(),
            description: None,
            table_name: Some(code.to_lowercase()),
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    fn catalog() -> Catalog {
        Catalog {
            id: Id::from(1),
            catalog_code: "COUNTRIES".into(),
            catalog_name: "Countries".into(),
            catalog_type: CatalogType::Simple,
            allow_user_values: false,
            cache_enabled: true,
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn output_format_default_is_table() {
        let fmt = OutputFormat::default();
        assert_eq!(fmt.format(), Format::Table);
        assert!(!fmt.is_json());
    }

    #[test]
    fn dashboard_table_output() {
        let stats = DashboardStats {
            entities: 3,
            catalogs: 2,
            healthy: false,
            version: None,
        };
        let output = OutputFormat::default().to_string(&stats).unwrap();
        assert!(output.contains("Entities:         3"));
        assert!(output.contains("Catalogs:         2"));
        assert!(output.contains("API Status:       Unhealthy"));
        assert!(!output.contains("API Version"));
    }

    #[test]
    fn dashboard_json_output() {
        let stats = DashboardStats {
            entities: 3,
            catalogs: 2,
            healthy: true,
            version: Some("1.0.0".into()),
        };
        let output = OutputFormat::new(Format::Json).to_string(&stats).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["entities"], 3);
        assert_eq!(parsed["healthy"], true);
        assert_eq!(parsed["version"], "1.0.0");
    }

    #[test]
    fn entity_list_empty() {
        let output = OutputFormat::default()
            .to_string(&EntityList { items: vec![] })
            .unwrap();
        assert!(output.contains("No entities yet"));
    }

    #[test]
    fn entity_list_rows() {
        let list = EntityList {
            items: vec![entity("CUSTOMER", "Customer")],
        };
        let output = OutputFormat::default().to_string(&list).unwrap();
        assert!(output.contains("CUSTOMER"));
        assert!(output.contains("customer"));
        assert!(output.contains("Active"));
        assert!(output.contains("Total: 1 entity(ies)"));
    }

    #[test]
    fn attribute_row_json_is_flat() {
        let list = AttributeList {
            items: vec![AttributeRow {
                attribute: Attribute {
                    id: Id::from(7),
                    entity_id: Id::from(1),
                    attribute_code: "email".into(),
                    attribute_name: "Email".into(),
                    data_type: DataType::String,
                    is_required: true,
                    is_unique: false,
                    default_value: None,
                    created_at: None,
                    updated_at: None,
                },
                entity_name: "Customer".into(),
            }],
        };
        let output = OutputFormat::new(Format::Json).to_string(&list).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["items"][0]["attribute_code"], "email");
        assert_eq!(parsed["items"][0]["entity_name"], "Customer");

        let table = OutputFormat::default().to_string(&list).unwrap();
        assert!(table.contains("Customer"));
        assert!(table.contains("STRING"));
    }

    #[test]
    fn catalog_detail_shows_value_row() {
        let detail = CatalogDetail {
            catalog: catalog(),
            values: vec![CatalogValue {
                id: Id::from(10),
                catalog_id: Some(Id::from(1)),
                value_code: "US".into(),
                value_name: "United States".into(),
                sort_order: 1,
            }],
        };
        let output = OutputFormat::default().to_string(&detail).unwrap();
        let row = output
            .lines()
            .find(|line| line.contains("United States"))
            .unwrap();
        let cells: Vec<&str> = row.split_whitespace().collect();
        assert_eq!(cells, ["US", "United", "States", "1"]);
    }

    #[test]
    fn catalog_detail_without_values() {
        let detail = CatalogDetail {
            catalog: catalog(),
            values: vec![],
        };
        let output = OutputFormat::default().to_string(&detail).unwrap();
        assert!(output.contains("No values in this catalog."));
    }

    #[test]
    fn health_table_output() {
        let report = HealthReport {
            status: Some("healthy".into()),
            version: Some("1.0.0".into()),
            database: Some("connected".into()),
        };
        let output = OutputFormat::default().to_string(&report).unwrap();
        assert!(output.contains("Status:    Healthy"));
        assert!(output.contains("Database:  connected"));
    }

    #[test]
    fn message_success() {
        let output = OutputFormat::default()
            .to_string(&Message::success("Entity created"))
            .unwrap();
        assert!(output.contains("✓ Entity created"));
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("hello", 5), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("Größenordnung", 6), "Grö...");
    }
}
