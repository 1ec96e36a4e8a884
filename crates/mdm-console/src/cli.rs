//! Command-line argument parsing with clap.

use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use mdm_client::{ClientConfig, DEFAULT_BASE_URL};

/// MDM admin console: manage entities, attributes and catalogs.
#[derive(Parser, Debug, Clone)]
#[command(name = "mdm")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the MDM API.
    #[arg(short = 'u', long, env = "MDM_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// Request timeout in seconds.
    #[arg(
        short,
        long,
        env = "MDM_TIMEOUT",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Answer yes to every confirmation prompt.
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Client configuration from the global flags.
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_url.clone())
            .with_request_timeout(Duration::from_secs(self.timeout))
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show entity and catalog counts and API health.
    Dashboard,

    /// Probe the API health endpoint.
    Health,

    /// Entity management commands.
    Entity {
        /// Entity subcommand to execute.
        #[command(subcommand)]
        command: EntityCommands,
    },

    /// Attribute management commands.
    Attribute {
        /// Attribute subcommand to execute.
        #[command(subcommand)]
        command: AttributeCommands,
    },

    /// Catalog management commands.
    Catalog {
        /// Catalog subcommand to execute.
        #[command(subcommand)]
        command: CatalogCommands,
    },

    /// Interactive console with page navigation.
    Console,
}

// ============================================================================
// Entities
// ============================================================================

/// Entity subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum EntityCommands {
    /// List entities.
    List(EntityListArgs),

    /// Show one entity.
    Get {
        /// Entity ID, or code with `--code`.
        key: String,

        /// Look the entity up by code.
        #[arg(long)]
        code: bool,
    },

    /// Create an entity.
    Create(EntityCreateArgs),

    /// Update an entity. The code cannot change.
    Update {
        /// Entity ID.
        id: String,

        /// Fields to change.
        #[command(flatten)]
        fields: EntityUpdateArgs,
    },

    /// Delete an entity.
    Delete {
        /// Entity ID.
        id: String,
    },
}

/// Arguments for listing entities.
#[derive(Args, Debug, Clone, Default)]
pub struct EntityListArgs {
    /// Substring to match against code and name.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Page number, starting at 1.
    #[arg(long)]
    pub page: Option<u32>,

    /// Entities per page.
    #[arg(long)]
    pub page_size: Option<u32>,

    /// List inactive entities instead of active ones.
    #[arg(long)]
    pub inactive: bool,
}

/// Arguments for creating an entity.
#[derive(Args, Debug, Clone)]
pub struct EntityCreateArgs {
    /// Entity code; upper-cased.
    #[arg(short, long)]
    pub code: String,

    /// Display name.
    #[arg(short, long)]
    pub name: String,

    /// Description.
    #[arg(short, long)]
    pub description: Option<String>,

    /// Storage table name; lower-cased.
    #[arg(short, long)]
    pub table_name: Option<String>,
}

/// Entity fields that can change after creation.
#[derive(Args, Debug, Clone, Default)]
pub struct EntityUpdateArgs {
    /// Display name.
    #[arg(short, long)]
    pub name: Option<String>,

    /// Description.
    #[arg(short, long)]
    pub description: Option<String>,

    /// Storage table name; lower-cased.
    #[arg(short, long)]
    pub table_name: Option<String>,
}

// ============================================================================
// Attributes
// ============================================================================

/// Attribute subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum AttributeCommands {
    /// List attributes, optionally for one entity.
    List {
        /// Only attributes of this entity ID.
        #[arg(short, long)]
        entity: Option<String>,
    },

    /// Show one attribute.
    Get {
        /// Attribute ID.
        id: String,
    },

    /// Create an attribute.
    Create(AttributeCreateArgs),

    /// Update an attribute. Entity, code and data type cannot change.
    Update {
        /// Attribute ID.
        id: String,

        /// Fields to change.
        #[command(flatten)]
        fields: AttributeUpdateArgs,
    },

    /// Delete an attribute.
    Delete {
        /// Attribute ID.
        id: String,
    },
}

/// Arguments for creating an attribute.
#[derive(Args, Debug, Clone)]
pub struct AttributeCreateArgs {
    /// Owning entity ID.
    #[arg(short, long)]
    pub entity: String,

    /// Attribute code; lower-cased.
    #[arg(short, long)]
    pub code: String,

    /// Display name.
    #[arg(short, long)]
    pub name: String,

    /// Data type (STRING, INTEGER, DECIMAL, BOOLEAN, DATE, DATETIME, UUID, JSON, TEXT).
    #[arg(long, default_value = "STRING")]
    pub data_type: String,

    /// Values must be supplied.
    #[arg(long)]
    pub required: bool,

    /// Values must be unique.
    #[arg(long)]
    pub unique: bool,

    /// Default value.
    #[arg(long)]
    pub default: Option<String>,
}

/// Attribute fields that can change after creation.
#[derive(Args, Debug, Clone, Default)]
pub struct AttributeUpdateArgs {
    /// Display name.
    #[arg(short, long)]
    pub name: Option<String>,

    /// Values must be supplied.
    #[arg(long)]
    pub required: Option<bool>,

    /// Values must be unique.
    #[arg(long)]
    pub unique: Option<bool>,

    /// Default value; an empty string clears it.
    #[arg(long)]
    pub default: Option<String>,
}

// ============================================================================
// Catalogs
// ============================================================================

/// Catalog subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum CatalogCommands {
    /// List catalogs.
    List,

    /// Show a catalog and its values.
    Show {
        /// Catalog ID, or code with `--code`.
        key: String,

        /// Look the catalog up by code.
        #[arg(long)]
        code: bool,
    },

    /// Create a catalog.
    Create(CatalogCreateArgs),

    /// Update a catalog.
    Update {
        /// Catalog ID.
        id: String,

        /// Fields to change.
        #[command(flatten)]
        fields: CatalogUpdateArgs,
    },

    /// Delete a catalog.
    Delete {
        /// Catalog ID.
        id: String,
    },
}

/// Arguments for creating a catalog.
#[derive(Args, Debug, Clone)]
pub struct CatalogCreateArgs {
    /// Catalog code; upper-cased.
    #[arg(short, long)]
    pub code: String,

    /// Display name.
    #[arg(short, long)]
    pub name: String,

    /// Catalog type (SIMPLE, HIERARCHICAL, DEPENDENT).
    #[arg(long = "type", default_value = "SIMPLE")]
    pub catalog_type: String,

    /// Let end users add their own values.
    #[arg(long)]
    pub allow_user_values: bool,

    /// Disable backend caching of values.
    #[arg(long)]
    pub no_cache: bool,
}

/// Catalog fields to change.
#[derive(Args, Debug, Clone, Default)]
pub struct CatalogUpdateArgs {
    /// Catalog code; upper-cased.
    #[arg(short, long)]
    pub code: Option<String>,

    /// Display name.
    #[arg(short, long)]
    pub name: Option<String>,

    /// Catalog type.
    #[arg(long = "type")]
    pub catalog_type: Option<String>,

    /// Let end users add their own values.
    #[arg(long)]
    pub allow_user_values: Option<bool>,

    /// Enable backend caching of values.
    #[arg(long)]
    pub cache: Option<bool>,
}
