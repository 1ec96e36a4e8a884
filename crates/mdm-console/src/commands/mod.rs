//! Console command implementations.
//!
//! Each submodule implements one top-level command:
//! - [`dashboard`] - Entity and catalog counts with API health
//! - [`health`] - Raw health probe
//! - [`entity`] - Entity management
//! - [`attribute`] - Attribute management
//! - [`catalog`] - Catalog management and values drill-down
//! - [`console`] - Interactive page-by-page session
//!
//! Mutating commands go through the resource views, so one-shot commands
//! and the interactive console apply the same normalization and checks.

pub mod attribute;
pub mod catalog;
pub mod console;
pub mod dashboard;
pub mod entity;
pub mod health;

use std::io::Write;

use mdm_client::Id;
use serde::Serialize;

use crate::error::CliError;
use crate::output::{Message, OutputFormat, TableDisplay};
use crate::views::ListState;

pub use attribute::AttributeCommand;
pub use catalog::CatalogCommand;
pub use console::Console;
pub use dashboard::DashboardCommand;
pub use entity::EntityCommand;
pub use health::HealthCommand;

/// Fail when a list could not be loaded and there are no rows to show.
pub(crate) fn ensure_loaded<T>(state: &ListState<T>, noun: &'static str) -> Result<(), CliError> {
    match state {
        ListState::Failed { items, message } if items.is_empty() => Err(CliError::Unavailable {
            noun,
            message: message.clone(),
        }),
        _ => Ok(()),
    }
}

/// Parse a non-blank identifier argument.
pub(crate) fn key_id(raw: &str) -> Result<Id, CliError> {
    let id = Id::new(raw.trim());
    if id.is_empty() {
        return Err(CliError::InvalidArgument("ID cannot be empty".into()));
    }
    Ok(id)
}

/// Report a saved record: the record itself as JSON, a one-line
/// confirmation as a table.
pub(crate) fn write_saved<W, T>(
    writer: &mut W,
    format: &OutputFormat,
    record: &T,
    message: String,
) -> Result<(), CliError>
where
    W: Write,
    T: Serialize + TableDisplay,
{
    if format.is_json() {
        format.write(writer, record)
    } else {
        format.write(writer, &Message::success(message))
    }
}

/// Report the outcome of a confirmed or declined delete.
pub(crate) fn write_deleted<W: Write>(
    writer: &mut W,
    format: &OutputFormat,
    deleted: bool,
    what: &str,
) -> Result<(), CliError> {
    let message = if deleted {
        Message::success(format!("{what} deleted"))
    } else {
        Message::info("Delete cancelled")
    };
    format.write(writer, &message)
}
