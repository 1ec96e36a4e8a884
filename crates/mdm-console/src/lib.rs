//! # mdm-console
//!
//! Administration console for the MDM backend.
//!
//! Provides:
//! - A dashboard with entity and catalog counts and API health
//! - Entity, attribute and catalog management (list, create, edit, delete)
//! - Catalog values drill-down
//! - An interactive console that navigates between pages
//!
//! # Architecture
//!
//! Every page is a view over an [`mdm_client::MdmApi`]. Views own the list
//! state and the open form; one-shot commands and the interactive console
//! drive the same views.
//!
//! ```text
//! ┌──────────────┐      ┌──────────────────┐      ┌──────────┐
//! │ CLI / console│─────►│ views (list+form)│─────►│  MdmApi  │
//! └──────────────┘      └──────────────────┘      └──────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod confirm;
pub mod dashboard;
pub mod error;
pub mod output;
pub mod resource;
pub mod shell;
pub mod views;

#[cfg(test)]
mod testing;

pub use cli::{Cli, Commands, Format};
pub use confirm::{AssumeYes, Confirm, PromptConfirm};
pub use dashboard::DashboardStats;
pub use error::{CliError, ViewError};
pub use output::OutputFormat;
pub use resource::Resource;
pub use shell::{ActiveView, Page, Shell};
pub use views::{AttributesView, CatalogsView, EntitiesView, ListState, Modal, ResourceView};
