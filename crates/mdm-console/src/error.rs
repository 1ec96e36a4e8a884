//! Console error types.

use mdm_client::{ApiError, FormError, Id};
use thiserror::Error;

/// Errors raised by resource views.
#[derive(Debug, Error)]
pub enum ViewError {
    /// An edit or submit was attempted with no form open.
    #[error("no form is open")]
    NoOpenForm,

    /// The form rejected an input or failed validation.
    #[error(transparent)]
    Form(#[from] FormError),

    /// Create or update failed on the server.
    #[error("error saving {noun}: {message}")]
    Save {
        /// Resource noun, e.g. "attribute".
        noun: &'static str,
        /// Most specific message available.
        message: String,
        /// Underlying API failure.
        #[source]
        source: ApiError,
    },

    /// Delete failed on the server.
    #[error("error deleting {noun}: {message}")]
    Delete {
        /// Resource noun.
        noun: &'static str,
        /// Most specific message available.
        message: String,
        /// Underlying API failure.
        #[source]
        source: ApiError,
    },

    /// Fetching a single record failed.
    #[error("error loading {noun} {id}: {message}")]
    Fetch {
        /// Resource noun.
        noun: &'static str,
        /// Requested identifier.
        id: Id,
        /// Most specific message available.
        message: String,
        /// Underlying API failure.
        #[source]
        source: ApiError,
    },

    /// The record is not in the current list.
    #[error("{noun} not found: {id}")]
    NotFound {
        /// Resource noun.
        noun: &'static str,
        /// Requested identifier.
        id: Id,
    },

    /// Attributes cannot be created before any entity exists.
    #[error("create an entity first before adding attributes")]
    NoEntities,
}

impl ViewError {
    /// Message to show the user: the server detail for save and delete
    /// failures, else the error text.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Save { message, .. }
            | Self::Delete { message, .. }
            | Self::Fetch { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Errors returned by console commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// API client could not be configured.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A view operation failed.
    #[error(transparent)]
    View(#[from] ViewError),

    /// A list could not be loaded and there is nothing to show.
    #[error("could not load {noun}: {message}")]
    Unavailable {
        /// Plural resource noun.
        noun: &'static str,
        /// Failure message.
        message: String,
    },

    /// The backend answered the health probe with a non-healthy status.
    #[error("API is unhealthy: {0}")]
    Unhealthy(String),

    /// Invalid command argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Output formatting error.
    #[error("format error: {0}")]
    Format(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
