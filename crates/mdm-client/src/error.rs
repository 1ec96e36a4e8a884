//! Error types for the MDM API client.

use serde_json::Value;
use thiserror::Error;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that can occur while talking to the MDM API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connect failure, timeout, reset).
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("server returned {status}{}", detail_suffix(.detail.as_deref()))]
    Server {
        /// HTTP status code.
        status: u16,
        /// Structured detail extracted from the error body, if any.
        detail: Option<String>,
    },

    /// A success response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Invalid client configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// The most specific message available for showing to a user.
    ///
    /// Server-provided detail wins over the generic error text.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Server {
                detail: Some(detail),
                ..
            } => detail.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status of a server error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Build a server error from a status and raw response body.
    #[must_use]
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let detail = serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|value| extract_detail(&value))
            .or_else(|| {
                let text = String::from_utf8_lossy(body).trim().to_string();
                (!text.is_empty() && !text.starts_with('{')).then_some(text)
            });
        Self::Server { status, detail }
    }
}

fn detail_suffix(detail: Option<&str>) -> String {
    detail.map(|d| format!(": {d}")).unwrap_or_default()
}

/// Pull the `detail` field out of an error body.
///
/// Accepts a plain string detail or a list of validation items carrying `msg`.
fn extract_detail(body: &Value) -> Option<String> {
    match body.get("detail")? {
        Value::String(detail) => Some(detail.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
