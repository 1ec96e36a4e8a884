//! Client configuration.

use std::time::Duration;

use url::Url;

use crate::error::{ApiError, ApiResult};

/// Default API root, matching the backend's versioned prefix.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

/// Default request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the HTTP API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root every resource path is appended to.
    pub base_url: String,
    /// Time allowed for a whole request.
    pub request_timeout: Duration,
    /// Time allowed to establish a connection.
    pub connect_timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: concat!("mdm-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a configuration for the given API root.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validate the base URL and return it without a trailing slash.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] unless the URL parses with an
    /// `http` or `https` scheme.
    pub fn normalized_base_url(&self) -> ApiResult<String> {
        let url = Url::parse(self.base_url.trim())
            .map_err(|e| ApiError::Config(format!("invalid API URL '{}': {e}", self.base_url)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!(
                "invalid API URL: {}, must start with http:// or https://",
                self.base_url
            )));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(ApiError::Config(format!(
                "API URL must not carry a query or fragment: {}",
                self.base_url
            )));
        }

        Ok(url.as_str().trim_end_matches('/').to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("mdm-client/"));
    }

    #[test]
    fn test_builder_methods() {
        let config = ClientConfig::new("https://mdm.example.com/api/v1")
            .with_request_timeout(Duration::from_secs(5))
            .with_connect_timeout(Duration::from_secs(1))
            .with_user_agent("ops-console");

        assert_eq!(config.base_url, "https://mdm.example.com/api/v1");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.connect_timeout, Duration::from_secs(1));
        assert_eq!(config.user_agent, "ops-console");
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = ClientConfig::new("http://localhost:8000/api/v1/");
        assert_eq!(
            config.normalized_base_url().unwrap(),
            "http://localhost:8000/api/v1"
        );
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let err = ClientConfig::new("ws://localhost:8000")
            .normalized_base_url()
            .unwrap_err();
        assert!(err.to_string().contains("must start with http://"));
    }

    #[test]
    fn test_garbage_url_rejected() {
        let err = ClientConfig::new("not a url").normalized_base_url().unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn test_query_rejected() {
        let err = ClientConfig::new("http://localhost/api?x=1")
            .normalized_base_url()
            .unwrap_err();
        assert!(err.to_string().contains("query"));
    }
}
