//! HTTP implementation of [`MdmApi`] on top of reqwest.
//!
//! # Example
//!
//! ```rust,no_run
//! use mdm_client::{ClientConfig, HttpApi, MdmApi};
//!
//! # async fn example() -> Result<(), mdm_client::ApiError> {
//! let api = HttpApi::new(&ClientConfig::new("http://localhost:8000/api/v1"))?;
//! let health = api.health().await?;
//! println!("healthy: {}", health.is_healthy());
//! # Ok(())
//! # }
//! ```

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};
use url::Url;

use crate::api::MdmApi;
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::id::Id;
use crate::model::{
    Attribute, AttributePayload, AttributeQuery, Catalog, CatalogPayload, CatalogValue,
    CatalogValuePayload, Entity, EntityPayload, EntityQuery, HealthReport, Page,
};

/// MDM REST client.
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    base_url: Url,
}

impl std::fmt::Debug for HttpApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpApi")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl HttpApi {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be constructed.
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let base = config.normalized_base_url()?;
        let base_url =
            Url::parse(&base).map_err(|e| ApiError::Config(format!("invalid API URL: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Config(format!("invalid API URL: {base}")));
        }

        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {e}")))?;

        debug!(base_url = %base_url, "API client ready");
        Ok(Self { client, base_url })
    }

    /// API root used for every request.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Resolve a resource path below the API root. Segments are escaped.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.client.request(method, self.endpoint(segments))
    }

    /// Send a request and return the raw body of a success response.
    async fn execute(&self, request: RequestBuilder) -> ApiResult<Vec<u8>> {
        let request = request.build()?;
        let method = request.method().clone();
        let path = request.url().path().to_string();

        debug!(%method, %path, "Sending request");
        let response = self.client.execute(request).await.map_err(|e| {
            warn!(%method, %path, error = %e, "Request failed before a response");
            ApiError::from(e)
        })?;

        let status = response.status();
        let body = response.bytes().await?.to_vec();

        if !status.is_success() {
            let err = ApiError::from_response(status.as_u16(), &body);
            warn!(%method, %path, status = status.as_u16(), error = %err, "Request rejected");
            return Err(err);
        }

        trace!(%method, %path, status = status.as_u16(), bytes = body.len(), "Received response");
        Ok(body)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let body = self.execute(request).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetch a collection; an empty or `null` body is an empty collection.
    async fn fetch_or_default<T: DeserializeOwned + Default>(
        &self,
        request: RequestBuilder,
    ) -> ApiResult<T> {
        let body = self.execute(request).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(T::default());
        }
        Ok(serde_json::from_slice::<Option<T>>(&body)?.unwrap_or_default())
    }
}

impl MdmApi for HttpApi {
    async fn list_entities(&self, query: &EntityQuery) -> ApiResult<Page<Entity>> {
        self.fetch_or_default(self.request(Method::GET, &["entities"]).query(query))
            .await
    }

    async fn get_entity(&self, id: &Id) -> ApiResult<Entity> {
        self.fetch(self.request(Method::GET, &["entities", id.as_str()]))
            .await
    }

    async fn get_entity_by_code(&self, code: &str) -> ApiResult<Entity> {
        self.fetch(self.request(Method::GET, &["entities", "code", code]))
            .await
    }

    async fn create_entity(&self, payload: &EntityPayload) -> ApiResult<Entity> {
        self.fetch(self.request(Method::POST, &["entities"]).json(payload))
            .await
    }

    async fn update_entity(&self, id: &Id, payload: &EntityPayload) -> ApiResult<Entity> {
        self.fetch(
            self.request(Method::PUT, &["entities", id.as_str()])
                .json(payload),
        )
        .await
    }

    async fn delete_entity(&self, id: &Id) -> ApiResult<()> {
        self.execute(self.request(Method::DELETE, &["entities", id.as_str()]))
            .await
            .map(drop)
    }

    async fn list_attributes(&self, query: &AttributeQuery) -> ApiResult<Vec<Attribute>> {
        self.fetch_or_default(self.request(Method::GET, &["attributes"]).query(query))
            .await
    }

    async fn get_attribute(&self, id: &Id) -> ApiResult<Attribute> {
        self.fetch(self.request(Method::GET, &["attributes", id.as_str()]))
            .await
    }

    async fn create_attribute(&self, payload: &AttributePayload) -> ApiResult<Attribute> {
        self.fetch(self.request(Method::POST, &["attributes"]).json(payload))
            .await
    }

    async fn update_attribute(&self, id: &Id, payload: &AttributePayload) -> ApiResult<Attribute> {
        self.fetch(
            self.request(Method::PUT, &["attributes", id.as_str()])
                .json(payload),
        )
        .await
    }

    async fn delete_attribute(&self, id: &Id) -> ApiResult<()> {
        self.execute(self.request(Method::DELETE, &["attributes", id.as_str()]))
            .await
            .map(drop)
    }

    async fn list_catalogs(&self) -> ApiResult<Vec<Catalog>> {
        self.fetch_or_default(self.request(Method::GET, &["catalogs"]))
            .await
    }

    async fn get_catalog(&self, id: &Id) -> ApiResult<Catalog> {
        self.fetch(self.request(Method::GET, &["catalogs", id.as_str()]))
            .await
    }

    async fn get_catalog_by_code(&self, code: &str) -> ApiResult<Catalog> {
        self.fetch(self.request(Method::GET, &["catalogs", "code", code]))
            .await
    }

    async fn create_catalog(&self, payload: &CatalogPayload) -> ApiResult<Catalog> {
        self.fetch(self.request(Method::POST, &["catalogs"]).json(payload))
            .await
    }

    async fn update_catalog(&self, id: &Id, payload: &CatalogPayload) -> ApiResult<Catalog> {
        self.fetch(
            self.request(Method::PUT, &["catalogs", id.as_str()])
                .json(payload),
        )
        .await
    }

    async fn delete_catalog(&self, id: &Id) -> ApiResult<()> {
        self.execute(self.request(Method::DELETE, &["catalogs", id.as_str()]))
            .await
            .map(drop)
    }

    async fn list_catalog_values(&self, catalog_id: &Id) -> ApiResult<Vec<CatalogValue>> {
        self.fetch_or_default(self.request(
            Method::GET,
            &["catalogs", catalog_id.as_str(), "values"],
        ))
        .await
    }

    async fn create_catalog_value(
        &self,
        payload: &CatalogValuePayload,
    ) -> ApiResult<CatalogValue> {
        self.fetch(
            self.request(Method::POST, &["catalogs", "values"])
                .json(payload),
        )
        .await
    }

    async fn health(&self) -> ApiResult<HealthReport> {
        self.fetch(self.request(Method::GET, &["health"])).await
    }
}
