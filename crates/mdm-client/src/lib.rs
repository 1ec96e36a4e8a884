//! # mdm-client
//!
//! Typed client for the master-data-management administration API.
//!
//! Provides:
//! - The data model: entities, attributes, catalogs and catalog values
//! - Form buffers with input-time normalization and required-field checks
//! - The [`MdmApi`] contract and its reqwest-backed [`HttpApi`]
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐   Form::to_payload   ┌──────────┐     HTTP/JSON     ┌─────────────┐
//! │  form buffer │────────────────────►│  MdmApi  │◄─────────────────►│ MDM backend │
//! └─────────────┘                      └──────────┘   (/api/v1/...)   └─────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod id;
pub mod model;

pub use api::MdmApi;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, ApiResult};
pub use form::{AttributeForm, CatalogForm, EntityForm, Form, FormError};
pub use http::HttpApi;
pub use id::Id;
pub use model::{
    Attribute, AttributePayload, AttributeQuery, Catalog, CatalogPayload, CatalogType,
    CatalogValue, CatalogValuePayload, DataType, Entity, EntityPayload, EntityQuery,
    HealthReport, Page, UnknownVariant, HEALTHY_STATUS,
};
