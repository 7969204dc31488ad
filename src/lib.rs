//! # param-adapter - Parameter Adapter Mapping Engine
//!
//! Describes the request shape of third-party AI provider endpoints as
//! structured metadata, validates that metadata, proves that an adapter maps
//! every required provider field, and translates canonical caller requests
//! into provider-shaped headers, body, query and path parameters.
#![deny(unsafe_code)]

//! ## Data Flow
//!
//! 1. An operator defines a provider endpoint schema; the duplicate validator
//!    accepts or rejects it ([`params::duplicates`]).
//! 2. An operator defines an adapter mapping model; the coverage validator
//!    accepts or rejects it against the endpoint schema ([`params::coverage`]).
//! 3. At request time the transformer builds the outbound buckets
//!    ([`transformers::request`]), and [`outbound::prepare`] resolves them into
//!    a request an HTTP client can send.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use param_adapter::prelude::*;
//! use serde_json::json;
//!
//! let engine = ParameterAdapter::new();
//! let schema = engine.validate_schema(
//!     ParameterSchemaDraft::new()
//!         .header("Authorization", ParameterField::string().required())
//!         .body_kind(BodyKind::Json)
//!         .body_field("model_name", ParameterField::string().required()),
//! )?;
//!
//! let mut adapter = AdapterMappingModel::new("chat-defaults")
//!     .with_mapping(AdapterMapping::new("token", "Authorization", Category::Header))
//!     .with_mapping(AdapterMapping::new("model", "body.model_name", Category::Body));
//! engine.certify(&mut adapter, &schema)?;
//!
//! let defaults = DefaultParameterSchema::from_value(json!({"temperature": 0.7}))?;
//! let out = engine.transform(&json!({"model": "gpt-4", "prompt": "hi"}), &adapter, &defaults);
//! assert_eq!(out.body["model_name"], "gpt-4");
//! ```
//!
//! ## Features
//!
//! - `telemetry`: [`observability::init_tracing`] built on `tracing-subscriber`

pub mod config;
pub mod engine;
pub mod error;
#[cfg(feature = "telemetry")]
pub mod observability;
pub mod outbound;
pub mod params;
pub mod transformers;
pub mod types;

pub use config::TransformOptions;
pub use engine::ParameterAdapter;
pub use error::{AdapterError, ErrorCategory};

pub mod prelude {
    pub use crate::config::TransformOptions;
    pub use crate::engine::ParameterAdapter;
    pub use crate::error::{AdapterError, ErrorCategory, ErrorReport, summarize_error};
    pub use crate::outbound::{
        HttpMethod, PreparedBody, PreparedRequest, ProviderCredentials, ProviderEndpoint,
    };
    pub use crate::params::{DuplicateError, ParameterSchemaDraft};
    pub use crate::transformers::{RequestTransformer, TransformedRequest, Transformation};
    pub use crate::types::{
        AdapterMapping, AdapterMappingModel, BodyKind, Category, DefaultParameterSchema,
        FieldPath, ParameterField, ParameterType, StructuredParameterSchema,
    };
}

static_assertions::assert_impl_all!(ParameterAdapter: Send, Sync, Clone);
static_assertions::assert_impl_all!(types::StructuredParameterSchema: Send, Sync, Clone);
static_assertions::assert_impl_all!(types::AdapterMappingModel: Send, Sync, Clone);
static_assertions::assert_impl_all!(types::DefaultParameterSchema: Send, Sync, Clone);
static_assertions::assert_impl_all!(transformers::AdapterRequestTransformer: Send, Sync);
static_assertions::assert_impl_all!(transformers::TransformedRequest: Send, Sync, Clone);
static_assertions::assert_impl_all!(outbound::ProviderEndpoint: Send, Sync, Clone);
static_assertions::assert_impl_all!(outbound::ProviderCredentials: Send, Sync);
static_assertions::assert_impl_all!(outbound::PreparedRequest: Send, Sync);
static_assertions::assert_impl_all!(AdapterError: Send, Sync, std::error::Error);
