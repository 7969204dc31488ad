//! Outbound Request Preparation
//!
//! Resolves a transformed request against a provider endpoint so it can be
//! handed to any HTTP client.
//!
//! ## Module Organization
//!
//! - [`endpoint`] - endpoint descriptor, HTTP method, URL template placeholders
//! - [`credentials`] - API key handling with secret redaction
//! - [`prepare`](mod@prepare) - URL rendering, query and body encoding

pub mod credentials;
pub mod endpoint;
pub mod prepare;

pub use credentials::ProviderCredentials;
pub use endpoint::{HttpMethod, ProviderEndpoint};
pub use prepare::{PreparedBody, PreparedRequest, prepare};
