//! Type Conversions for AdapterError
//!
//! `From` implementations for error types produced by the crate's dependencies.

use super::types::AdapterError;

impl From<serde_json::Error> for AdapterError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AdapterError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::InvalidParameter(err.to_string())
    }
}
