//! Error Handling Module
//!
//! Error types shared by the validators, the request transformer and the
//! outbound preparation step:
//! - Core error types (`AdapterError`, `ErrorCategory`)
//! - Structured error reports for administrative handlers
//! - Type conversions from common error types
//!
//! # Example
//!
//! ```rust,ignore
//! use param_adapter::error::{AdapterError, ErrorCategory};
//!
//! let error = AdapterError::InvalidMapping("empty toField".into());
//! assert_eq!(error.category(), ErrorCategory::Validation);
//! ```

mod conversions;
pub mod helpers;
pub mod types;

pub use helpers::*;
pub use types::*;
