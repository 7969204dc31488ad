//! Core error types

use thiserror::Error;

use crate::params::conformance::ConformanceIssue;
use crate::params::duplicates::DuplicateError;
use crate::types::FieldPath;

/// Errors produced by the parameter adapter engine.
///
/// Validation failures carry every offending item so an administrator can fix
/// all of them in one pass.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdapterError {
    /// The structured parameter schema repeats field names
    #[error("Duplicate parameter fields: {}", join(.0))]
    DuplicateFields(Vec<DuplicateError>),

    /// Required provider fields have no adapter mapping targeting them
    #[error("Required fields are not mapped: {}", join(.0))]
    CoverageGap(Vec<FieldPath>),

    /// An adapter mapping entry is malformed
    #[error("Invalid mapping: {0}")]
    InvalidMapping(String),

    /// A parameter field or schema value is malformed
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The mapping has no coverage stamp for the current endpoint schema
    #[error("Mapping '{mapping}' has not been validated against the current endpoint schema")]
    NotCertified { mapping: String },

    /// The endpoint URL names a path parameter the request did not supply
    #[error("Missing path parameter '{0}'")]
    MissingPathParameter(String),

    /// The transformed request does not match the endpoint schema
    #[error("Outbound request does not conform to the endpoint schema: {}", join(.0))]
    Conformance(Vec<ConformanceIssue>),

    /// A derived JSON Schema could not be compiled
    #[error("Schema compilation error: {0}")]
    SchemaCompilation(String),

    /// Invalid engine or credential configuration
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    JsonError(String),
}

/// Coarse classification of [`AdapterError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Operator-supplied definitions are inconsistent; reject the save
    Validation,
    /// A request could not be made ready for dispatch
    Request,
    /// Local configuration is missing or invalid
    Configuration,
    /// Input could not be parsed
    Parsing,
}

impl AdapterError {
    /// Classify this error
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::DuplicateFields(_)
            | Self::CoverageGap(_)
            | Self::InvalidMapping(_)
            | Self::InvalidParameter(_)
            | Self::NotCertified { .. } => ErrorCategory::Validation,
            Self::MissingPathParameter(_) | Self::Conformance(_) => ErrorCategory::Request,
            Self::SchemaCompilation(_) | Self::ConfigurationError(_) => {
                ErrorCategory::Configuration
            }
            Self::JsonError(_) => ErrorCategory::Parsing,
        }
    }

    /// Whether the error is the result of operator input that can be fixed and resubmitted
    pub const fn is_user_correctable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Validation | ErrorCategory::Request
        )
    }
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    #[test]
    fn coverage_gap_lists_every_field() {
        let err = AdapterError::CoverageGap(vec![
            FieldPath::new(Category::Header, "Authorization"),
            FieldPath::new(Category::Body, "prompt"),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("headers.Authorization"));
        assert!(msg.contains("body.data.prompt"));
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn categories() {
        assert_eq!(
            AdapterError::MissingPathParameter("id".into()).category(),
            ErrorCategory::Request
        );
        assert_eq!(
            AdapterError::JsonError("x".into()).category(),
            ErrorCategory::Parsing
        );
        assert!(!AdapterError::ConfigurationError("x".into()).is_user_correctable());
    }
}
