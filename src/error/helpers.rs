//! Structured error reports for administrative handlers.
//!
//! Validation failures are returned to operators as data. These helpers turn an
//! [`AdapterError`] into a serializable report with one entry per offending
//! field, suitable for an HTTP error body.

use serde::Serialize;

use super::types::{AdapterError, ErrorCategory};
use crate::params::duplicates::DuplicateError;

/// Error kind for presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    DuplicateField,
    UnmappedField,
    InvalidMapping,
    InvalidParameter,
    NotCertified,
    InvalidRequest,
    Configuration,
    Parsing,
}

/// A single field-level problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// Dotted field path or bare field name, when the problem is attributable to one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub message: String,
}

impl FieldIssue {
    fn at(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            message: message.into(),
        }
    }

    fn general(message: impl Into<String>) -> Self {
        Self {
            path: None,
            message: message.into(),
        }
    }
}

/// Structured error summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub message: String,
    pub issues: Vec<FieldIssue>,
}

/// Summarize an AdapterError into a report with field-level issues.
pub fn summarize_error(err: &AdapterError) -> ErrorReport {
    ErrorReport {
        kind: map_error_kind(err),
        message: err.to_string(),
        issues: field_issues(err),
    }
}

/// Map AdapterError to presentation ErrorKind.
pub fn map_error_kind(err: &AdapterError) -> ErrorKind {
    match err {
        AdapterError::DuplicateFields(_) => ErrorKind::DuplicateField,
        AdapterError::CoverageGap(_) => ErrorKind::UnmappedField,
        AdapterError::InvalidMapping(_) => ErrorKind::InvalidMapping,
        AdapterError::InvalidParameter(_) => ErrorKind::InvalidParameter,
        AdapterError::NotCertified { .. } => ErrorKind::NotCertified,
        AdapterError::MissingPathParameter(_) | AdapterError::Conformance(_) => {
            ErrorKind::InvalidRequest
        }
        _ => match err.category() {
            ErrorCategory::Parsing => ErrorKind::Parsing,
            _ => ErrorKind::Configuration,
        },
    }
}

/// Expand an error into one issue per offending field.
pub fn field_issues(err: &AdapterError) -> Vec<FieldIssue> {
    match err {
        AdapterError::DuplicateFields(duplicates) => duplicates
            .iter()
            .map(|dup| match dup {
                DuplicateError::WithinCategory { category, name } => FieldIssue::at(
                    format!("{}.{}", category.path_prefix(), name),
                    dup.to_string(),
                ),
                DuplicateError::AcrossCategories { name, .. } => {
                    FieldIssue::at(name.clone(), dup.to_string())
                }
            })
            .collect(),
        AdapterError::CoverageGap(missing) => missing
            .iter()
            .map(|path| FieldIssue::at(path.to_string(), "required field has no mapping"))
            .collect(),
        AdapterError::MissingPathParameter(name) => vec![FieldIssue::at(
            format!("pathParameters.{name}"),
            "path parameter was not supplied",
        )],
        AdapterError::Conformance(issues) => issues
            .iter()
            .map(|issue| FieldIssue::at(issue.category.bucket_name(), issue.message.clone()))
            .collect(),
        other => vec![FieldIssue::general(other.to_string())],
    }
}
