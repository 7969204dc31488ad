//! Parameter Schema Validation Module
//!
//! Validation of provider endpoint schemas and the adapters that target them.
//!
//! ## Module Organization
//!
//! - **`draft`** - list-based schema assembly (keeps repeated names visible)
//! - **`duplicates`** - duplicate field names within and across categories
//! - **`required`** - required-field extraction
//! - **`coverage`** - required-field coverage of adapter mappings and certification
//! - **`conformance`** - checks a transformed request against the endpoint schema
//!
//! ## Typical flow
//!
//! ```rust,ignore
//! use param_adapter::params::{ParameterSchemaDraft, extract_required, validate_coverage};
//!
//! let schema = ParameterSchemaDraft::new()
//!     .header("Authorization", ParameterField::string().required())
//!     .build()?;                                   // duplicates rejected here
//! let required = extract_required(&schema);
//! validate_coverage(&required, &mapping)?;         // unmapped required fields
//! ```

pub mod conformance;
pub mod coverage;
pub mod draft;
pub mod duplicates;
pub mod required;

pub use conformance::{ConformanceIssue, bucket_json_schema, check_conformance};
pub use coverage::{certify, check_schema_coverage, validate_coverage};
pub use draft::{BodyDraft, FieldList, ParameterSchemaDraft};
pub use duplicates::{DuplicateError, validate, validate_draft};
pub use required::extract_required;
