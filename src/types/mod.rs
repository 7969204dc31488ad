//! Data model of the mapping engine
//!
//! - **`field`** - parameter type tags and field descriptors
//! - **`schema`** - categories, body kinds and the structured parameter schema
//! - **`path`** - category-qualified field paths
//! - **`mapping`** - adapter mapping entries and models
//! - **`defaults`** - default parameter values per bucket

pub mod defaults;
pub mod field;
pub mod mapping;
pub mod path;
pub mod schema;

pub use defaults::DefaultParameterSchema;
pub use field::{NamedField, ParameterField, ParameterType};
pub use mapping::{AdapterMapping, AdapterMappingModel, CoverageStamp};
pub use path::FieldPath;
pub use schema::{BodyKind, BodySchema, Category, FieldMap, StructuredParameterSchema};
