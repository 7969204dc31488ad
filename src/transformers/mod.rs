//! Transformers layer
//!
//! Request transformation from the canonical caller shape into provider
//! buckets, plus the path and value helpers it is built on.

pub(crate) mod json_path;
pub mod request;
pub mod transformation;

pub use json_path::PathError;
pub use request::{
    AdapterRequestTransformer, RequestTransformer, TransformedRequest, transform, transform_with,
};
pub use transformation::Transformation;
