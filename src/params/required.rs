//! Required-field extraction

use crate::types::{Category, FieldPath, StructuredParameterSchema};

/// Every field marked `required`, as category-qualified paths.
///
/// Order is category order (headers, body, query, path parameters), then name.
/// The body is skipped entirely when the schema has no `bodyKind`.
pub fn extract_required(schema: &StructuredParameterSchema) -> Vec<FieldPath> {
    let mut required = Vec::new();
    for category in Category::ALL {
        if category == Category::Body && !schema.has_body() {
            continue;
        }
        required.extend(
            schema
                .fields(category)
                .iter()
                .filter(|(_, field)| field.required)
                .map(|(name, _)| FieldPath::new(category, name.clone())),
        );
    }
    required
}
