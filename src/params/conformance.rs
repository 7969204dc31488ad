//! Outbound conformance check
//!
//! Compiles each bucket of a structured schema into a JSON Schema and checks a
//! transformed request against it. This is an optional diagnostic for
//! operators testing an adapter; the transformer itself never calls it.

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::error::AdapterError;
use crate::transformers::TransformedRequest;
use crate::types::{Category, StructuredParameterSchema};

/// One violation found in a transformed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConformanceIssue {
    pub category: Category,
    pub message: String,
}

impl std::fmt::Display for ConformanceIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.category.bucket_name(), self.message)
    }
}

/// JSON Schema describing one bucket of `schema`.
///
/// Unknown keys are allowed: providers routinely accept more than is declared.
pub fn bucket_json_schema(schema: &StructuredParameterSchema, category: Category) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for (name, field) in schema.fields(category) {
        let mut property = Map::new();
        if let Some(ty) = field.r#type.json_schema_type() {
            property.insert("type".to_string(), Value::from(ty));
        }
        if let Some(description) = &field.description {
            property.insert("description".to_string(), Value::from(description.as_str()));
        }
        properties.insert(name.clone(), Value::Object(property));
        if field.required {
            required.push(Value::from(name.as_str()));
        }
    }
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

/// Check every bucket of `request` against `schema`, collecting all violations
pub fn check_conformance(
    schema: &StructuredParameterSchema,
    request: &TransformedRequest,
) -> Result<(), AdapterError> {
    let mut issues = Vec::new();
    for category in Category::ALL {
        if category == Category::Body && !schema.has_body() {
            continue;
        }
        let bucket_schema = bucket_json_schema(schema, category);
        let validator = jsonschema::validator_for(&bucket_schema)
            .map_err(|e| AdapterError::SchemaCompilation(e.to_string()))?;
        let instance = Value::Object(request.bucket(category).clone());
        issues.extend(
            validator
                .iter_errors(&instance)
                .map(|error| ConformanceIssue {
                    category,
                    message: error.to_string(),
                }),
        );
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(AdapterError::Conformance(issues))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParameterSchemaDraft;
    use crate::types::{BodyKind, ParameterField};

    fn schema() -> StructuredParameterSchema {
        ParameterSchemaDraft::new()
            .header("x-api-key", ParameterField::string().required())
            .body_kind(BodyKind::Json)
            .body_field("max_tokens", ParameterField::number().required())
            .body_field("metadata", ParameterField::json())
            .build()
            .unwrap()
    }

    #[test]
    fn bucket_schema_shape() {
        let body = bucket_json_schema(&schema(), Category::Body);
        assert_eq!(body["properties"]["max_tokens"]["type"], "number");
        assert!(body["properties"]["metadata"].get("type").is_none());
        assert_eq!(body["required"], json!(["max_tokens"]));
    }

    #[test]
    fn conforming_request_passes() {
        let mut request = TransformedRequest::default();
        request.headers.insert("x-api-key".into(), json!("sk"));
        request.body.insert("max_tokens".into(), json!(64));
        request.body.insert("metadata".into(), json!({"user": "u1"}));
        request.body.insert("extra".into(), json!(true));
        assert!(check_conformance(&schema(), &request).is_ok());
    }

    #[test]
    fn reports_every_violation() {
        let mut request = TransformedRequest::default();
        request.body.insert("max_tokens".into(), json!("many"));
        let Err(AdapterError::Conformance(issues)) = check_conformance(&schema(), &request) else {
            panic!("expected conformance issues");
        };
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].category, Category::Header);
        assert_eq!(issues[1].category, Category::Body);
    }
}
