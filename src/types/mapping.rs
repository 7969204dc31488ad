//! Adapter mapping model
//!
//! An adapter is the rule set that translates a canonical (default-parameter)
//! request into the shape a specific provider endpoint expects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::path::FieldPath;
use super::schema::{Category, StructuredParameterSchema};
use crate::error::AdapterError;
use crate::transformers::json_path;
use crate::transformers::transformation::Transformation;

/// One mapping rule: read `from_field` from the caller request, write it to
/// `to_field` inside the `to_category` bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdapterMapping {
    /// Dot-path into the caller's canonical request
    #[validate(length(min = 1), custom(function = "validate_dot_path"))]
    pub from_field: String,

    /// Dot-path into the destination bucket.
    ///
    /// A leading bucket alias is always stripped (`body.`, `body.data.`,
    /// `headers.`, `params.`, ...), so a body field literally named `body` is
    /// written as `body.data.body.text`, not `body.text`.
    #[validate(length(min = 1), custom(function = "validate_dot_path"))]
    pub to_field: String,

    pub to_category: Category,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transformation: Option<Transformation>,
}

impl AdapterMapping {
    pub fn new(
        from_field: impl Into<String>,
        to_field: impl Into<String>,
        to_category: Category,
    ) -> Self {
        Self {
            from_field: from_field.into(),
            to_field: to_field.into(),
            to_category,
            transformation: None,
        }
    }

    pub fn with_transformation(mut self, transformation: impl Into<Transformation>) -> Self {
        self.transformation = Some(transformation.into());
        self
    }

    /// Destination path relative to the bucket root
    pub fn destination(&self) -> &str {
        self.to_category.strip_bucket_prefix(&self.to_field)
    }

    /// Top-level key of the caller request this entry reads from
    pub fn source_root(&self) -> Option<String> {
        json_path::root_key(&self.from_field)
    }

    /// Whether writing this entry populates the given schema field.
    ///
    /// A write beneath the field (`options.seed`, `messages[0]`) creates it and
    /// therefore counts.
    pub fn covers(&self, path: &FieldPath) -> bool {
        if self.to_category != path.category() {
            return false;
        }
        let destination = self.destination();
        let name = path.name();
        match destination.strip_prefix(name) {
            Some(rest) => rest.is_empty() || rest.starts_with('.') || rest.starts_with('['),
            None => false,
        }
    }
}

fn validate_dot_path(path: &str) -> Result<(), ValidationError> {
    json_path::parse_path_strict(path)
        .map(|_| ())
        .map_err(|err| ValidationError::new("dot_path").with_message(err.to_string().into()))
}

/// Record of a successful coverage validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageStamp {
    pub schema_fingerprint: Uuid,
    pub mappings_fingerprint: Uuid,
    pub validated_at: DateTime<Utc>,
}

/// A list of mapping rules plus the default parameter set they translate from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdapterMappingModel {
    #[serde(default = "new_model_id")]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    #[validate(nested)]
    pub mappings: Vec<AdapterMapping>,

    /// Id of the default parameter schema this adapter maps from
    #[validate(length(min = 1))]
    pub default_parameter_schema_ref: String,

    /// Set by [`certify`](Self::certify); stale once the schema or mappings change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage: Option<CoverageStamp>,
}

fn new_model_id() -> String {
    Uuid::new_v4().to_string()
}

impl AdapterMappingModel {
    pub fn new(default_parameter_schema_ref: impl Into<String>) -> Self {
        Self {
            id: new_model_id(),
            name: None,
            mappings: Vec::new(),
            default_parameter_schema_ref: default_parameter_schema_ref.into(),
            coverage: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_mapping(mut self, mapping: AdapterMapping) -> Self {
        self.push(mapping);
        self
    }

    /// Add a mapping entry; any previous coverage stamp is dropped
    pub fn push(&mut self, mapping: AdapterMapping) {
        self.mappings.push(mapping);
        self.coverage = None;
    }

    /// Remove every entry targeting `path`, returning the removed entries
    pub fn remove_destination(&mut self, path: &FieldPath) -> Vec<AdapterMapping> {
        let (removed, kept) = std::mem::take(&mut self.mappings)
            .into_iter()
            .partition(|mapping| mapping.covers(path));
        self.mappings = kept;
        if !removed.is_empty() {
            self.coverage = None;
        }
        removed
    }

    /// Content fingerprint of the mapping list
    pub fn mappings_fingerprint(&self) -> Uuid {
        let bytes = serde_json::to_vec(&self.mappings).unwrap_or_default();
        Uuid::new_v5(&Uuid::NAMESPACE_OID, &bytes)
    }

    /// Whether the last coverage validation still applies to `schema` and the current mappings
    pub fn is_usable_for(&self, schema: &StructuredParameterSchema) -> bool {
        self.coverage.as_ref().is_some_and(|stamp| {
            stamp.schema_fingerprint == schema.fingerprint()
                && stamp.mappings_fingerprint == self.mappings_fingerprint()
        })
    }

    /// Check the mapping entries themselves: well-formed paths and known transformation tags.
    ///
    /// Every problem is reported in one error.
    pub fn validate_definition(&self) -> Result<(), AdapterError> {
        let mut problems = Vec::new();
        if let Err(errors) = self.validate() {
            problems.push(errors.to_string());
        }
        for (index, mapping) in self.mappings.iter().enumerate() {
            if mapping.destination().is_empty() {
                problems.push(format!(
                    "mappings[{index}]: toField '{}' does not name a field in the {} bucket",
                    mapping.to_field,
                    mapping.to_category.bucket_name()
                ));
            }
            if let Some(Transformation::Custom(tag)) = &mapping.transformation {
                problems.push(format!(
                    "mappings[{index}]: unknown transformation '{tag}'"
                ));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(AdapterError::InvalidMapping(problems.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_named_like_its_bucket_needs_the_full_prefix() {
        let stripped = AdapterMapping::new("text", "body.text", Category::Body);
        assert_eq!(stripped.destination(), "text");

        let nested = AdapterMapping::new("text", "body.data.body.text", Category::Body);
        assert_eq!(nested.destination(), "body.text");

        let param = AdapterMapping::new("p", "pathParameters.params", Category::PathParameter);
        assert_eq!(param.destination(), "params");
    }

    #[test]
    fn destination_strips_bucket_prefix() {
        let mapping = AdapterMapping::new("model", "body.model_name", Category::Body);
        assert_eq!(mapping.destination(), "model_name");
        assert_eq!(mapping.source_root().as_deref(), Some("model"));
    }

    #[test]
    fn covers_exact_and_nested_destinations() {
        let prompt = FieldPath::new(Category::Body, "prompt");
        assert!(AdapterMapping::new("input", "prompt", Category::Body).covers(&prompt));
        assert!(AdapterMapping::new("input", "body.data.prompt", Category::Body).covers(&prompt));
        assert!(AdapterMapping::new("input", "prompt.text", Category::Body).covers(&prompt));
        assert!(AdapterMapping::new("input", "prompt[0]", Category::Body).covers(&prompt));
        assert!(!AdapterMapping::new("input", "prompts", Category::Body).covers(&prompt));
        assert!(!AdapterMapping::new("input", "prompt", Category::Query).covers(&prompt));
    }

    #[test]
    fn deserializes_wire_shape() {
        let model: AdapterMappingModel = serde_json::from_value(serde_json::json!({
            "mappings": [
                {"fromField": "model", "toField": "body.model_name", "toCategory": "body"},
                {"fromField": "apiKey", "toField": "Authorization", "toCategory": "header",
                 "transformation": "toString"}
            ],
            "defaultParameterSchemaRef": "chat-defaults"
        }))
        .unwrap();
        assert_eq!(model.mappings.len(), 2);
        assert_eq!(model.mappings[1].transformation, Some(Transformation::ToString));
        assert!(!model.id.is_empty());
        assert!(model.coverage.is_none());
    }

    #[test]
    fn validate_definition_reports_all_problems() {
        let model = AdapterMappingModel::new("defaults")
            .with_mapping(AdapterMapping::new("", "prompt", Category::Body))
            .with_mapping(AdapterMapping::new("a..b", "prompt", Category::Body))
            .with_mapping(
                AdapterMapping::new("x", "y", Category::Query).with_transformation("rot13"),
            );
        let err = model.validate_definition().unwrap_err();
        let AdapterError::InvalidMapping(msg) = err else {
            panic!("expected InvalidMapping");
        };
        assert!(msg.contains("mappings"));
        assert!(msg.contains("unknown transformation 'rot13'"));
    }

    #[test]
    fn validate_definition_accepts_well_formed_model() {
        let model = AdapterMappingModel::new("defaults")
            .with_mapping(AdapterMapping::new("messages[0].content", "prompt", Category::Body))
            .with_mapping(
                AdapterMapping::new("stream", "stream", Category::Query)
                    .with_transformation("to_string"),
            );
        assert!(model.validate_definition().is_ok());
    }

    #[test]
    fn editing_mappings_drops_coverage() {
        let mut model = AdapterMappingModel::new("defaults");
        model.coverage = Some(CoverageStamp {
            schema_fingerprint: Uuid::nil(),
            mappings_fingerprint: model.mappings_fingerprint(),
            validated_at: Utc::now(),
        });
        model.push(AdapterMapping::new("a", "b", Category::Body));
        assert!(model.coverage.is_none());
    }
}
