//! Parameter field descriptors

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Primitive type tag of a provider parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    String,
    Number,
    Boolean,
    /// Arbitrary JSON document (object, array or scalar)
    Json,
    Array,
    Object,
    #[default]
    Any,
}

impl ParameterType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Json => "json",
            Self::Array => "array",
            Self::Object => "object",
            Self::Any => "any",
        }
    }

    /// JSON Schema `type` keyword for this tag; `None` when the tag does not constrain the value
    pub const fn json_schema_type(&self) -> Option<&'static str> {
        match self {
            Self::String => Some("string"),
            Self::Number => Some("number"),
            Self::Boolean => Some("boolean"),
            Self::Array => Some("array"),
            Self::Object => Some("object"),
            Self::Json | Self::Any => None,
        }
    }
}

impl std::fmt::Display for ParameterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named input of a provider endpoint
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ParameterField {
    #[serde(rename = "type", default)]
    pub r#type: ParameterType,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 512))]
    pub placeholder: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 4096))]
    pub description: Option<String>,
}

impl ParameterField {
    pub fn new(r#type: ParameterType) -> Self {
        Self {
            r#type,
            ..Default::default()
        }
    }

    pub fn string() -> Self {
        Self::new(ParameterType::String)
    }

    pub fn number() -> Self {
        Self::new(ParameterType::Number)
    }

    pub fn boolean() -> Self {
        Self::new(ParameterType::Boolean)
    }

    pub fn json() -> Self {
        Self::new(ParameterType::Json)
    }

    pub fn array() -> Self {
        Self::new(ParameterType::Array)
    }

    pub fn object() -> Self {
        Self::new(ParameterType::Object)
    }

    pub fn any() -> Self {
        Self::new(ParameterType::Any)
    }

    /// Mark the field as required
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A parameter field together with its name, as written in list-based definitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NamedField {
    #[validate(length(min = 1, max = 256))]
    pub name: String,

    #[serde(flatten)]
    #[validate(nested)]
    pub field: ParameterField,
}

impl NamedField {
    pub fn new(name: impl Into<String>, field: ParameterField) -> Self {
        Self {
            name: name.into(),
            field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_type_tag_and_defaults() {
        let field: ParameterField =
            serde_json::from_str(r#"{"type":"number","placeholder":"0.7"}"#).unwrap();
        assert_eq!(field.r#type, ParameterType::Number);
        assert!(!field.required);
        assert_eq!(field.placeholder.as_deref(), Some("0.7"));

        let any: ParameterField = serde_json::from_str("{}").unwrap();
        assert_eq!(any.r#type, ParameterType::Any);
    }

    #[test]
    fn rejects_unknown_type_tag() {
        let parsed = serde_json::from_str::<ParameterField>(r#"{"type":"mixed"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn named_field_flattens_descriptor() {
        let named: NamedField =
            serde_json::from_str(r#"{"name":"prompt","type":"string","required":true}"#).unwrap();
        assert_eq!(named.name, "prompt");
        assert!(named.field.required);
        assert!(named.validate().is_ok());
    }

    #[test]
    fn json_schema_type_for_open_tags() {
        assert_eq!(ParameterType::Json.json_schema_type(), None);
        assert_eq!(ParameterType::Any.json_schema_type(), None);
        assert_eq!(ParameterType::Array.json_schema_type(), Some("array"));
    }
}
