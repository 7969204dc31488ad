//! Default parameter schema
//!
//! Same bucket layout as [`StructuredParameterSchema`](super::StructuredParameterSchema),
//! but holding concrete default values instead of type descriptors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::schema::Category;
use crate::error::AdapterError;

/// Concrete default values for each output bucket
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultParameterSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub headers: Map<String, Value>,
    #[serde(default)]
    pub body: Map<String, Value>,
    #[serde(default)]
    pub query: Map<String, Value>,
    #[serde(default)]
    pub path_parameters: Map<String, Value>,
}

impl DefaultParameterSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults that only seed the body bucket
    pub fn from_body(body: Map<String, Value>) -> Self {
        Self {
            body,
            ..Default::default()
        }
    }

    /// Read defaults from a stored document.
    ///
    /// A document is read per bucket only when it is shaped like a stored
    /// defaults record: every key is a section name (`headers`, `body`, `query`,
    /// `pathParameters`, `id`), `id` is a string, the other sections are objects,
    /// `body` is written as `{ "bodyKind": .., "data": {..} }`, and the record
    /// carries an `id` or such a `body` section. Any other object is taken as
    /// body defaults, so `{"query": "weather"}` seeds the body.
    pub fn from_value(value: Value) -> Result<Self, AdapterError> {
        let Value::Object(mut document) = value else {
            return Err(AdapterError::InvalidParameter(
                "default parameters must be a JSON object".to_string(),
            ));
        };

        if !is_sectioned(&document) {
            return Ok(Self::from_body(document));
        }

        if let Some(Value::Object(section)) = document.get_mut("body") {
            let data = section.remove("data").unwrap_or_default();
            document.insert("body".to_string(), data);
        }
        Ok(serde_json::from_value(Value::Object(document))?)
    }

    /// Defaults of one bucket
    pub fn bucket(&self, category: Category) -> &Map<String, Value> {
        match category {
            Category::Header => &self.headers,
            Category::Body => &self.body,
            Category::Query => &self.query,
            Category::PathParameter => &self.path_parameters,
        }
    }

    pub fn bucket_mut(&mut self, category: Category) -> &mut Map<String, Value> {
        match category {
            Category::Header => &mut self.headers,
            Category::Body => &mut self.body,
            Category::Query => &mut self.query,
            Category::PathParameter => &mut self.path_parameters,
        }
    }

    /// Set one default value
    pub fn with_value(
        mut self,
        category: Category,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.bucket_mut(category).insert(name.into(), value.into());
        self
    }
}

fn is_wrapped_body(value: &Value) -> bool {
    match value {
        Value::Object(section) => {
            section.get("data").is_some_and(Value::is_object)
                && section.keys().all(|key| key == "data" || key == "bodyKind")
        }
        _ => false,
    }
}

fn is_sectioned(document: &Map<String, Value>) -> bool {
    let well_formed = document.iter().all(|(key, value)| match key.as_str() {
        "id" => value.is_string(),
        "body" => is_wrapped_body(value),
        "headers" | "query" | "pathParameters" => value.is_object(),
        _ => false,
    });
    let marked = document.contains_key("id") || document.contains_key("body");
    well_formed && marked && document.keys().any(|key| key != "id")
}

impl From<Map<String, Value>> for DefaultParameterSchema {
    fn from(body: Map<String, Value>) -> Self {
        Self::from_body(body)
    }
}
