//! Request transformation
//!
//! Converts a canonical caller request into the four provider-specific
//! buckets (headers, body, query, path parameters) by applying an adapter's
//! mapping entries on top of default values.
//!
//! The transformer is best-effort: missing sources, malformed paths, failed
//! conversions and unwritable destinations all degrade to "this entry
//! contributes nothing". It never returns an error and does not re-check
//! coverage or duplicates; run the validators in `params` first.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::{Map, Value};

use super::json_path;
use crate::config::TransformOptions;
use crate::types::{AdapterMappingModel, Category, DefaultParameterSchema};

/// Provider-shaped request buckets, ready for an HTTP client
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformedRequest {
    pub headers: Map<String, Value>,
    pub body: Map<String, Value>,
    pub query: Map<String, Value>,
    pub path_parameters: Map<String, Value>,
}

impl TransformedRequest {
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
}

/// Transform a canonical request into a provider-specific request
pub trait RequestTransformer: Send + Sync {
    /// Identifier used in logs (usually the adapter id)
    fn adapter_id(&self) -> &str;

    /// Build the outbound buckets for one caller request
    fn transform(&self, caller_request: &Value) -> TransformedRequest;
}

/// [`RequestTransformer`] backed by an adapter mapping model and its defaults
#[derive(Debug, Clone)]
pub struct AdapterRequestTransformer {
    mapping: AdapterMappingModel,
    defaults: DefaultParameterSchema,
    options: TransformOptions,
}

impl AdapterRequestTransformer {
    pub fn new(mapping: AdapterMappingModel, defaults: DefaultParameterSchema) -> Self {
        Self {
            mapping,
            defaults,
            options: TransformOptions::default(),
        }
    }

    pub fn with_options(mut self, options: TransformOptions) -> Self {
        self.options = options;
        self
    }

    pub fn mapping(&self) -> &AdapterMappingModel {
        &self.mapping
    }

    pub fn defaults(&self) -> &DefaultParameterSchema {
        &self.defaults
    }

    pub fn options(&self) -> &TransformOptions {
        &self.options
    }
}

impl RequestTransformer for AdapterRequestTransformer {
    fn adapter_id(&self) -> &str {
        &self.mapping.id
    }

    fn transform(&self, caller_request: &Value) -> TransformedRequest {
        transform_with(caller_request, &self.mapping, &self.defaults, &self.options)
    }
}

/// Transform with default [`TransformOptions`]
pub fn transform(
    caller_request: &Value,
    mapping: &AdapterMappingModel,
    defaults: &DefaultParameterSchema,
) -> TransformedRequest {
    transform_with(
        caller_request,
        mapping,
        defaults,
        &TransformOptions::default(),
    )
}

/// Transform a caller request.
///
/// 1. Every bucket starts as a deep copy of its defaults.
/// 2. Each mapping entry whose source resolves (including `0`, `false`, `""`)
///    writes its (optionally transformed) value at its destination, creating
///    intermediate objects.
/// 3. An entry whose source is absent contributes nothing; the default stays.
/// 4. With `passthrough_unmapped`, caller top-level keys not read by any entry
///    are copied into the body verbatim. They override body defaults but not
///    values written by mapping entries in step 2.
pub fn transform_with(
    caller_request: &Value,
    mapping: &AdapterMappingModel,
    defaults: &DefaultParameterSchema,
    options: &TransformOptions,
) -> TransformedRequest {
    let mut buckets = Category::ALL.map(|category| Value::Object(defaults.bucket(category).clone()));
    let mut consumed: HashSet<String> = HashSet::new();
    let mut mapped_body_keys: HashSet<String> = HashSet::new();

    for entry in &mapping.mappings {
        if let Some(root) = entry.source_root() {
            consumed.insert(root);
        }

        let Some(source) = json_path::get_path(caller_request, &entry.from_field) else {
            tracing::debug!(
                adapter = %mapping.id,
                from = %entry.from_field,
                "source field absent; keeping default"
            );
            continue;
        };
        if source.is_null() && options.skip_null_values {
            continue;
        }

        let value = match (&entry.transformation, options.apply_transformations) {
            (Some(transformation), true) => {
                if !transformation.is_known() {
                    tracing::warn!(
                        adapter = %mapping.id,
                        tag = %transformation,
                        "unknown transformation; passing value through"
                    );
                }
                match transformation.apply(source.clone()) {
                    Some(value) => value,
                    None => {
                        tracing::debug!(
                            adapter = %mapping.id,
                            from = %entry.from_field,
                            tag = %transformation,
                            "transformation failed; skipping entry"
                        );
                        continue;
                    }
                }
            }
            _ => source.clone(),
        };

        let destination = entry.destination();
        let bucket = &mut buckets[bucket_index(entry.to_category)];
        if json_path::set_path(bucket, destination, value) {
            if entry.to_category == Category::Body {
                if let Some(root) = json_path::root_key(destination) {
                    mapped_body_keys.insert(root);
                }
            }
        } else {
            tracing::debug!(
                adapter = %mapping.id,
                to = %entry.to_field,
                bucket = entry.to_category.bucket_name(),
                "destination not writable; skipping entry"
            );
        }
    }

    if options.passthrough_unmapped {
        if let (Value::Object(fields), Value::Object(body)) =
            (caller_request, &mut buckets[bucket_index(Category::Body)])
        {
            for (key, value) in fields {
                if consumed.contains(key) || mapped_body_keys.contains(key) {
                    continue;
                }
                body.insert(key.clone(), value.clone());
            }
        }
    }

    let [headers, body, query, path_parameters] = buckets.map(into_map);
    TransformedRequest {
        headers,
        body,
        query,
        path_parameters,
    }
}

const fn bucket_index(category: Category) -> usize {
    match category {
        Category::Header => 0,
        Category::Body => 1,
        Category::Query => 2,
        Category::PathParameter => 3,
    }
}

fn into_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AdapterMapping;
    use serde_json::json;
    use tracing_test::traced_test;

    fn model(mappings: Vec<AdapterMapping>) -> AdapterMappingModel {
        mappings
            .into_iter()
            .fold(AdapterMappingModel::new("defaults").with_id("chat"), |m, e| {
                m.with_mapping(e)
            })
    }

    #[test]
    fn renames_and_passes_through() {
        let caller = json!({"model": "gpt-4", "prompt": "hi"});
        let mapping = model(vec![AdapterMapping::new(
            "model",
            "body.model_name",
            Category::Body,
        )]);
        let defaults = DefaultParameterSchema::from_value(json!({"temperature": 0.7})).unwrap();

        let out = transform(&caller, &mapping, &defaults);
        assert_eq!(
            Value::Object(out.body),
            json!({"temperature": 0.7, "model_name": "gpt-4", "prompt": "hi"})
        );
        assert!(out.headers.is_empty());
    }

    #[test]
    fn falsy_values_are_present() {
        let caller = json!({"n": 0, "stream": false, "stop": ""});
        let mapping = model(vec![
            AdapterMapping::new("n", "candidate_count", Category::Body),
            AdapterMapping::new("stream", "stream", Category::Query),
            AdapterMapping::new("stop", "stop_sequence", Category::Body),
        ]);
        let defaults = DefaultParameterSchema::new()
            .with_value(Category::Body, "candidate_count", 4)
            .with_value(Category::Query, "stream", true);

        let out = transform(&caller, &mapping, &defaults);
        assert_eq!(out.body["candidate_count"], json!(0));
        assert_eq!(out.body["stop_sequence"], json!(""));
        assert_eq!(out.query["stream"], json!(false));
    }

    #[test]
    fn absent_source_keeps_default() {
        let mapping = model(vec![AdapterMapping::new(
            "temperature",
            "temperature",
            Category::Body,
        )]);
        let defaults = DefaultParameterSchema::new().with_value(Category::Body, "temperature", 1.0);
        let out = transform(&json!({}), &mapping, &defaults);
        assert_eq!(out.body["temperature"], json!(1.0));
    }

    #[test]
    fn nested_sources_and_destinations() {
        let caller = json!({"messages": [{"role": "user", "content": "hello"}]});
        let mapping = model(vec![AdapterMapping::new(
            "messages[0].content",
            "input.text",
            Category::Body,
        )]);
        let out = transform(&caller, &mapping, &DefaultParameterSchema::new());
        assert_eq!(out.body["input"], json!({"text": "hello"}));
        // `messages` was read by a mapping entry, so it is not passed through
        assert!(!out.body.contains_key("messages"));
    }

    #[test]
    fn caller_passthrough_overrides_defaults_but_not_mapped_values() {
        let caller = json!({"temperature": 0.2, "model": "a", "model_name": "b"});
        let mapping = model(vec![AdapterMapping::new("model", "model_name", Category::Body)]);
        let defaults = DefaultParameterSchema::new().with_value(Category::Body, "temperature", 0.7);

        let out = transform(&caller, &mapping, &defaults);
        assert_eq!(out.body["temperature"], json!(0.2));
        assert_eq!(out.body["model_name"], json!("a"));
    }

    #[test]
    fn passthrough_can_be_disabled() {
        let caller = json!({"model": "gpt-4", "prompt": "hi"});
        let mapping = model(vec![AdapterMapping::new("model", "model", Category::Body)]);
        let options = TransformOptions::default().with_passthrough_unmapped(false);
        let out = transform_with(&caller, &mapping, &DefaultParameterSchema::new(), &options);
        assert_eq!(Value::Object(out.body), json!({"model": "gpt-4"}));
    }

    #[test]
    fn null_sources_follow_options() {
        let caller = json!({"seed": null});
        let mapping = model(vec![AdapterMapping::new("seed", "seed", Category::Body)]);
        let defaults = DefaultParameterSchema::new().with_value(Category::Body, "seed", 7);

        let out = transform(&caller, &mapping, &defaults);
        assert_eq!(out.body["seed"], Value::Null);

        let options = TransformOptions::default().with_skip_null_values(true);
        let out = transform_with(&caller, &mapping, &defaults, &options);
        assert_eq!(out.body["seed"], json!(7));
    }

    #[test]
    fn transformations_apply_and_fail_softly() {
        let caller = json!({"max": "256", "temp": "warm"});
        let mapping = model(vec![
            AdapterMapping::new("max", "max_tokens", Category::Body).with_transformation("toNumber"),
            AdapterMapping::new("temp", "temperature", Category::Body)
                .with_transformation("toNumber"),
        ]);
        let defaults = DefaultParameterSchema::new().with_value(Category::Body, "temperature", 0.5);
        let out = transform(&caller, &mapping, &defaults);
        assert_eq!(out.body["max_tokens"], json!(256));
        assert_eq!(out.body["temperature"], json!(0.5));
    }

    #[test]
    fn unwritable_destination_is_skipped() {
        let caller = json!({"x": 1});
        let mapping = model(vec![AdapterMapping::new("x", "options.seed", Category::Body)]);
        let defaults = DefaultParameterSchema::new().with_value(Category::Body, "options", "fixed");
        let out = transform(&caller, &mapping, &defaults);
        assert_eq!(out.body["options"], json!("fixed"));
    }

    #[test]
    fn writes_every_bucket() {
        let caller = json!({"key": "sk-1", "id": "m-1", "version": "2"});
        let mapping = model(vec![
            AdapterMapping::new("key", "headers.x-api-key", Category::Header),
            AdapterMapping::new("id", "model_id", Category::PathParameter),
            AdapterMapping::new("version", "api-version", Category::Query),
        ]);
        let out = transform(&caller, &mapping, &DefaultParameterSchema::new());
        assert_eq!(out.headers["x-api-key"], json!("sk-1"));
        assert_eq!(out.path_parameters["model_id"], json!("m-1"));
        assert_eq!(out.query["api-version"], json!("2"));
        assert!(out.body.is_empty());
    }

    #[test]
    #[traced_test]
    fn unknown_transformation_is_logged() {
        let caller = json!({"a": "x"});
        let mapping = model(vec![
            AdapterMapping::new("a", "a", Category::Body).with_transformation("rot13"),
        ]);
        let transformer = AdapterRequestTransformer::new(mapping, DefaultParameterSchema::new());
        let out = transformer.transform(&caller);
        assert_eq!(out.body["a"], json!("x"));
        assert!(logs_contain("unknown transformation"));
    }
}
