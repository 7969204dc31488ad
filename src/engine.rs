//! Parameter Adapter Engine
//!
//! [`ParameterAdapter`] ties the pieces together in the order an operator and
//! a dispatcher use them:
//!
//! 1. `validate_schema` - assemble a provider endpoint schema, rejecting duplicates
//! 2. `certify` - prove an adapter covers every required field of that schema
//! 3. `transform` - build the provider-shaped buckets for a caller request
//! 4. `prepare_dispatch` - all of the above gated on a current certification,
//!    resolved into a [`PreparedRequest`]
//!
//! The engine holds no entities; every call works on the values it is given.

use serde_json::Value;

use crate::config::TransformOptions;
use crate::error::AdapterError;
use crate::outbound::{self, PreparedRequest, ProviderCredentials, ProviderEndpoint};
use crate::params::{self, ParameterSchemaDraft};
use crate::transformers::{self, AdapterRequestTransformer, TransformedRequest};
use crate::types::{
    AdapterMappingModel, CoverageStamp, DefaultParameterSchema, FieldPath,
    StructuredParameterSchema,
};

/// Stateless entry point for schema validation, coverage and transformation
#[derive(Debug, Clone, Default)]
pub struct ParameterAdapter {
    options: TransformOptions,
}

impl ParameterAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine configured from `PARAM_ADAPTER_*` environment variables
    pub fn from_env() -> Result<Self, AdapterError> {
        Ok(Self::new().with_options(TransformOptions::from_env()?))
    }

    pub fn with_options(mut self, options: TransformOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Assemble a schema from its draft; all duplicate errors are reported together
    pub fn validate_schema(
        &self,
        draft: ParameterSchemaDraft,
    ) -> Result<StructuredParameterSchema, AdapterError> {
        draft.build()
    }

    /// Re-check an already assembled schema (e.g. one edited in place)
    pub fn revalidate_schema(&self, schema: &StructuredParameterSchema) -> Result<(), AdapterError> {
        params::validate(schema).map_err(AdapterError::DuplicateFields)
    }

    pub fn required_fields(&self, schema: &StructuredParameterSchema) -> Vec<FieldPath> {
        params::extract_required(schema)
    }

    pub fn check_coverage(
        &self,
        schema: &StructuredParameterSchema,
        mapping: &AdapterMappingModel,
    ) -> Result<(), AdapterError> {
        params::check_schema_coverage(schema, mapping)
    }

    /// Validate the mapping definition and its coverage, then stamp it usable
    pub fn certify(
        &self,
        mapping: &mut AdapterMappingModel,
        schema: &StructuredParameterSchema,
    ) -> Result<CoverageStamp, AdapterError> {
        if let Err(err) = mapping.validate_definition() {
            mapping.coverage = None;
            return Err(err);
        }
        params::certify(mapping, schema)
    }

    pub fn transform(
        &self,
        caller_request: &Value,
        mapping: &AdapterMappingModel,
        defaults: &DefaultParameterSchema,
    ) -> TransformedRequest {
        transformers::transform_with(caller_request, mapping, defaults, &self.options)
    }

    /// Reusable transformer bound to one adapter
    pub fn transformer(
        &self,
        mapping: AdapterMappingModel,
        defaults: DefaultParameterSchema,
    ) -> AdapterRequestTransformer {
        AdapterRequestTransformer::new(mapping, defaults).with_options(self.options.clone())
    }

    /// Transform and resolve a caller request for `endpoint`.
    ///
    /// The mapping must carry a certification that still matches both the
    /// endpoint schema and its own entries.
    pub fn prepare_dispatch(
        &self,
        endpoint: &ProviderEndpoint,
        mapping: &AdapterMappingModel,
        defaults: &DefaultParameterSchema,
        caller_request: &Value,
        credentials: Option<&ProviderCredentials>,
    ) -> Result<PreparedRequest, AdapterError> {
        if !mapping.is_usable_for(&endpoint.schema) {
            tracing::debug!(
                adapter = %mapping.id,
                endpoint = %endpoint.name,
                stamped = mapping.coverage.is_some(),
                "adapter is not certified for this endpoint schema"
            );
            return Err(AdapterError::NotCertified {
                mapping: mapping.id.clone(),
            });
        }

        let transformed = self.transform(caller_request, mapping, defaults);
        outbound::prepare(endpoint, &transformed, credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outbound::{HttpMethod, PreparedBody};
    use crate::types::{AdapterMapping, BodyKind, Category, ParameterField};
    use serde_json::json;

    fn endpoint() -> ProviderEndpoint {
        let schema = ParameterAdapter::new()
            .validate_schema(
                ParameterSchemaDraft::new()
                    .body_kind(BodyKind::Json)
                    .body_field("model", ParameterField::string().required())
                    .body_field("max_tokens", ParameterField::number()),
            )
            .unwrap();
        ProviderEndpoint::new(
            "anthropic",
            "messages",
            HttpMethod::Post,
            "https://api.anthropic.com/v1/messages",
            schema,
        )
    }

    fn mapping() -> AdapterMappingModel {
        AdapterMappingModel::new("chat-defaults")
            .with_id("anthropic-messages")
            .with_mapping(AdapterMapping::new("model", "model", Category::Body))
    }

    #[test]
    fn dispatch_requires_certification() {
        let engine = ParameterAdapter::new();
        let endpoint = endpoint();
        let mut mapping = mapping();
        let caller = json!({"model": "claude", "max_tokens": 16});

        let err = engine
            .prepare_dispatch(&endpoint, &mapping, &DefaultParameterSchema::new(), &caller, None)
            .unwrap_err();
        assert_eq!(
            err,
            AdapterError::NotCertified {
                mapping: "anthropic-messages".into()
            }
        );

        engine.certify(&mut mapping, &endpoint.schema).unwrap();
        let prepared = engine
            .prepare_dispatch(&endpoint, &mapping, &DefaultParameterSchema::new(), &caller, None)
            .unwrap();
        assert_eq!(
            prepared.body,
            PreparedBody::Json(json!({"model": "claude", "max_tokens": 16}))
        );
    }

    #[test]
    fn certify_rejects_bad_definitions() {
        let engine = ParameterAdapter::new();
        let mut mapping = mapping().with_mapping(
            AdapterMapping::new("x", "x", Category::Body).with_transformation("reverse"),
        );
        let err = engine.certify(&mut mapping, &endpoint().schema).unwrap_err();
        assert!(matches!(err, AdapterError::InvalidMapping(_)));
        assert!(mapping.coverage.is_none());
    }

    #[test]
    fn options_flow_into_transformers() {
        let engine =
            ParameterAdapter::new().with_options(TransformOptions::new().with_passthrough_unmapped(false));
        let out = engine.transform(
            &json!({"model": "m", "extra": 1}),
            &mapping(),
            &DefaultParameterSchema::new(),
        );
        assert!(!out.body.contains_key("extra"));

        let transformer = engine.transformer(mapping(), DefaultParameterSchema::new());
        assert!(!transformer.options().passthrough_unmapped);
    }
}
