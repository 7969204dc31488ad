//! Transformer configuration

use serde::{Deserialize, Serialize};

use crate::error::AdapterError;

pub const ENV_PASSTHROUGH_UNMAPPED: &str = "PARAM_ADAPTER_PASSTHROUGH_UNMAPPED";
pub const ENV_SKIP_NULL_VALUES: &str = "PARAM_ADAPTER_SKIP_NULL_VALUES";
pub const ENV_APPLY_TRANSFORMATIONS: &str = "PARAM_ADAPTER_APPLY_TRANSFORMATIONS";

/// Options controlling the request transformer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransformOptions {
    /// Copy caller keys no mapping reads from into the body bucket verbatim
    pub passthrough_unmapped: bool,
    /// Treat a JSON `null` source value as absent
    pub skip_null_values: bool,
    /// Run the transformation tag attached to a mapping entry
    pub apply_transformations: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            passthrough_unmapped: true,
            skip_null_values: false,
            apply_transformations: true,
        }
    }
}

impl TransformOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn with_passthrough_unmapped(mut self, enabled: bool) -> Self {
        self.passthrough_unmapped = enabled;
        self
    }

    pub const fn with_skip_null_values(mut self, enabled: bool) -> Self {
        self.skip_null_values = enabled;
        self
    }

    pub const fn with_apply_transformations(mut self, enabled: bool) -> Self {
        self.apply_transformations = enabled;
        self
    }

    /// Parse options from JSON; omitted keys keep their defaults
    pub fn from_json(raw: &str) -> Result<Self, AdapterError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Defaults overridden by `PARAM_ADAPTER_*` environment variables
    pub fn from_env() -> Result<Self, AdapterError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AdapterError> {
        let mut options = Self::default();
        if let Some(raw) = lookup(ENV_PASSTHROUGH_UNMAPPED) {
            options.passthrough_unmapped = parse_flag(ENV_PASSTHROUGH_UNMAPPED, &raw)?;
        }
        if let Some(raw) = lookup(ENV_SKIP_NULL_VALUES) {
            options.skip_null_values = parse_flag(ENV_SKIP_NULL_VALUES, &raw)?;
        }
        if let Some(raw) = lookup(ENV_APPLY_TRANSFORMATIONS) {
            options.apply_transformations = parse_flag(ENV_APPLY_TRANSFORMATIONS, &raw)?;
        }
        Ok(options)
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, AdapterError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AdapterError::ConfigurationError(format!(
            "{key} must be a boolean flag, got '{other}'"
        ))),
    }
}
