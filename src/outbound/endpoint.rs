//! Provider endpoint descriptor

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::AdapterError;
use crate::types::StructuredParameterSchema;

lazy_static! {
    /// `{name}` placeholders in an endpoint URL template
    pub(crate) static ref PATH_PLACEHOLDER: Regex =
        Regex::new(r"\{([A-Za-z0-9_.\-]+)\}").expect("placeholder pattern is valid");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    #[default]
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One externally callable operation of a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProviderEndpoint {
    #[serde(default = "new_endpoint_id")]
    pub id: String,

    /// Provider id, e.g. `openai`
    #[validate(length(min = 1))]
    pub provider: String,

    #[validate(length(min = 1))]
    pub name: String,

    #[serde(default)]
    pub method: HttpMethod,

    /// Absolute URL; `{name}` segments are filled from path parameters
    #[validate(custom(function = "validate_url_template"))]
    pub url: String,

    #[serde(default)]
    pub schema: StructuredParameterSchema,
}

fn new_endpoint_id() -> String {
    Uuid::new_v4().to_string()
}

fn validate_url_template(url: &str) -> Result<(), ValidationError> {
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(())
    } else {
        Err(ValidationError::new("url_template")
            .with_message("endpoint URL must be absolute http(s)".into()))
    }
}

impl ProviderEndpoint {
    pub fn new(
        provider: impl Into<String>,
        name: impl Into<String>,
        method: HttpMethod,
        url: impl Into<String>,
        schema: StructuredParameterSchema,
    ) -> Self {
        Self {
            id: new_endpoint_id(),
            provider: provider.into(),
            name: name.into(),
            method,
            url: url.into(),
            schema,
        }
    }

    /// Placeholder names in the URL template, in order of appearance
    pub fn path_placeholders(&self) -> Vec<String> {
        PATH_PLACEHOLDER
            .captures_iter(&self.url)
            .map(|caps| caps[1].to_string())
            .collect()
    }

    /// Check the descriptor and that every URL placeholder is a declared path parameter
    pub fn validate_definition(&self) -> Result<(), AdapterError> {
        let mut problems = Vec::new();
        if let Err(errors) = self.validate() {
            problems.push(errors.to_string());
        }
        for placeholder in self.path_placeholders() {
            if !self.schema.path_parameters.contains_key(&placeholder) {
                problems.push(format!(
                    "URL placeholder '{{{placeholder}}}' is not a declared path parameter"
                ));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(AdapterError::InvalidParameter(problems.join("; ")))
        }
    }
}
