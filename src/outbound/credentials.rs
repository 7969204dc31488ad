//! Provider credentials
//!
//! The API key is held as a [`SecretString`] so it never shows up in `Debug`
//! output or logs. It is only exposed when the authentication header value is
//! rendered for a prepared request.

use secrecy::{ExposeSecret, SecretString};

use crate::error::AdapterError;

/// Authentication header for one provider
#[derive(Debug)]
pub struct ProviderCredentials {
    header: String,
    scheme: Option<String>,
    api_key: SecretString,
}

impl ProviderCredentials {
    /// `Authorization: Bearer <key>`
    pub fn bearer(api_key: impl Into<String>) -> Self {
        Self {
            header: "Authorization".to_string(),
            scheme: Some("Bearer".to_string()),
            api_key: SecretString::from(api_key.into()),
        }
    }

    /// Raw key in a custom header, e.g. `x-api-key: <key>`
    pub fn header(header: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            scheme: None,
            api_key: SecretString::from(api_key.into()),
        }
    }

    /// Read the key from environment variable `var`
    pub fn from_env(var: &str, header: &str, scheme: Option<&str>) -> Result<Self, AdapterError> {
        let api_key = std::env::var(var)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                AdapterError::ConfigurationError(format!("environment variable {var} is not set"))
            })?;
        Ok(Self {
            header: header.to_string(),
            scheme: scheme.map(str::to_string),
            api_key: SecretString::from(api_key.trim().to_string()),
        })
    }

    pub fn header_name(&self) -> &str {
        &self.header
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    pub(crate) fn header_value(&self) -> String {
        match &self.scheme {
            Some(scheme) => format!("{scheme} {}", self.api_key.expose_secret()),
            None => self.api_key.expose_secret().to_string(),
        }
    }
}
