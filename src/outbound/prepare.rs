//! Dispatch preparation
//!
//! Turns the four buckets of a [`TransformedRequest`] into something an HTTP
//! client can send as-is: a concrete URL, string headers and an encoded body.
//! Nothing here performs I/O.

use std::collections::BTreeMap;

use regex::Captures;
use serde_json::{Map, Value};

use super::credentials::ProviderCredentials;
use super::endpoint::{HttpMethod, PATH_PLACEHOLDER, ProviderEndpoint};
use crate::error::AdapterError;
use crate::transformers::TransformedRequest;
use crate::types::BodyKind;

/// Header names whose values are redacted in `Debug` output
const SENSITIVE_HEADERS: [&str; 4] = ["authorization", "x-api-key", "api-key", "x-goog-api-key"];

#[derive(Debug, Clone, PartialEq)]
pub enum PreparedBody {
    /// The endpoint sends no body
    Empty,
    Json(Value),
    /// multipart/form-data text parts, in order
    Form(Vec<(String, String)>),
    /// application/x-www-form-urlencoded payload
    UrlEncoded(String),
}

impl PreparedBody {
    /// Content type to send, if any.
    ///
    /// Multipart bodies return `None`: the client must add its own boundary.
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::Json(_) => Some("application/json"),
            Self::UrlEncoded(_) => Some("application/x-www-form-urlencoded"),
            Self::Empty | Self::Form(_) => None,
        }
    }

    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// A fully resolved outbound request
#[derive(Clone, PartialEq)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: PreparedBody,
}

impl PreparedRequest {
    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl std::fmt::Debug for PreparedRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let headers: BTreeMap<&str, &str> = self
            .headers
            .iter()
            .map(|(name, value)| {
                let sensitive = SENSITIVE_HEADERS
                    .iter()
                    .any(|candidate| name.eq_ignore_ascii_case(candidate));
                (
                    name.as_str(),
                    if sensitive { "[REDACTED]" } else { value.as_str() },
                )
            })
            .collect();
        f.debug_struct("PreparedRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &headers)
            .field("body", &self.body)
            .finish()
    }
}

/// Resolve a transformed request against its endpoint.
///
/// Every `{name}` placeholder in the endpoint URL must have a path parameter;
/// the first missing one is reported as [`AdapterError::MissingPathParameter`].
/// Credentials, when given, replace any header of the same name.
pub fn prepare(
    endpoint: &ProviderEndpoint,
    request: &TransformedRequest,
    credentials: Option<&ProviderCredentials>,
) -> Result<PreparedRequest, AdapterError> {
    let mut url = render_url(&endpoint.url, &request.path_parameters)?;
    append_query(&mut url, &request.query);

    let mut headers: BTreeMap<String, String> = request
        .headers
        .iter()
        .filter_map(|(name, value)| Some((name.clone(), scalar_text(value)?)))
        .collect();

    let body = encode_body(endpoint.schema.body.body_kind, &request.body);
    if body.is_empty() && !request.body.is_empty() {
        tracing::warn!(
            endpoint = %endpoint.name,
            fields = request.body.len(),
            "endpoint has no body kind; dropping body fields"
        );
    }
    if let Some(content_type) = body.content_type() {
        if !headers
            .keys()
            .any(|name| name.eq_ignore_ascii_case("content-type"))
        {
            headers.insert("Content-Type".to_string(), content_type.to_string());
        }
    }

    if let Some(credentials) = credentials {
        headers.retain(|name, _| !name.eq_ignore_ascii_case(credentials.header_name()));
        headers.insert(
            credentials.header_name().to_string(),
            credentials.header_value(),
        );
    }

    tracing::debug!(
        provider = %endpoint.provider,
        endpoint = %endpoint.name,
        method = %endpoint.method,
        "prepared outbound request"
    );

    Ok(PreparedRequest {
        method: endpoint.method,
        url,
        headers,
        body,
    })
}

fn render_url(template: &str, parameters: &Map<String, Value>) -> Result<String, AdapterError> {
    let mut missing: Option<String> = None;
    let rendered = PATH_PLACEHOLDER.replace_all(template, |caps: &Captures<'_>| {
        let name = &caps[1];
        match parameters.get(name).and_then(scalar_text) {
            Some(value) => urlencoding::encode(&value).into_owned(),
            None => {
                missing.get_or_insert_with(|| name.to_string());
                String::new()
            }
        }
    });

    match missing {
        Some(name) => Err(AdapterError::MissingPathParameter(name)),
        None => Ok(rendered.into_owned()),
    }
}

fn append_query(url: &mut String, query: &Map<String, Value>) {
    let encoded = encode_pairs(&flatten_pairs(query));
    if encoded.is_empty() {
        return;
    }
    url.push(if url.contains('?') { '&' } else { '?' });
    url.push_str(&encoded);
}

fn encode_body(kind: Option<BodyKind>, body: &Map<String, Value>) -> PreparedBody {
    match kind {
        None => PreparedBody::Empty,
        Some(BodyKind::Json) => PreparedBody::Json(Value::Object(body.clone())),
        Some(BodyKind::Form) => PreparedBody::Form(flatten_pairs(body)),
        Some(BodyKind::UrlEncoded) => PreparedBody::UrlEncoded(encode_pairs(&flatten_pairs(body))),
    }
}

/// `key=value` pairs; arrays repeat the key and nulls are dropped
fn flatten_pairs(fields: &Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in fields {
        match value {
            Value::Array(items) => pairs.extend(
                items
                    .iter()
                    .filter_map(scalar_text)
                    .map(|text| (key.clone(), text)),
            ),
            other => {
                if let Some(text) = scalar_text(other) {
                    pairs.push((key.clone(), text));
                }
            }
        }
    }
    pairs
}

fn encode_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Text form of a value; objects and arrays become compact JSON
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(_) | Value::Number(_) => Some(value.to_string()),
        Value::Array(_) | Value::Object(_) => serde_json::to_string(value).ok(),
    }
}
