//! Structured parameter schema of a provider endpoint

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::field::ParameterField;

/// The four request categories (and output buckets) a field can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "header", alias = "headers")]
    Header,
    #[serde(rename = "body")]
    Body,
    #[serde(rename = "query")]
    Query,
    #[serde(rename = "parameter", alias = "pathParameters", alias = "path")]
    PathParameter,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Header,
        Category::Body,
        Category::Query,
        Category::PathParameter,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Body => "body",
            Self::Query => "query",
            Self::PathParameter => "parameter",
        }
    }

    /// Name of the schema section / output bucket
    pub const fn bucket_name(&self) -> &'static str {
        match self {
            Self::Header => "headers",
            Self::Body => "body",
            Self::Query => "query",
            Self::PathParameter => "pathParameters",
        }
    }

    /// Prefix used when rendering a [`FieldPath`](super::FieldPath)
    pub const fn path_prefix(&self) -> &'static str {
        match self {
            Self::Header => "headers",
            Self::Body => "body.data",
            Self::Query => "query",
            Self::PathParameter => "pathParameters",
        }
    }

    /// Leading segments that may redundantly name this bucket in a destination path.
    ///
    /// Longer aliases come first so `body.data.x` strips to `x`, not `data.x`.
    const fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Header => &["headers", "header"],
            Self::Body => &["body.data", "body"],
            Self::Query => &["query"],
            Self::PathParameter => &[
                "pathParameters",
                "pathParameter",
                "parameters",
                "parameter",
                "params",
            ],
        }
    }

    /// Strip a leading bucket alias (`body.`, `headers.`, ...) from a destination path
    pub fn strip_bucket_prefix<'a>(&self, path: &'a str) -> &'a str {
        for alias in self.aliases() {
            if let Some(rest) = path.strip_prefix(alias) {
                if let Some(rest) = rest.strip_prefix('.') {
                    return rest;
                }
            }
        }
        path
    }

    /// Resolve a rendered path prefix (`headers`, `body.data`, ...) back to its category
    pub fn from_path(path: &str) -> Option<(Category, &str)> {
        Self::ALL.into_iter().find_map(|category| {
            category
                .aliases()
                .iter()
                .find_map(|alias| path.strip_prefix(alias)?.strip_prefix('.'))
                .map(|rest| (category, rest))
        })
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire encoding of the request body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    #[serde(rename = "json")]
    Json,
    /// multipart/form-data
    #[serde(rename = "form")]
    Form,
    #[serde(rename = "url-encoded", alias = "urlencoded")]
    UrlEncoded,
}

/// Named fields of one category, ordered by name
pub type FieldMap = BTreeMap<String, ParameterField>;

/// Body section: encoding plus field descriptors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodySchema {
    #[serde(default)]
    pub body_kind: Option<BodyKind>,
    #[serde(default)]
    pub data: FieldMap,
}

/// Expected request shape of one provider endpoint.
///
/// Field names are unique within each category by construction. Uniqueness
/// across categories is established when the schema is assembled from a
/// [`ParameterSchemaDraft`](crate::params::ParameterSchemaDraft); deserialization
/// goes through the draft so repeated keys are caught before they collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    try_from = "crate::params::draft::ParameterSchemaDraft"
)]
pub struct StructuredParameterSchema {
    pub headers: FieldMap,
    pub body: BodySchema,
    pub query: FieldMap,
    pub path_parameters: FieldMap,
}

impl StructuredParameterSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fields of a category
    pub fn fields(&self, category: Category) -> &FieldMap {
        match category {
            Category::Header => &self.headers,
            Category::Body => &self.body.data,
            Category::Query => &self.query,
            Category::PathParameter => &self.path_parameters,
        }
    }

    pub fn field(&self, category: Category, name: &str) -> Option<&ParameterField> {
        self.fields(category).get(name)
    }

    /// Whether the endpoint sends a body at all
    pub fn has_body(&self) -> bool {
        self.body.body_kind.is_some()
    }

    /// Iterate `(category, name, field)` over every category
    pub fn iter_fields(&self) -> impl Iterator<Item = (Category, &str, &ParameterField)> {
        Category::ALL.into_iter().flat_map(move |category| {
            self.fields(category)
                .iter()
                .map(move |(name, field)| (category, name.as_str(), field))
        })
    }

    pub fn is_empty(&self) -> bool {
        Category::ALL
            .iter()
            .all(|category| self.fields(*category).is_empty())
    }

    /// Content fingerprint; changes whenever any field, flag or the body kind changes
    pub fn fingerprint(&self) -> Uuid {
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        Uuid::new_v5(&Uuid::NAMESPACE_OID, &bytes)
    }
}
