//! Category-qualified field paths

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::schema::Category;

/// A field of a structured schema, addressed as `<bucket prefix>.<name>`.
///
/// Rendered as `headers.Authorization`, `body.data.prompt`, `query.limit` or
/// `pathParameters.id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath {
    category: Category,
    name: String,
}

impl FieldPath {
    pub fn new(category: Category, name: impl Into<String>) -> Self {
        Self {
            category,
            name: name.into(),
        }
    }

    pub const fn category(&self) -> Category {
        self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parse a rendered path such as `body.data.prompt`
    pub fn parse(path: &str) -> Option<Self> {
        let (category, name) = Category::from_path(path)?;
        if name.is_empty() {
            return None;
        }
        Some(Self::new(category, name))
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.category.path_prefix(), self.name)
    }
}

impl PartialEq<str> for FieldPath {
    fn eq(&self, other: &str) -> bool {
        FieldPath::parse(other).is_some_and(|parsed| &parsed == self)
    }
}

impl PartialEq<&str> for FieldPath {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        FieldPath::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid field path '{raw}'")))
    }
}
