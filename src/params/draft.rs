//! List-based schema assembly
//!
//! A [`ParameterSchemaDraft`] keeps every field in the order it was written,
//! repeats included, so the duplicate validator sees names before they are
//! collapsed into the maps of a [`StructuredParameterSchema`].
//!
//! Each category accepts two JSON spellings:
//!
//! ```json
//! { "headers": { "Authorization": { "type": "string", "required": true } } }
//! { "headers": [ { "name": "Authorization", "type": "string", "required": true } ] }
//! ```
//!
//! Repeated object keys are only observable when deserializing from text; a
//! `serde_json::Value` has already dropped them.

use std::fmt;

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use validator::Validate;

use super::duplicates::{self, DuplicateError};
use crate::error::AdapterError;
use crate::types::{
    BodyKind, BodySchema, Category, FieldMap, NamedField, ParameterField,
    StructuredParameterSchema,
};

/// Ordered fields of one category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldList(Vec<NamedField>);

impl FieldList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: NamedField) {
        self.0.push(field);
    }

    pub fn as_slice(&self) -> &[NamedField] {
        &self.0
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|field| field.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn into_map(self) -> FieldMap {
        self.0
            .into_iter()
            .map(|named| (named.name, named.field))
            .collect()
    }
}

impl From<Vec<NamedField>> for FieldList {
    fn from(fields: Vec<NamedField>) -> Self {
        Self(fields)
    }
}

impl FromIterator<NamedField> for FieldList {
    fn from_iter<I: IntoIterator<Item = NamedField>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<&FieldMap> for FieldList {
    fn from(map: &FieldMap) -> Self {
        map.iter()
            .map(|(name, field)| NamedField::new(name.clone(), field.clone()))
            .collect()
    }
}

impl Serialize for FieldList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for named in &self.0 {
            map.serialize_entry(&named.name, &named.field)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldListVisitor;

        impl<'de> Visitor<'de> for FieldListVisitor {
            type Value = FieldList;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to descriptors or a list of named fields")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FieldList, A::Error> {
                let mut fields = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, field)) = access.next_entry::<String, ParameterField>()? {
                    fields.push(NamedField { name, field });
                }
                Ok(FieldList(fields))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<FieldList, A::Error> {
                let mut fields = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(named) = seq.next_element::<NamedField>()? {
                    fields.push(named);
                }
                Ok(FieldList(fields))
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<FieldList, E> {
                Ok(FieldList::default())
            }

            fn visit_none<E: serde::de::Error>(self) -> Result<FieldList, E> {
                Ok(FieldList::default())
            }
        }

        deserializer.deserialize_any(FieldListVisitor)
    }
}

/// Body section of a draft
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyDraft {
    #[serde(default)]
    pub body_kind: Option<BodyKind>,
    #[serde(default)]
    pub data: FieldList,
}

/// Structured parameter schema under construction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSchemaDraft {
    #[serde(default)]
    pub headers: FieldList,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: BodyDraft,
    #[serde(default)]
    pub query: FieldList,
    #[serde(default)]
    pub path_parameters: FieldList,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ParameterSchemaDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, field: ParameterField) -> Self {
        self.add(Category::Header, NamedField::new(name, field));
        self
    }

    pub fn body_field(mut self, name: impl Into<String>, field: ParameterField) -> Self {
        self.add(Category::Body, NamedField::new(name, field));
        self
    }

    pub fn body_kind(mut self, kind: BodyKind) -> Self {
        self.body.body_kind = Some(kind);
        self
    }

    pub fn query(mut self, name: impl Into<String>, field: ParameterField) -> Self {
        self.add(Category::Query, NamedField::new(name, field));
        self
    }

    pub fn path_parameter(mut self, name: impl Into<String>, field: ParameterField) -> Self {
        self.add(Category::PathParameter, NamedField::new(name, field));
        self
    }

    pub fn add(&mut self, category: Category, field: NamedField) {
        self.list_mut(category).push(field);
    }

    pub fn fields(&self, category: Category) -> &[NamedField] {
        match category {
            Category::Header => self.headers.as_slice(),
            Category::Body => self.body.data.as_slice(),
            Category::Query => self.query.as_slice(),
            Category::PathParameter => self.path_parameters.as_slice(),
        }
    }

    fn list_mut(&mut self, category: Category) -> &mut FieldList {
        match category {
            Category::Header => &mut self.headers,
            Category::Body => &mut self.body.data,
            Category::Query => &mut self.query,
            Category::PathParameter => &mut self.path_parameters,
        }
    }

    /// Run the duplicate validator over the draft
    pub fn duplicates(&self) -> Result<(), Vec<DuplicateError>> {
        duplicates::validate_draft(self)
    }

    /// Validate every field and collapse the draft into a schema.
    ///
    /// Field-level problems are reported first; duplicate names are reported
    /// together as [`AdapterError::DuplicateFields`].
    pub fn build(self) -> Result<StructuredParameterSchema, AdapterError> {
        let mut invalid = Vec::new();
        for category in Category::ALL {
            for (index, named) in self.fields(category).iter().enumerate() {
                if let Err(errors) = named.validate() {
                    invalid.push(format!("{}[{index}]: {errors}", category.bucket_name()));
                }
            }
        }
        if !invalid.is_empty() {
            return Err(AdapterError::InvalidParameter(invalid.join("; ")));
        }

        self.duplicates().map_err(AdapterError::DuplicateFields)?;

        if self.body.body_kind.is_none() && !self.body.data.is_empty() {
            tracing::warn!(
                fields = self.body.data.len(),
                "body fields declared without a bodyKind; they will not be required or sent"
            );
        }

        Ok(StructuredParameterSchema {
            headers: self.headers.into_map(),
            body: BodySchema {
                body_kind: self.body.body_kind,
                data: self.body.data.into_map(),
            },
            query: self.query.into_map(),
            path_parameters: self.path_parameters.into_map(),
        })
    }
}

impl TryFrom<ParameterSchemaDraft> for StructuredParameterSchema {
    type Error = AdapterError;

    fn try_from(draft: ParameterSchemaDraft) -> Result<Self, Self::Error> {
        draft.build()
    }
}

impl From<&StructuredParameterSchema> for ParameterSchemaDraft {
    fn from(schema: &StructuredParameterSchema) -> Self {
        Self {
            headers: FieldList::from(&schema.headers),
            body: BodyDraft {
                body_kind: schema.body.body_kind,
                data: FieldList::from(&schema.body.data),
            },
            query: FieldList::from(&schema.query),
            path_parameters: FieldList::from(&schema.path_parameters),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParameterType;

    #[test]
    fn object_form_keeps_repeated_keys() {
        let raw = r#"{
            "headers": {
                "Authorization": {"type": "string", "required": true},
                "Authorization": {"type": "string"}
            }
        }"#;
        let draft: ParameterSchemaDraft = serde_json::from_str(raw).unwrap();
        assert_eq!(draft.headers.len(), 2);
        assert!(draft.duplicates().is_err());
    }

    #[test]
    fn list_form_and_null_body() {
        let raw = r#"{
            "query": [{"name": "limit", "type": "number"}],
            "body": null
        }"#;
        let draft: ParameterSchemaDraft = serde_json::from_str(raw).unwrap();
        assert_eq!(draft.fields(Category::Query)[0].field.r#type, ParameterType::Number);
        assert!(draft.body.body_kind.is_none());
    }

    #[test]
    fn schema_deserialization_rejects_duplicates() {
        let raw = r#"{
            "headers": {"model": {"type": "string"}},
            "query": {"model": {"type": "string"}}
        }"#;
        let err = serde_json::from_str::<StructuredParameterSchema>(raw).unwrap_err();
        assert!(err.to_string().contains("model"));
    }

    #[test]
    fn build_collapses_into_maps() {
        let schema = ParameterSchemaDraft::new()
            .header("Authorization", ParameterField::string().required())
            .body_kind(BodyKind::Json)
            .body_field("prompt", ParameterField::string().required())
            .path_parameter("model", ParameterField::string())
            .build()
            .unwrap();
        assert!(schema.headers["Authorization"].required);
        assert_eq!(schema.body.body_kind, Some(BodyKind::Json));
        assert!(schema.path_parameters.contains_key("model"));
    }

    #[test]
    fn build_rejects_empty_names() {
        let err = ParameterSchemaDraft::new()
            .query("", ParameterField::string())
            .build()
            .unwrap_err();
        assert!(matches!(err, AdapterError::InvalidParameter(msg) if msg.starts_with("query[0]")));
    }

    #[test]
    fn schema_serde_roundtrip_through_draft() {
        let schema = ParameterSchemaDraft::new()
            .body_kind(BodyKind::UrlEncoded)
            .body_field("grant_type", ParameterField::string().required())
            .build()
            .unwrap();
        let json = serde_json::to_string(&schema).unwrap();
        let back: StructuredParameterSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(back, schema);
        assert_eq!(ParameterSchemaDraft::from(&back).body.data.len(), 1);
    }
}
