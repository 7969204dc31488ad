//! Duplicate field name validation
//!
//! A field name may appear once per category and in at most one category.
//! Both checks run in full and every violation is returned together; an empty
//! result means the schema is accepted. Names are compared exactly
//! (case-sensitive).

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use thiserror::Error;

use super::draft::ParameterSchemaDraft;
use crate::types::{Category, StructuredParameterSchema};

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DuplicateError {
    /// The same name was declared more than once in one category
    #[error("field `{name}` is declared more than once in {category}")]
    #[serde(rename_all = "camelCase")]
    WithinCategory { category: Category, name: String },

    /// The same name is declared in several categories
    #[error("field `{name}` appears in multiple categories: {}", join_categories(.categories))]
    #[serde(rename_all = "camelCase")]
    AcrossCategories {
        categories: Vec<Category>,
        name: String,
    },
}

impl DuplicateError {
    pub fn name(&self) -> &str {
        match self {
            Self::WithinCategory { name, .. } | Self::AcrossCategories { name, .. } => name,
        }
    }
}

fn join_categories(categories: &[Category]) -> String {
    categories
        .iter()
        .map(Category::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validate an assembled schema.
///
/// Map keys are unique per category, so only cross-category duplicates can be
/// found here; use [`validate_draft`] while fields are still a list.
pub fn validate(schema: &StructuredParameterSchema) -> Result<(), Vec<DuplicateError>> {
    find_duplicates(Category::ALL.into_iter().map(|category| {
        (
            category,
            schema
                .fields(category)
                .keys()
                .map(String::as_str)
                .collect::<Vec<_>>(),
        )
    }))
}

/// Validate a list-based draft, including repeats within one category
pub fn validate_draft(draft: &ParameterSchemaDraft) -> Result<(), Vec<DuplicateError>> {
    find_duplicates(Category::ALL.into_iter().map(|category| {
        (
            category,
            draft
                .fields(category)
                .iter()
                .map(|field| field.name.as_str())
                .collect::<Vec<_>>(),
        )
    }))
}

/// Core check over `(category, names in declaration order)` groups
pub fn find_duplicates<'a, I>(groups: I) -> Result<(), Vec<DuplicateError>>
where
    I: IntoIterator<Item = (Category, Vec<&'a str>)>,
{
    let mut errors = Vec::new();
    let mut owners: BTreeMap<&str, Vec<Category>> = BTreeMap::new();

    for (category, names) in groups {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        for name in names {
            if !seen.insert(name) {
                if reported.insert(name) {
                    errors.push(DuplicateError::WithinCategory {
                        category,
                        name: name.to_string(),
                    });
                }
                continue;
            }
            owners.entry(name).or_default().push(category);
        }
    }

    for (name, categories) in owners {
        if categories.len() > 1 {
            errors.push(DuplicateError::AcrossCategories {
                categories,
                name: name.to_string(),
            });
        }
    }

    if errors.is_empty() {
        tracing::trace!("schema field names are unique");
        Ok(())
    } else {
        tracing::debug!(count = errors.len(), "duplicate schema fields");
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParameterField;

    #[test]
    fn within_category_reported_once_per_name() {
        let draft = ParameterSchemaDraft::new()
            .query("limit", ParameterField::number())
            .query("limit", ParameterField::number())
            .query("limit", ParameterField::string());
        let errors = validate_draft(&draft).unwrap_err();
        assert_eq!(
            errors,
            vec![DuplicateError::WithinCategory {
                category: Category::Query,
                name: "limit".into()
            }]
        );
    }

    #[test]
    fn across_categories_lists_every_owner() {
        let draft = ParameterSchemaDraft::new()
            .header("model", ParameterField::string())
            .body_field("model", ParameterField::string())
            .path_parameter("model", ParameterField::string());
        let errors = validate_draft(&draft).unwrap_err();
        assert_eq!(
            errors,
            vec![DuplicateError::AcrossCategories {
                categories: vec![Category::Header, Category::Body, Category::PathParameter],
                name: "model".into()
            }]
        );
        assert_eq!(
            errors[0].to_string(),
            "field `model` appears in multiple categories: header, body, parameter"
        );
    }

    #[test]
    fn both_checks_are_combined() {
        let draft = ParameterSchemaDraft::new()
            .header("a", ParameterField::string())
            .header("a", ParameterField::string())
            .query("a", ParameterField::string())
            .query("b", ParameterField::string())
            .body_field("b", ParameterField::string());
        let errors = validate_draft(&draft).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(matches!(&errors[0], DuplicateError::WithinCategory { name, .. } if name == "a"));
    }

    #[test]
    fn names_are_case_sensitive() {
        let draft = ParameterSchemaDraft::new()
            .header("Model", ParameterField::string())
            .query("model", ParameterField::string());
        assert!(validate_draft(&draft).is_ok());
    }

    #[test]
    fn serializes_with_kind_tag() {
        let err = DuplicateError::WithinCategory {
            category: Category::Header,
            name: "x".into(),
        };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "withinCategory");
        assert_eq!(json["category"], "header");
    }
}
