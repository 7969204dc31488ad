//! Shared fixtures and proptest strategies for the integration suites
#![allow(dead_code)]

use param_adapter::prelude::*;
use proptest::prelude::*;
use serde::de::DeserializeOwned;

/// Path of a file under `tests/fixtures`
pub fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

/// Raw text of a fixture file
pub fn fixture_text(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|e| panic!("failed to read fixture {name}: {e}"))
}

/// Deserialize a fixture straight from its text, so repeated keys stay observable
pub fn load_fixture<T: DeserializeOwned>(name: &str) -> T {
    serde_json::from_str(&fixture_text(name))
        .unwrap_or_else(|e| panic!("failed to parse fixture {name}: {e}"))
}

pub fn azure_endpoint() -> ProviderEndpoint {
    load_fixture("azure_chat_endpoint.json")
}

pub fn azure_adapter() -> AdapterMappingModel {
    load_fixture("azure_chat_adapter.json")
}

pub fn canonical_defaults() -> DefaultParameterSchema {
    DefaultParameterSchema::from_value(load_fixture("canonical_chat_defaults.json"))
        .expect("defaults fixture is an object")
}

/// `headers.Authorization` and `body.data.prompt` required, `temperature` optional
pub fn chat_schema() -> StructuredParameterSchema {
    ParameterSchemaDraft::new()
        .header("Authorization", ParameterField::string().required())
        .body_kind(BodyKind::Json)
        .body_field("prompt", ParameterField::string().required())
        .body_field("temperature", ParameterField::number())
        .build()
        .expect("chat schema is valid")
}

pub fn any_category() -> impl Strategy<Value = Category> {
    prop_oneof![
        Just(Category::Header),
        Just(Category::Body),
        Just(Category::Query),
        Just(Category::PathParameter),
    ]
}

pub fn field_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,7}"
}

pub fn any_field() -> impl Strategy<Value = ParameterField> {
    (
        prop_oneof![
            Just(ParameterType::String),
            Just(ParameterType::Number),
            Just(ParameterType::Boolean),
            Just(ParameterType::Json),
            Just(ParameterType::Array),
            Just(ParameterType::Object),
            Just(ParameterType::Any),
        ],
        any::<bool>(),
    )
        .prop_map(|(ty, required)| {
            let field = ParameterField::new(ty);
            if required { field.required() } else { field }
        })
}

/// Draft with the given `(category, name, field)` entries, in order
pub fn draft_from(entries: &[(Category, String, ParameterField)]) -> ParameterSchemaDraft {
    let mut draft = ParameterSchemaDraft::new().body_kind(BodyKind::Json);
    for (category, name, field) in entries {
        draft.add(
            *category,
            param_adapter::types::NamedField::new(name.clone(), field.clone()),
        );
    }
    draft
}
