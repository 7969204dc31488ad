//! Value transformations attached to mapping entries
//!
//! Tags are matched case-insensitively with `_`/`-` ignored, so `toString`,
//! `to_string` and `TO-STRING` are the same tag. A tag this crate does not
//! know is kept as [`Transformation::Custom`] and leaves values untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Transformation {
    ToString,
    ToNumber,
    ToBoolean,
    JsonStringify,
    JsonParse,
    ToArray,
    Lowercase,
    Uppercase,
    Custom(String),
}

impl Transformation {
    pub fn parse(tag: &str) -> Self {
        let normalized: String = tag
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "tostring" | "string" => Self::ToString,
            "tonumber" | "number" => Self::ToNumber,
            "toboolean" | "tobool" | "boolean" => Self::ToBoolean,
            "jsonstringify" | "stringify" => Self::JsonStringify,
            "jsonparse" | "parse" => Self::JsonParse,
            "toarray" | "array" => Self::ToArray,
            "lowercase" | "tolowercase" => Self::Lowercase,
            "uppercase" | "touppercase" => Self::Uppercase,
            _ => Self::Custom(tag.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::ToString => "toString",
            Self::ToNumber => "toNumber",
            Self::ToBoolean => "toBoolean",
            Self::JsonStringify => "jsonStringify",
            Self::JsonParse => "jsonParse",
            Self::ToArray => "toArray",
            Self::Lowercase => "lowercase",
            Self::Uppercase => "uppercase",
            Self::Custom(tag) => tag,
        }
    }

    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }

    /// Apply the transformation; `None` when the value cannot be converted
    pub fn apply(&self, value: Value) -> Option<Value> {
        match self {
            Self::ToString => match value {
                Value::Null => None,
                Value::String(_) => Some(value),
                Value::Bool(b) => Some(Value::String(b.to_string())),
                Value::Number(n) => Some(Value::String(n.to_string())),
                other => serde_json::to_string(&other).ok().map(Value::String),
            },
            Self::ToNumber => match value {
                Value::Number(_) => Some(value),
                Value::Bool(b) => Some(Value::from(u8::from(b))),
                Value::String(s) => parse_number(s.trim()),
                _ => None,
            },
            Self::ToBoolean => match value {
                Value::Bool(_) => Some(value),
                Value::Number(n) => n.as_f64().map(|f| Value::Bool(f != 0.0)),
                Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                    "true" | "1" | "yes" | "on" => Some(Value::Bool(true)),
                    "false" | "0" | "no" | "off" | "" => Some(Value::Bool(false)),
                    _ => None,
                },
                _ => None,
            },
            Self::JsonStringify => serde_json::to_string(&value).ok().map(Value::String),
            Self::JsonParse => match value {
                Value::String(s) => serde_json::from_str(&s).ok(),
                other => Some(other),
            },
            Self::ToArray => match value {
                Value::Array(_) => Some(value),
                other => Some(Value::Array(vec![other])),
            },
            Self::Lowercase => Some(map_string(value, |s| s.to_lowercase())),
            Self::Uppercase => Some(map_string(value, |s| s.to_uppercase())),
            Self::Custom(_) => Some(value),
        }
    }
}

fn parse_number(raw: &str) -> Option<Value> {
    if let Ok(i) = raw.parse::<i64>() {
        return Some(Value::from(i));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

fn map_string(value: Value, f: impl Fn(&str) -> String) -> Value {
    match value {
        Value::String(s) => Value::String(f(&s)),
        other => other,
    }
}

impl From<String> for Transformation {
    fn from(tag: String) -> Self {
        Self::parse(&tag)
    }
}

impl From<&str> for Transformation {
    fn from(tag: &str) -> Self {
        Self::parse(tag)
    }
}

impl From<Transformation> for String {
    fn from(transformation: Transformation) -> Self {
        transformation.as_str().to_string()
    }
}

impl std::fmt::Display for Transformation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
