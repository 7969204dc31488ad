//! JSON path read/write helpers for request transformation
//!
//! Paths are dotted keys with optional bracketed indices: `a.b[0].c`. A purely
//! numeric key (`messages.0.content`) also indexes into arrays when reading.
//! Reads never fail loudly: anything that cannot be traversed is "absent".
//! Writes create missing intermediate objects/arrays but never overwrite an
//! existing scalar.

use serde_json::{Map, Value};
use thiserror::Error;

/// Writes beyond this array index are refused
const MAX_WRITE_INDEX: usize = 10_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum PathSeg {
    Key(String),
    Index(usize),
}

/// Malformed path
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("path is empty")]
    Empty,
    #[error("path '{0}' contains an empty segment")]
    EmptySegment(String),
    #[error("path '{0}' has an unclosed '['")]
    UnclosedBracket(String),
    #[error("path '{0}' has unexpected characters around an index")]
    Unexpected(String),
    #[error("path '{path}' has a non-numeric index '{index}'")]
    InvalidIndex { path: String, index: String },
}

/// Parse a dotted/array path like `a.b[0].c[2]` into segments
pub(crate) fn parse_path_strict(path: &str) -> Result<Vec<PathSeg>, PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }
    let mut segs = Vec::new();
    for part in path.split('.') {
        if part.is_empty() {
            return Err(PathError::EmptySegment(path.to_string()));
        }
        let (key, mut rest) = match part.find('[') {
            Some(pos) => part.split_at(pos),
            None => (part, ""),
        };
        if key.contains(']') {
            return Err(PathError::Unexpected(path.to_string()));
        }
        if !key.is_empty() {
            segs.push(PathSeg::Key(key.to_string()));
        }
        // Zero or more [number]
        while !rest.is_empty() {
            let Some(inner) = rest.strip_prefix('[') else {
                return Err(PathError::Unexpected(path.to_string()));
            };
            let Some(end) = inner.find(']') else {
                return Err(PathError::UnclosedBracket(path.to_string()));
            };
            let raw = &inner[..end];
            let index = raw.parse::<usize>().map_err(|_| PathError::InvalidIndex {
                path: path.to_string(),
                index: raw.to_string(),
            })?;
            segs.push(PathSeg::Index(index));
            rest = &inner[end + 1..];
        }
    }
    Ok(segs)
}

/// First key of a path, if it starts with one
pub(crate) fn root_key(path: &str) -> Option<String> {
    match parse_path_strict(path).ok()?.into_iter().next()? {
        PathSeg::Key(key) => Some(key),
        PathSeg::Index(_) => None,
    }
}

/// Get immutable reference by path; `None` for absent values and malformed paths
pub(crate) fn get_path<'a>(v: &'a Value, path: &str) -> Option<&'a Value> {
    let segs = parse_path_strict(path).ok()?;
    let mut cur = v;
    for seg in &segs {
        cur = match (seg, cur) {
            (PathSeg::Key(k), Value::Object(map)) => map.get(k)?,
            (PathSeg::Key(k), Value::Array(arr)) => arr.get(k.parse::<usize>().ok()?)?,
            (PathSeg::Index(i), Value::Array(arr)) => arr.get(*i)?,
            _ => return None,
        };
    }
    Some(cur)
}

/// Write `value` at `path`, creating intermediate structures as needed.
///
/// Returns `false` (leaving `target` untouched) when the path is malformed or
/// runs into an existing scalar.
pub(crate) fn set_path(target: &mut Value, path: &str, value: Value) -> bool {
    let Ok(segs) = parse_path_strict(path) else {
        return false;
    };
    if !writable(target, &segs) {
        return false;
    }

    let mut cur = target;
    for seg in &segs {
        if cur.is_null() {
            *cur = match seg {
                PathSeg::Key(_) => Value::Object(Map::new()),
                PathSeg::Index(_) => Value::Array(Vec::new()),
            };
        }
        cur = match (seg, cur) {
            (PathSeg::Key(k), Value::Object(map)) => map.entry(k.clone()).or_insert(Value::Null),
            (PathSeg::Key(k), Value::Array(arr)) => match k.parse::<usize>() {
                Ok(i) => slot(arr, i),
                Err(_) => return false,
            },
            (PathSeg::Index(i), Value::Array(arr)) => slot(arr, *i),
            _ => return false,
        };
    }
    *cur = value;
    true
}

/// Dry run of [`set_path`]'s traversal, so a failed write leaves no partial structure
fn writable(target: &Value, segs: &[PathSeg]) -> bool {
    let mut cur = Some(target);
    for seg in segs {
        let next = match (seg, cur) {
            // Missing or null: everything below gets created
            (_, None) | (_, Some(Value::Null)) => None,
            (PathSeg::Key(k), Some(Value::Object(map))) => map.get(k),
            (PathSeg::Key(k), Some(Value::Array(arr))) => match k.parse::<usize>() {
                Ok(i) if i <= MAX_WRITE_INDEX => arr.get(i),
                _ => return false,
            },
            (PathSeg::Index(i), Some(Value::Array(arr))) if *i <= MAX_WRITE_INDEX => arr.get(*i),
            _ => return false,
        };
        if let PathSeg::Index(i) = seg {
            if *i > MAX_WRITE_INDEX {
                return false;
            }
        }
        cur = next;
    }
    true
}

fn slot(arr: &mut Vec<Value>, index: usize) -> &mut Value {
    if arr.len() <= index {
        arr.resize(index + 1, Value::Null);
    }
    &mut arr[index]
}
