use std::collections::BTreeMap;
use std::fs;
use std::iter::FromIterator;
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::errors::{ErrorInfo, GkError};

fn serde_error(code: &str, err: impl ToString) -> GkError {
    GkError::Serde(ErrorInfo::new(code, err.to_string()))
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let ordered = map
                .into_iter()
                .map(|(key, value)| (key, canonicalize(value)))
                .collect::<BTreeMap<_, _>>();
            Value::Object(Map::from_iter(ordered))
        }
        Value::Array(values) => {
            let canonical_values = values.into_iter().map(canonicalize).collect();
            Value::Array(canonical_values)
        }
        other => other,
    }
}

/// Serializes a value into canonical JSON bytes with deterministic ordering.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, GkError> {
    let value = serde_json::to_value(value).map_err(|err| serde_error("json_serialize", err))?;
    let canonical = canonicalize(value);
    let mut bytes = Vec::new();
    serde_json::to_writer(&mut bytes, &canonical).map_err(|err| serde_error("json_write", err))?;
    Ok(bytes)
}

/// Deserializes a value from JSON bytes.
pub fn from_json_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, GkError> {
    serde_json::from_slice(data).map_err(|err| serde_error("json_deserialize", err))
}

/// Serializes a value into deterministic YAML.
pub fn to_yaml_string<T: Serialize>(value: &T) -> Result<String, GkError> {
    serde_yaml::to_string(value).map_err(|err| serde_error("yaml_serialize", err))
}

/// Deserializes a YAML payload into the requested type.
pub fn from_yaml_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, GkError> {
    serde_yaml::from_slice(data).map_err(|err| serde_error("yaml_deserialize", err))
}

/// Loads a YAML or JSON document from disk, dispatching on the file extension.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T, GkError> {
    let bytes = fs::read(path).map_err(|err| {
        GkError::Serde(
            ErrorInfo::new("document_read", err.to_string())
                .with_context("path", path.display()),
        )
    })?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => from_json_slice(&bytes),
        _ => from_yaml_slice(&bytes),
    }
}

/// Writes canonical JSON bytes for `value` to `path`, creating parent directories.
pub fn write_canonical_json<T: Serialize>(path: &Path, value: &T) -> Result<(), GkError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| serde_error("document_dir", err))?;
    }
    let bytes = to_canonical_json_bytes(value)?;
    fs::write(path, bytes).map_err(|err| serde_error("document_write", err))
}
