//! Pipeline definitions: a JSON array of configuration records.

use std::path::Path;

use serde_json::Value;
use tabflow_model::ConfigRecord;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Parse definition text into configuration records.
///
/// Only the outer shape is checked here: the top-level value must be an
/// array and every element an object. Field contents are checked when the
/// records are bound to operations.
///
/// # Errors
///
/// [`IngestError::Json`] for malformed JSON and
/// [`IngestError::InvalidDefinition`] for a wrongly shaped document.
pub fn parse_definition(text: &str) -> Result<Vec<ConfigRecord>> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Array(elements) = value else {
        return Err(IngestError::InvalidDefinition {
            reason: format!("top-level value must be an array, found {}", json_type(&value)),
        });
    };

    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| match element {
            Value::Object(fields) => Ok(ConfigRecord::from(fields)),
            other => Err(IngestError::InvalidDefinition {
                reason: format!("record {index} must be an object, found {}", json_type(&other)),
            }),
        })
        .collect()
}

/// Read and parse a definition file.
///
/// # Errors
///
/// [`IngestError::Io`] if the file cannot be read, otherwise as
/// [`parse_definition`].
pub fn load_definition(path: &Path) -> Result<Vec<ConfigRecord>> {
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_definition(&text)?;
    debug!(path = %path.display(), records = records.len(), "loaded pipeline definition");
    Ok(records)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
