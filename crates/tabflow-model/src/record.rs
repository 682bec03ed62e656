//! Raw configuration records.
//!
//! A record is one JSON object from a pipeline definition. It carries a
//! `function` name plus whatever parameters that function needs; fields are
//! only interpreted when the record is bound to an operation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::FieldError;

/// Field holding the operation name.
pub const FUNCTION_FIELD: &str = "function";

/// One step's declarative description, exactly as read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigRecord {
    fields: Map<String, Value>,
}

impl ConfigRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Raw access to a field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Field names in the record.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// The declared operation name.
    pub fn function(&self) -> Result<&str, FieldError> {
        match self.fields.get(FUNCTION_FIELD) {
            None => Err(FieldError::Missing {
                field: FUNCTION_FIELD,
            }),
            Some(Value::String(name)) => Ok(name),
            Some(_) => Err(FieldError::InvalidType {
                field: FUNCTION_FIELD,
                expected: "a string",
            }),
        }
    }

    /// A required string field.
    pub fn str_field(&self, field: &'static str) -> Result<String, FieldError> {
        match self.require(field)? {
            Value::String(value) => Ok(value.clone()),
            _ => Err(FieldError::InvalidType {
                field,
                expected: "a string",
            }),
        }
    }

    /// A required array-of-strings field.
    pub fn str_list_field(&self, field: &'static str) -> Result<Vec<String>, FieldError> {
        let invalid = || FieldError::InvalidType {
            field,
            expected: "an array of strings",
        };
        let Value::Array(items) = self.require(field)? else {
            return Err(invalid());
        };
        items
            .iter()
            .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
            .collect()
    }

    /// A required single-character string field.
    pub fn char_field(&self, field: &'static str) -> Result<char, FieldError> {
        let value = self.str_field(field)?;
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Ok(ch),
            _ => Err(FieldError::InvalidLetter { value }),
        }
    }

    fn require(&self, field: &'static str) -> Result<&Value, FieldError> {
        self.fields
            .get(field)
            .ok_or(FieldError::Missing { field })
    }
}

impl From<Map<String, Value>> for ConfigRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> ConfigRecord {
        serde_json::from_value(value).expect("record")
    }

    #[test]
    fn reads_function_name() {
        let rec = record(json!({"function": "drop_columns", "columns_to_drop": []}));
        assert_eq!(rec.function(), Ok("drop_columns"));
    }

    #[test]
    fn missing_function_is_reported() {
        let rec = record(json!({"source": "a"}));
        assert_eq!(
            rec.function(),
            Err(FieldError::Missing { field: "function" })
        );
    }

    #[test]
    fn non_string_function_is_invalid() {
        let rec = record(json!({"function": 7}));
        assert!(matches!(
            rec.function(),
            Err(FieldError::InvalidType { field: "function", .. })
        ));
    }

    #[test]
    fn str_list_rejects_mixed_arrays() {
        let rec = record(json!({"sources": ["a", 1]}));
        assert!(matches!(
            rec.str_list_field("sources"),
            Err(FieldError::InvalidType { field: "sources", .. })
        ));
    }

    #[test]
    fn char_field_requires_exactly_one_char() {
        let rec = ConfigRecord::new().with("letter", "t");
        assert_eq!(rec.char_field("letter"), Ok('t'));

        let rec = ConfigRecord::new().with("letter", "é");
        assert_eq!(rec.char_field("letter"), Ok('é'));

        let rec = ConfigRecord::new().with("letter", "te");
        assert_eq!(
            rec.char_field("letter"),
            Err(FieldError::InvalidLetter {
                value: "te".to_string()
            })
        );

        let rec = ConfigRecord::new().with("letter", "");
        assert!(rec.char_field("letter").is_err());
    }

    #[test]
    fn extra_fields_are_kept_but_ignored() {
        let rec = record(json!({"function": "x", "comment": "hello"}));
        let names: Vec<&str> = rec.field_names().collect();
        assert_eq!(names, vec!["comment", "function"]);
    }
}
