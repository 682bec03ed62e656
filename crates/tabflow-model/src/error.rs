use thiserror::Error;

/// A problem with a single field of a configuration record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("missing field `{field}`")]
    Missing { field: &'static str },

    #[error("field `{field}` must be {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("field `letter` must be a single character, got {value:?}")]
    InvalidLetter { value: String },
}

/// A configuration record that could not be bound to an operation.
///
/// Construction faults are fatal: the pipeline being built is discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("record {index} ({}): {source}", .function.as_deref().unwrap_or("no function"))]
pub struct BuildError {
    /// Zero-based position of the record in the definition.
    pub index: usize,
    /// The record's `function` value, when it could be read.
    pub function: Option<String>,
    #[source]
    pub source: FieldError,
}

impl BuildError {
    pub fn new(index: usize, function: Option<&str>, source: FieldError) -> Self {
        Self {
            index,
            function: function.map(str::to_string),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_error_names_record_and_field() {
        let err = BuildError::new(
            3,
            Some("rename_column"),
            FieldError::Missing { field: "target" },
        );
        assert_eq!(
            err.to_string(),
            "record 3 (rename_column): missing field `target`"
        );
    }

    #[test]
    fn build_error_without_function() {
        let err = BuildError::new(0, None, FieldError::Missing { field: "function" });
        assert_eq!(
            err.to_string(),
            "record 0 (no function): missing field `function`"
        );
    }
}
