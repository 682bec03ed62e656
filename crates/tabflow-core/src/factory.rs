//! Operation factory: configuration record → bound operation.
//!
//! Dispatch is on the record's `function` field. A name that matches no
//! [`OperationKind`] is not an error; the record simply contributes nothing.
//! A matching record with absent or mistyped fields is a construction fault.

use tabflow_model::{BuildError, ConfigRecord, FieldError, Operation, OperationKind};
use tracing::trace;

/// Bind one record.
///
/// `index` is the record's position in its definition and is only used for
/// error reporting.
///
/// # Errors
///
/// Returns [`BuildError`] if `function` is absent or not a string, or if a
/// field required by the matched kind is absent or has the wrong type.
pub fn bind_record(index: usize, record: &ConfigRecord) -> Result<Option<Operation>, BuildError> {
    let function = record
        .function()
        .map_err(|source| BuildError::new(index, None, source))?;

    let Some(kind) = OperationKind::from_name(function) else {
        trace!(index, function, "no operation kind matches, record skipped");
        return Ok(None);
    };

    bind_kind(kind, record)
        .map(Some)
        .map_err(|source| BuildError::new(index, Some(function), source))
}

/// Extract the parameters of `kind` from a record.
///
/// The record's `function` field is not consulted.
pub fn bind_kind(kind: OperationKind, record: &ConfigRecord) -> Result<Operation, FieldError> {
    let operation = match kind {
        OperationKind::RenameColumn => Operation::RenameColumn {
            source: record.str_field("source")?,
            target: record.str_field("target")?,
        },
        OperationKind::SumColumns => Operation::SumColumns {
            sources: record.str_list_field("sources")?,
            target: record.str_field("target")?,
        },
        OperationKind::CountLetter => Operation::CountLetter {
            source: record.str_field("source")?,
            letter: record.char_field("letter")?,
            target: record.str_field("target")?,
        },
        OperationKind::DropColumns => Operation::DropColumns {
            columns_to_drop: record.str_list_field("columns_to_drop")?,
        },
    };
    Ok(operation)
}
