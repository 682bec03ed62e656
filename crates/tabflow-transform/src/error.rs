use polars::prelude::PolarsError;
use thiserror::Error;

/// Why an operation could not be applied to a table.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("missing column(s): {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    #[error("column `{column}` already exists")]
    DuplicateColumn { column: String },

    #[error("column `{column}` is not numeric (found {dtype})")]
    NonNumeric { column: String, dtype: String },

    #[error("column `{column}` is not a string column (found {dtype})")]
    NonString { column: String, dtype: String },

    #[error("column `{column}` has a missing value at row {row}")]
    NullValue { column: String, row: usize },

    #[error("value for `{target}` does not fit its column type at row {row}")]
    Overflow { target: String, row: usize },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, OperationError>;
