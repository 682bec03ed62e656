//! Table operations for tabflow pipelines.
//!
//! - **executors**: one function per operation kind, plus the dispatcher
//! - **frame_utils**: column lookup and dtype classification helpers
//! - **error**: the per-operation failure type
//!
//! Every executor checks its preconditions before touching the frame, so an
//! `Err` always leaves the input exactly as it was.

pub mod error;
pub mod executors;
pub mod frame_utils;

pub use error::{OperationError, Result};
pub use executors::{
    apply_operation, count_char, count_letter, drop_columns, rename_column, sum_columns,
};
pub use frame_utils::{NumericClass, column_names, has_column, missing_columns, numeric_class};
