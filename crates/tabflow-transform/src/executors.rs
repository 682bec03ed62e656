//! Operation executor functions.
//!
//! One function per [`OperationKind`](tabflow_model::OperationKind), each
//! operating on a DataFrame in place. Preconditions (column presence, dtypes,
//! null values) are checked first; the frame is only modified once the new
//! columns have been fully computed.

use std::collections::HashSet;

use polars::prelude::{Column, DataFrame, DataType};
use tabflow_model::Operation;
use tracing::trace;

use crate::error::{OperationError, Result};
use crate::frame_utils::{NumericClass, has_column, missing_columns, numeric_class};

/// Apply a bound operation to a frame.
pub fn apply_operation(operation: &Operation, df: &mut DataFrame) -> Result<()> {
    trace!(function = %operation.kind(), "applying operation");
    match operation {
        Operation::RenameColumn { source, target } => rename_column(df, source, target),
        Operation::SumColumns { sources, target } => sum_columns(df, sources, target),
        Operation::CountLetter {
            source,
            letter,
            target,
        } => count_letter(df, source, *letter, target),
        Operation::DropColumns { columns_to_drop } => drop_columns(df, columns_to_drop),
    }
}

/// Rename `source` to `target`, keeping the column's position.
///
/// Renaming a column to its own name succeeds without changes. Renaming onto
/// another existing column is refused.
pub fn rename_column(df: &mut DataFrame, source: &str, target: &str) -> Result<()> {
    ensure_columns(df, &[source])?;
    if source == target {
        return Ok(());
    }
    if has_column(df, target) {
        return Err(OperationError::DuplicateColumn {
            column: target.to_string(),
        });
    }
    df.rename(source, target.into())?;
    Ok(())
}

/// Add `target` as the row-wise sum of `sources`.
///
/// The result is `Int64` when every source is an integer column and
/// `Float64` otherwise. Missing values count as zero. An existing `target`
/// column is replaced in place.
pub fn sum_columns<S: AsRef<str>>(df: &mut DataFrame, sources: &[S], target: &str) -> Result<()> {
    ensure_columns(df, sources)?;

    let mut all_integer = true;
    for name in sources {
        let column = df.column(name.as_ref())?;
        match numeric_class(column.dtype()) {
            Some(NumericClass::Integer) => {}
            Some(NumericClass::Float) => all_integer = false,
            None => {
                return Err(OperationError::NonNumeric {
                    column: name.as_ref().to_string(),
                    dtype: column.dtype().to_string(),
                });
            }
        }
    }

    let height = df.height();
    let summed = if all_integer {
        let mut totals = vec![0i64; height];
        for name in sources {
            let values = cast_exact(df.column(name.as_ref())?, &DataType::Int64, target)?;
            for (row, (total, value)) in totals.iter_mut().zip(values.i64()?).enumerate() {
                *total = total.checked_add(value.unwrap_or(0)).ok_or_else(|| {
                    OperationError::Overflow {
                        target: target.to_string(),
                        row,
                    }
                })?;
            }
        }
        Column::new(target.into(), totals)
    } else {
        let mut totals = vec![0f64; height];
        for name in sources {
            let values = cast_exact(df.column(name.as_ref())?, &DataType::Float64, target)?;
            for (total, value) in totals.iter_mut().zip(values.f64()?) {
                *total += value.unwrap_or(0.0);
            }
        }
        Column::new(target.into(), totals)
    };

    df.with_column(summed)?;
    Ok(())
}

/// Add `target` holding the number of times `letter` occurs in each value of
/// `source`.
///
/// `source` must be a string column without missing values.
pub fn count_letter(df: &mut DataFrame, source: &str, letter: char, target: &str) -> Result<()> {
    ensure_columns(df, &[source])?;

    let column = df.column(source)?;
    if !matches!(column.dtype(), DataType::String) {
        return Err(OperationError::NonString {
            column: source.to_string(),
            dtype: column.dtype().to_string(),
        });
    }

    let values = column.str()?;
    let mut counts: Vec<i64> = Vec::with_capacity(values.len());
    for (row, value) in values.into_iter().enumerate() {
        let Some(text) = value else {
            return Err(OperationError::NullValue {
                column: source.to_string(),
                row,
            });
        };
        let count = i64::try_from(count_char(text, letter)).map_err(|_| {
            OperationError::Overflow {
                target: target.to_string(),
                row,
            }
        })?;
        counts.push(count);
    }

    df.with_column(Column::new(target.into(), counts))?;
    Ok(())
}

/// Remove every listed column.
///
/// All-or-nothing: if any listed column is absent, nothing is dropped.
pub fn drop_columns<S: AsRef<str>>(df: &mut DataFrame, columns_to_drop: &[S]) -> Result<()> {
    ensure_columns(df, columns_to_drop)?;

    let dropped: HashSet<&str> = columns_to_drop.iter().map(AsRef::as_ref).collect();
    let kept: Vec<String> = df
        .get_column_names()
        .into_iter()
        .filter(|name| !dropped.contains(name.as_str()))
        .map(ToString::to_string)
        .collect();

    *df = df.select(kept)?;
    Ok(())
}

/// Exact, case-sensitive occurrences of `letter` in `text`.
pub fn count_char(text: &str, letter: char) -> usize {
    text.chars().filter(|&ch| ch == letter).count()
}

/// Cast `column` to `dtype`, refusing values the cast would turn into nulls.
fn cast_exact(column: &Column, dtype: &DataType, target: &str) -> Result<Column> {
    let cast = column.cast(dtype)?;
    if cast.null_count() == column.null_count() {
        return Ok(cast);
    }
    let before = column.is_null();
    let after = cast.is_null();
    let row = before
        .into_iter()
        .zip(after.into_iter())
        .position(|(was_null, is_null)| was_null == Some(false) && is_null == Some(true))
        .unwrap_or_default();
    Err(OperationError::Overflow {
        target: target.to_string(),
        row,
    })
}

fn ensure_columns<S: AsRef<str>>(df: &DataFrame, names: &[S]) -> Result<()> {
    let missing = missing_columns(df, names);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(OperationError::MissingColumns { columns: missing })
    }
}
