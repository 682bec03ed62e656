//! DataFrame helpers shared by the executors and the plan check.

use polars::prelude::{DataFrame, DataType};

/// Column names in frame order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(ToString::to_string)
        .collect()
}

/// Whether the frame has a column with exactly this name.
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_index(name).is_some()
}

/// Requested names that are not columns of the frame, in request order,
/// without repeats.
pub fn missing_columns<S: AsRef<str>>(df: &DataFrame, names: &[S]) -> Vec<String> {
    let mut missing: Vec<String> = Vec::new();
    for name in names {
        let name = name.as_ref();
        if !has_column(df, name) && !missing.iter().any(|m| m == name) {
            missing.push(name.to_string());
        }
    }
    missing
}

/// How a numeric column adds up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericClass {
    Integer,
    Float,
}

/// Classify a dtype for summation; `None` for anything that is not a number.
pub fn numeric_class(dtype: &DataType) -> Option<NumericClass> {
    match dtype {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => Some(NumericClass::Integer),
        DataType::Float32 | DataType::Float64 => Some(NumericClass::Float),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, NamedFrom, Series};

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Column::new("a".into(), vec![1i64, 2]),
            Column::new("b".into(), vec!["x", "y"]),
        ])
        .unwrap()
    }

    #[test]
    fn lists_columns_in_order() {
        assert_eq!(column_names(&frame()), vec!["a", "b"]);
    }

    #[test]
    fn missing_columns_are_deduplicated() {
        let df = frame();
        assert_eq!(missing_columns(&df, &["c", "a", "c", "d"]), vec!["c", "d"]);
        assert!(missing_columns(&df, &["a", "b"]).is_empty());
    }

    #[test]
    fn classifies_numeric_dtypes() {
        let df = frame();
        assert_eq!(
            numeric_class(df.column("a").unwrap().dtype()),
            Some(NumericClass::Integer)
        );
        assert_eq!(numeric_class(df.column("b").unwrap().dtype()), None);
        let floats = Series::new("f".into(), vec![1.5f64]);
        assert_eq!(numeric_class(floats.dtype()), Some(NumericClass::Float));
        assert_eq!(numeric_class(&DataType::Boolean), None);
    }
}
