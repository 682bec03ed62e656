//! CSV table loading with polars.
//!
//! Every input has a single header row; column types are inferred from the
//! first 100 rows.

use std::io::Cursor;
use std::path::Path;

use polars::prelude::*;
use tracing::debug;

use crate::error::{IngestError, Result};

const INFER_SCHEMA_ROWS: usize = 100;

fn read_options() -> CsvReadOptions {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
}

fn parse_error(origin: &str, error: &PolarsError) -> IngestError {
    IngestError::CsvParse {
        origin: origin.to_string(),
        message: error.to_string(),
    }
}

/// Read a CSV file into a DataFrame.
///
/// # Errors
///
/// [`IngestError::Io`] if the file does not exist or cannot be inspected,
/// [`IngestError::CsvParse`] if polars rejects its contents.
pub fn read_csv_table(path: &Path) -> Result<DataFrame> {
    std::fs::metadata(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let origin = path.display().to_string();
    let df = read_options()
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| parse_error(&origin, &e))?
        .finish()
        .map_err(|e| parse_error(&origin, &e))?;

    debug!(
        path = %origin,
        rows = df.height(),
        columns = df.width(),
        "loaded CSV table"
    );
    Ok(df)
}

/// Read CSV text held in memory into a DataFrame.
///
/// # Errors
///
/// [`IngestError::CsvParse`] if polars rejects the input.
pub fn read_csv_bytes(bytes: &[u8]) -> Result<DataFrame> {
    read_options()
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(|e| parse_error("<memory>", &e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_column_types() {
        let df = read_csv_bytes(b"word,count,ratio\nabc,1,0.5\nde,2,1.5\n").unwrap();
        assert_eq!(df.shape(), (2, 3));
        assert_eq!(df.column("word").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("count").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("ratio").unwrap().dtype(), &DataType::Float64);
    }

    #[test]
    fn header_only_input_has_no_rows() {
        let df = read_csv_bytes(b"a,b\n").unwrap();
        assert_eq!(df.height(), 0);
        let names: Vec<String> = df
            .get_column_names()
            .into_iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
