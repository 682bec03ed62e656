//! Input side of tabflow: pipeline definitions and CSV tables.

pub mod definition;
pub mod error;
pub mod table;

pub use definition::{load_definition, parse_definition};
pub use error::{IngestError, Result};
pub use table::{read_csv_bytes, read_csv_table};
