//! Output side of tabflow.
//!
//! - **CSV**: transformed tables, to a file or any writer
//! - **JSON**: pipeline definitions in configuration record form

mod common;
mod definition;
mod table;

pub use common::ensure_parent_dir;
pub use definition::{definition_json, write_definition};
pub use table::{write_csv, write_csv_table};
