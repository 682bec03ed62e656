//! Data model for tabflow pipeline definitions.
//!
//! - **record**: raw configuration records as read from a definition file
//! - **operation**: the closed set of operation kinds and their bound form
//! - **error**: field extraction and construction errors

pub mod error;
pub mod operation;
pub mod record;

pub use error::{BuildError, FieldError};
pub use operation::{Operation, OperationKind};
pub use record::ConfigRecord;
