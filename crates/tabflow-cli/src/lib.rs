//! CLI library components for tabflow.

pub mod commands;
pub mod logging;
