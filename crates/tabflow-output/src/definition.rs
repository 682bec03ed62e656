//! Pipeline definition output.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tabflow_model::ConfigRecord;
use tracing::debug;

use crate::common::ensure_parent_dir;

/// Render records as a pretty-printed JSON array.
pub fn definition_json(records: &[ConfigRecord]) -> Result<String> {
    serde_json::to_string_pretty(records).context("serialize pipeline definition")
}

/// Write records as a definition file that `load_definition` reads back.
pub fn write_definition(path: &Path, records: &[ConfigRecord]) -> Result<()> {
    let mut text = definition_json(records)?;
    text.push('\n');
    ensure_parent_dir(path)?;
    fs::write(path, text).with_context(|| format!("write {}", path.display()))?;
    debug!(path = %path.display(), records = records.len(), "wrote pipeline definition");
    Ok(())
}
