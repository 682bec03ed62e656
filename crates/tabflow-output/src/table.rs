//! CSV output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;
use tracing::debug;

use crate::common::ensure_parent_dir;

/// Write `df` as CSV with a header row.
pub fn write_csv<W: Write>(df: &mut DataFrame, writer: W) -> Result<()> {
    CsvWriter::new(writer)
        .include_header(true)
        .finish(df)
        .context("write CSV")
}

/// Write `df` to a CSV file, creating parent directories as needed.
pub fn write_csv_table(df: &mut DataFrame, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_csv(df, &mut writer).with_context(|| format!("write {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "wrote CSV table"
    );
    Ok(())
}
