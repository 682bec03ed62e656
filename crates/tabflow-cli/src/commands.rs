//! Command implementations, independent of argument parsing.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span};

use tabflow_core::{
    FailurePolicy, OperationKind, Pipeline, PlanIssue, RunOptions, RunReport, check_plan,
};
use tabflow_ingest::{load_definition, read_csv_table};
use tabflow_output::write_csv_table;

/// Inputs to `tabflow run`.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub pipeline: PathBuf,
    pub input: PathBuf,
    /// Write the result here; when `None` the caller decides where it goes.
    pub output: Option<PathBuf>,
    pub failure_policy: FailurePolicy,
}

/// Load and bind a definition file.
pub fn build_pipeline(path: &Path) -> Result<Pipeline> {
    let records =
        load_definition(path).with_context(|| format!("load pipeline {}", path.display()))?;
    Pipeline::from_records(&records)
        .with_context(|| format!("build pipeline from {}", path.display()))
}

/// Build the pipeline, run it over the input table and write the result.
///
/// Under [`FailurePolicy::Abort`] the first failed step is returned as an
/// error and nothing is written.
pub fn run_pipeline(request: &RunRequest) -> Result<RunReport> {
    let span = info_span!("run", pipeline = %request.pipeline.display());
    let _guard = span.enter();

    let pipeline = build_pipeline(&request.pipeline)?;
    let table = read_csv_table(&request.input)
        .with_context(|| format!("read input {}", request.input.display()))?;

    let options = RunOptions::default().with_failure_policy(request.failure_policy);
    let mut report = pipeline
        .run_with(table, &options)
        .context("pipeline aborted")?;

    if let Some(path) = &request.output {
        write_csv_table(&mut report.table, path)?;
    }
    info!("{}", report.summary());
    Ok(report)
}

/// Result of `tabflow check`.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub pipeline: Pipeline,
    /// Column names of the input table, when one was given.
    pub input_columns: Option<Vec<String>>,
    pub issues: Vec<PlanIssue>,
}

impl CheckOutcome {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Build the pipeline and, with an input table, check its column plan.
pub fn check_pipeline(pipeline_path: &Path, input: Option<&Path>) -> Result<CheckOutcome> {
    let pipeline = build_pipeline(pipeline_path)?;
    let Some(input) = input else {
        return Ok(CheckOutcome {
            pipeline,
            input_columns: None,
            issues: Vec::new(),
        });
    };

    let table =
        read_csv_table(input).with_context(|| format!("read input {}", input.display()))?;
    let columns: Vec<String> = table
        .get_column_names()
        .into_iter()
        .map(ToString::to_string)
        .collect();
    let issues = check_plan(&pipeline, &columns);
    Ok(CheckOutcome {
        pipeline,
        input_columns: Some(columns),
        issues,
    })
}

/// One row of `tabflow kinds`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindInfo {
    pub name: &'static str,
    pub fields: Vec<&'static str>,
    pub description: &'static str,
}

pub fn list_kinds() -> Vec<KindInfo> {
    OperationKind::ALL
        .iter()
        .map(|kind| KindInfo {
            name: kind.name(),
            fields: kind.required_fields().to_vec(),
            description: kind.description(),
        })
        .collect()
}
