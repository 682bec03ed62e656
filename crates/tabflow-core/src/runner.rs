//! Sequential execution of bound operations.
//!
//! Each operation reports success or failure; what happens after a failure is
//! decided here by the [`FailurePolicy`], not by the operations themselves.

use std::time::{Duration, Instant};

use polars::prelude::DataFrame;
use tabflow_model::{Operation, OperationKind};
use tabflow_transform::{OperationError, apply_operation};
use thiserror::Error;
use tracing::{debug, info_span, warn};

/// What the runner does when an operation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log the failure, keep the table as it was, run the next step.
    #[default]
    Continue,
    /// Stop at the first failure.
    Abort,
}

/// Options controlling a pipeline run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub failure_policy: FailurePolicy,
}

impl RunOptions {
    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}

/// Result of one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Applied,
    Failed { reason: String },
}

/// Outcome of one pipeline step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// Zero-based position of the operation in the pipeline.
    pub index: usize,
    pub kind: OperationKind,
    pub status: StepStatus,
}

impl StepOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self.status, StepStatus::Applied)
    }
}

/// Report of a completed run, carrying the output table.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub table: DataFrame,
    pub rows_before: usize,
    pub columns_before: usize,
    pub rows_after: usize,
    pub columns_after: usize,
    pub steps: Vec<StepOutcome>,
    pub duration: Duration,
}

impl RunReport {
    pub fn applied_count(&self) -> usize {
        self.steps.iter().filter(|step| step.is_applied()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.steps.len() - self.applied_count()
    }

    /// Outcomes of the steps that failed.
    pub fn failures(&self) -> impl Iterator<Item = &StepOutcome> {
        self.steps.iter().filter(|step| !step.is_applied())
    }

    /// One-line summary of the run.
    pub fn summary(&self) -> String {
        format!(
            "{} of {} steps applied, {} rows, {} -> {} columns, {:.3}s",
            self.applied_count(),
            self.steps.len(),
            self.rows_after,
            self.columns_before,
            self.columns_after,
            self.duration.as_secs_f64()
        )
    }
}

/// A run stopped by [`FailurePolicy::Abort`].
#[derive(Debug, Error)]
pub enum RunError {
    #[error("step {index} ({kind}) failed: {source}")]
    StepFailed {
        index: usize,
        kind: OperationKind,
        #[source]
        source: OperationError,
        /// The table as it was before the failing step.
        table: DataFrame,
    },
}

impl RunError {
    /// Recover the table the run stopped with.
    pub fn into_table(self) -> DataFrame {
        match self {
            Self::StepFailed { table, .. } => table,
        }
    }
}

/// Apply `operations` in order, continuing past failures.
pub fn run_operations(operations: &[Operation], df: DataFrame) -> RunReport {
    let mut run = Run::start(operations.len(), df);
    for (index, operation) in operations.iter().enumerate() {
        if let Err(error) = run.step(index, operation) {
            run.record_failure(index, operation.kind(), &error);
        }
    }
    run.finish()
}

/// Apply `operations` in order under the given options.
///
/// # Errors
///
/// With [`FailurePolicy::Abort`], returns [`RunError::StepFailed`] for the
/// first operation that fails. With [`FailurePolicy::Continue`] this never
/// fails.
pub fn run_operations_with(
    operations: &[Operation],
    df: DataFrame,
    options: &RunOptions,
) -> Result<RunReport, RunError> {
    if options.failure_policy == FailurePolicy::Continue {
        return Ok(run_operations(operations, df));
    }

    let mut run = Run::start(operations.len(), df);
    for (index, operation) in operations.iter().enumerate() {
        if let Err(source) = run.step(index, operation) {
            let kind = operation.kind();
            let _guard = run.span.enter();
            warn!(step = index, "unable to complete {kind}: {source}; aborting run");
            return Err(RunError::StepFailed {
                index,
                kind,
                source,
                table: run.table,
            });
        }
    }
    Ok(run.finish())
}

struct Run {
    table: DataFrame,
    rows_before: usize,
    columns_before: usize,
    steps: Vec<StepOutcome>,
    started: Instant,
    span: tracing::Span,
}

impl Run {
    fn start(step_count: usize, table: DataFrame) -> Self {
        let span = info_span!(
            "pipeline_run",
            steps = step_count,
            rows = table.height(),
            columns = table.width()
        );
        Self {
            rows_before: table.height(),
            columns_before: table.width(),
            table,
            steps: Vec::with_capacity(step_count),
            started: Instant::now(),
            span,
        }
    }

    fn step(&mut self, index: usize, operation: &Operation) -> Result<(), OperationError> {
        let _guard = self.span.enter();
        apply_operation(operation, &mut self.table)?;
        debug!(
            step = index,
            function = %operation.kind(),
            columns = self.table.width(),
            "applied {}",
            operation.describe()
        );
        self.steps.push(StepOutcome {
            index,
            kind: operation.kind(),
            status: StepStatus::Applied,
        });
        Ok(())
    }

    fn record_failure(&mut self, index: usize, kind: OperationKind, error: &OperationError) {
        let _guard = self.span.enter();
        warn!(step = index, "unable to complete {kind}: {error}");
        self.steps.push(StepOutcome {
            index,
            kind,
            status: StepStatus::Failed {
                reason: error.to_string(),
            },
        });
    }

    fn finish(self) -> RunReport {
        let duration = self.started.elapsed();
        debug!(parent: &self.span, elapsed_ms = duration.as_millis() as u64, "pipeline run finished");
        RunReport {
            rows_after: self.table.height(),
            columns_after: self.table.width(),
            table: self.table,
            rows_before: self.rows_before,
            columns_before: self.columns_before,
            steps: self.steps,
            duration,
        }
    }
}
