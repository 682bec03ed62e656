//! Pipelines of bound operations.
//!
//! [`Pipeline`] is an immutable, ordered list of operations built in one
//! pure step from a definition. [`PipelineBuilder`] is the accumulating
//! holder for callers that assemble a pipeline from several definitions and
//! reset it between uses.

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use tabflow_model::{BuildError, ConfigRecord, Operation};
use tracing::debug;

use crate::factory::bind_record;
use crate::runner::{RunError, RunOptions, RunReport, run_operations, run_operations_with};

/// An ordered sequence of bound operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pipeline {
    operations: Vec<Operation>,
}

impl Pipeline {
    pub fn new(operations: Vec<Operation>) -> Self {
        Self { operations }
    }

    /// Bind every record, in order.
    ///
    /// Records whose `function` matches no operation kind are skipped.
    ///
    /// # Errors
    ///
    /// The first record that cannot be bound aborts construction; see
    /// [`bind_record`].
    pub fn from_records(records: &[ConfigRecord]) -> Result<Self, BuildError> {
        let mut operations = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            if let Some(operation) = bind_record(index, record)? {
                operations.push(operation);
            }
        }
        debug!(
            records = records.len(),
            operations = operations.len(),
            "pipeline built"
        );
        Ok(Self { operations })
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Convert the operations back into configuration records.
    ///
    /// # Errors
    ///
    /// Returns an error if an operation fails to serialize.
    pub fn to_records(&self) -> serde_json::Result<Vec<ConfigRecord>> {
        self.operations
            .iter()
            .map(|operation| serde_json::to_value(operation).and_then(serde_json::from_value))
            .collect()
    }

    /// Run every operation against `df`, continuing past failures.
    pub fn run(&self, df: DataFrame) -> RunReport {
        run_operations(&self.operations, df)
    }

    /// Run every operation against `df` under `options`.
    ///
    /// # Errors
    ///
    /// See [`run_operations_with`].
    pub fn run_with(&self, df: DataFrame, options: &RunOptions) -> Result<RunReport, RunError> {
        run_operations_with(&self.operations, df, options)
    }
}

impl From<Vec<Operation>> for Pipeline {
    fn from(operations: Vec<Operation>) -> Self {
        Self::new(operations)
    }
}

/// Whether a builder holds any operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Empty,
    Populated,
}

/// Accumulating pipeline holder.
///
/// `create_pipeline` appends, `clear_pipeline` resets, and the builder can be
/// reused for any number of build/run/clear cycles.
#[derive(Debug, Clone, Default)]
pub struct PipelineBuilder {
    operations: Vec<Operation>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `records` and append the resulting operations.
    ///
    /// Returns how many operations were appended. The append is atomic: on
    /// error the builder keeps exactly the operations it had before.
    ///
    /// # Errors
    ///
    /// See [`Pipeline::from_records`].
    pub fn create_pipeline(&mut self, records: &[ConfigRecord]) -> Result<usize, BuildError> {
        let built = Pipeline::from_records(records)?;
        let appended = built.len();
        self.operations.extend(built.operations);
        Ok(appended)
    }

    /// Remove every operation. Tables are not affected.
    pub fn clear_pipeline(&mut self) {
        self.operations.clear();
    }

    /// Run the accumulated operations against `df`, continuing past failures.
    pub fn run_pipeline(&self, df: DataFrame) -> RunReport {
        run_operations(&self.operations, df)
    }

    pub fn state(&self) -> PipelineState {
        if self.operations.is_empty() {
            PipelineState::Empty
        } else {
            PipelineState::Populated
        }
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Snapshot the accumulated operations as an immutable pipeline.
    pub fn build(&self) -> Pipeline {
        Pipeline::new(self.operations.clone())
    }
}
