//! Pipeline construction and execution.
//!
//! A pipeline definition is an ordered list of [`ConfigRecord`]s. The
//! [`factory`] binds each record to an [`Operation`]; a [`Pipeline`] holds
//! the bound operations and runs them, in order, against a DataFrame.
//!
//! ```ignore
//! use tabflow_core::Pipeline;
//!
//! let pipeline = Pipeline::from_records(&records)?;
//! let report = pipeline.run(df);
//! println!("{}", report.summary());
//! ```

pub mod factory;
pub mod pipeline;
pub mod runner;
pub mod validation;

pub use factory::{bind_kind, bind_record};
pub use pipeline::{Pipeline, PipelineBuilder, PipelineState};
pub use runner::{FailurePolicy, RunError, RunOptions, RunReport, StepOutcome, StepStatus};
pub use validation::{PlanIssue, check_plan};

pub use tabflow_model::{BuildError, ConfigRecord, FieldError, Operation, OperationKind};
