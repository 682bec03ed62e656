//! Column plan check.
//!
//! Walks a pipeline against a list of input column names, tracking how each
//! step changes the column set, and reports the steps that would fail for
//! structural reasons (missing columns, rename collisions). Dtype and value
//! checks only happen when the pipeline actually runs.

use std::fmt;

use tabflow_model::{Operation, OperationKind};

use crate::pipeline::Pipeline;

/// A step that would fail against the given columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanIssue {
    pub step_index: usize,
    pub kind: OperationKind,
    pub message: String,
}

impl PlanIssue {
    fn new(step_index: usize, kind: OperationKind, message: impl Into<String>) -> Self {
        Self {
            step_index,
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for PlanIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {} ({}): {}", self.step_index, self.kind, self.message)
    }
}

/// Check a pipeline against the input's column names.
///
/// A step reported here is treated as skipped when simulating later steps,
/// matching what the runner does under its default policy.
pub fn check_plan(pipeline: &Pipeline, input_columns: &[String]) -> Vec<PlanIssue> {
    let mut columns: Vec<String> = input_columns.to_vec();
    let mut issues = Vec::new();

    for (index, operation) in pipeline.operations().iter().enumerate() {
        let kind = operation.kind();
        if let Err(message) = simulate(operation, &mut columns) {
            issues.push(PlanIssue::new(index, kind, message));
        }
    }

    issues
}

fn simulate(operation: &Operation, columns: &mut Vec<String>) -> Result<(), String> {
    match operation {
        Operation::RenameColumn { source, target } => {
            let Some(slot) = position(columns, source) else {
                return Err(format!("cannot rename missing column '{source}'"));
            };
            if source != target && has_column(columns, target) {
                return Err(format!(
                    "cannot rename '{source}' to '{target}': target already exists"
                ));
            }
            columns[slot] = target.clone();
        }
        Operation::SumColumns { sources, target } => {
            require(columns, sources, "sum")?;
            add_column(columns, target);
        }
        Operation::CountLetter { source, target, .. } => {
            require(columns, std::slice::from_ref(source), "count letters in")?;
            add_column(columns, target);
        }
        Operation::DropColumns { columns_to_drop } => {
            require(columns, columns_to_drop, "drop")?;
            columns.retain(|name| !columns_to_drop.contains(name));
        }
    }
    Ok(())
}

fn require(columns: &[String], names: &[String], action: &str) -> Result<(), String> {
    let mut missing: Vec<&str> = Vec::new();
    for name in names {
        if !has_column(columns, name) && !missing.contains(&name.as_str()) {
            missing.push(name);
        }
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "cannot {action} missing column(s): {}",
            missing.join(", ")
        ))
    }
}

fn add_column(columns: &mut Vec<String>, name: &str) {
    if !has_column(columns, name) {
        columns.push(name.to_string());
    }
}

fn position(columns: &[String], name: &str) -> Option<usize> {
    columns.iter().position(|column| column == name)
}

fn has_column(columns: &[String], name: &str) -> bool {
    position(columns, name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    fn example_pipeline() -> Pipeline {
        Pipeline::new(vec![
            Operation::CountLetter {
                source: "word_1".into(),
                letter: 't',
                target: "t_count_1".into(),
            },
            Operation::CountLetter {
                source: "word_2".into(),
                letter: 'e',
                target: "e_count_2".into(),
            },
            Operation::SumColumns {
                sources: cols(&["t_count_1", "e_count_2"]),
                target: "t1_e2_total".into(),
            },
            Operation::RenameColumn {
                source: "t1_e2_total".into(),
                target: "letter_count".into(),
            },
            Operation::DropColumns {
                columns_to_drop: cols(&["t_count_1", "e_count_2"]),
            },
        ])
    }

    #[test]
    fn example_plan_is_clean() {
        let issues = check_plan(&example_pipeline(), &cols(&["word_1", "word_2"]));
        assert!(issues.is_empty(), "unexpected issues: {issues:?}");
    }

    #[test]
    fn failed_step_cascades_to_dependents() {
        let issues = check_plan(&example_pipeline(), &cols(&["word_1"]));
        let steps: Vec<usize> = issues.iter().map(|issue| issue.step_index).collect();
        // count on word_2 fails, so the sum, rename and drop that need its
        // output fail too
        assert_eq!(steps, vec![1, 2, 3, 4]);
        assert_eq!(
            issues[0].to_string(),
            "step 1 (count_letter): cannot count letters in missing column(s): word_2"
        );
    }

    #[test]
    fn rename_collision_is_reported() {
        let pipeline = Pipeline::new(vec![Operation::RenameColumn {
            source: "a".into(),
            target: "b".into(),
        }]);
        let issues = check_plan(&pipeline, &cols(&["a", "b"]));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, OperationKind::RenameColumn);
    }
}
