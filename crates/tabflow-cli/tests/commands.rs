//! Integration tests for the command layer.

use std::fs;
use std::path::PathBuf;

use serde_json::json;
use tempfile::TempDir;

use tabflow_cli::commands::{RunRequest, check_pipeline, list_kinds, run_pipeline};
use tabflow_core::{FailurePolicy, OperationKind, StepStatus};
use tabflow_ingest::read_csv_table;

const WORDS_CSV: &str = "word_1,word_2\n\
                         terrible,excellent\n\
                         totter,strident\n\
                         banana,oblong\n\
                         thick,regular\n\
                         transparent,three\n";

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

fn example_definition() -> String {
    json!([
        {"function": "count_letter", "source": "word_1", "letter": "t", "target": "t_count_1"},
        {"function": "count_letter", "source": "word_2", "letter": "e", "target": "e_count_2"},
        {"function": "sum_columns", "sources": ["t_count_1", "e_count_2"], "target": "t1_e2_total"},
        {"function": "rename_column", "source": "t1_e2_total", "target": "letter_count"},
        {"function": "drop_columns", "columns_to_drop": ["t_count_1", "e_count_2"]}
    ])
    .to_string()
}

fn request(dir: &TempDir, definition: &str, policy: FailurePolicy) -> RunRequest {
    RunRequest {
        pipeline: write_file(dir, "pipeline.json", definition),
        input: write_file(dir, "words.csv", WORDS_CSV),
        output: Some(dir.path().join("out").join("result.csv")),
        failure_policy: policy,
    }
}

#[test]
fn run_writes_transformed_table() {
    let dir = TempDir::new().unwrap();
    let request = request(&dir, &example_definition(), FailurePolicy::Continue);

    let report = run_pipeline(&request).unwrap();
    assert_eq!(report.failed_count(), 0);

    let written = read_csv_table(request.output.as_ref().unwrap()).unwrap();
    let names: Vec<String> = written
        .get_column_names()
        .into_iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(names, vec!["word_1", "word_2", "letter_count"]);
    let counts: Vec<Option<i64>> = written
        .column("letter_count")
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(counts, vec![Some(4), Some(4), Some(0), Some(2), Some(4)]);
}

#[test]
fn run_continues_past_failed_step() {
    let dir = TempDir::new().unwrap();
    let definition = json!([
        {"function": "rename_column", "source": "absent", "target": "x"},
        {"function": "count_letter", "source": "word_1", "letter": "a", "target": "a_count"}
    ])
    .to_string();
    let request = request(&dir, &definition, FailurePolicy::Continue);

    let report = run_pipeline(&request).unwrap();
    assert!(matches!(report.steps[0].status, StepStatus::Failed { .. }));
    assert_eq!(report.steps[1].status, StepStatus::Applied);
    assert!(request.output.as_ref().unwrap().exists());
}

#[test]
fn fail_fast_reports_the_failed_step_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let definition = json!([
        {"function": "sum_columns", "sources": ["word_1"], "target": "total"}
    ])
    .to_string();
    let request = request(&dir, &definition, FailurePolicy::Abort);

    let err = run_pipeline(&request).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.starts_with("pipeline aborted: step 0 (sum_columns) failed"));
    assert!(!request.output.as_ref().unwrap().exists());
}

#[test]
fn construction_fault_fails_the_run() {
    let dir = TempDir::new().unwrap();
    let definition = json!([{"function": "rename_column", "source": "word_1"}]).to_string();
    let request = request(&dir, &definition, FailurePolicy::Continue);

    let err = run_pipeline(&request).unwrap_err();
    assert!(format!("{err:#}").contains("record 0 (rename_column): missing field `target`"));
}

#[test]
fn check_without_input_lists_operations() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "pipeline.json", &example_definition());

    let outcome = check_pipeline(&path, None).unwrap();
    assert_eq!(outcome.pipeline.len(), 5);
    assert!(outcome.input_columns.is_none());
    assert!(outcome.is_clean());
}

#[test]
fn check_with_input_reports_plan_issues() {
    let dir = TempDir::new().unwrap();
    let pipeline = write_file(&dir, "pipeline.json", &example_definition());
    let input = write_file(&dir, "narrow.csv", "word_1\nterrible\n");

    let outcome = check_pipeline(&pipeline, Some(&input)).unwrap();
    assert_eq!(outcome.input_columns, Some(vec!["word_1".to_string()]));
    let messages: Vec<String> = outcome.issues.iter().map(ToString::to_string).collect();
    insta::assert_json_snapshot!(messages, @r#"
    [
      "step 1 (count_letter): cannot count letters in missing column(s): word_2",
      "step 2 (sum_columns): cannot sum missing column(s): e_count_2",
      "step 3 (rename_column): cannot rename missing column 't1_e2_total'",
      "step 4 (drop_columns): cannot drop missing column(s): e_count_2"
    ]
    "#);
}

#[test]
fn kinds_cover_every_operation() {
    let kinds = list_kinds();
    let names: Vec<&str> = kinds.iter().map(|kind| kind.name).collect();
    assert_eq!(
        names,
        OperationKind::ALL
            .iter()
            .map(|kind| kind.name())
            .collect::<Vec<_>>()
    );
    let count_letter = &kinds[2];
    assert_eq!(count_letter.fields, vec!["source", "letter", "target"]);
}
