use std::fs;
use std::path::PathBuf;

use tabflow_ingest::{IngestError, load_definition, read_csv_table};
use tempfile::TempDir;

fn temp_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn loads_definition_file() {
    let dir = TempDir::new().unwrap();
    let path = temp_file(
        &dir,
        "pipeline.json",
        r#"[
            {"function": "count_letter", "source": "word_1", "letter": "t", "target": "t_count_1"},
            {"function": "drop_columns", "columns_to_drop": ["t_count_1"]}
        ]"#,
    );

    let records = load_definition(&path).expect("load definition");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].str_field("source").unwrap(), "word_1");
    assert_eq!(
        records[1].str_list_field("columns_to_drop").unwrap(),
        vec!["t_count_1"]
    );
}

#[test]
fn missing_definition_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = load_definition(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, IngestError::Io { .. }));
}

#[test]
fn reads_csv_file() {
    let dir = TempDir::new().unwrap();
    let path = temp_file(
        &dir,
        "words.csv",
        "word_1,word_2\nterrible,excellent\ntotter,strident\nbanana,oblong\n",
    );

    let df = read_csv_table(&path).expect("read csv");
    assert_eq!(df.shape(), (3, 2));
    let word_2: Vec<Option<&str>> = df
        .column("word_2")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(
        word_2,
        vec![Some("excellent"), Some("strident"), Some("oblong")]
    );
}

#[test]
fn missing_csv_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = read_csv_table(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, IngestError::Io { .. }));
    assert!(err.to_string().contains("absent.csv"));
}
