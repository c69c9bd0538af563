//! Integration tests for resilient pedigree loading.
//!
//! # Test Coverage
//!
//! - Mixed id formats and "no parent" markers in one file
//! - Corrupted lines are skipped with a warning per line
//! - Loaded records build the same graph as in-memory records
//! - Missing files are an error

use cattree::domain::{CatId, PedigreeRecord};
use cattree::error::Error;
use cattree::graph::AncestryGraph;
use cattree::inbreeding_coefficient;
use cattree::loader::{load_pedigree, LoadWarning};
use std::io::Write;
use tempfile::NamedTempFile;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_temp_jsonl_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

// =============================================================================
// Loading Tests
// =============================================================================

#[tokio::test]
async fn test_load_mixed_id_formats() {
    let file = create_temp_jsonl_file(
        r#"{"cat_id": 17, "mother_id": 4, "father_id": -1}
{"id": "4", "mother": "-1", "father": ""}
{"cat_id": "tom", "mother_id": null}
"#,
    );

    let (records, warnings) = load_pedigree(file.path()).await.unwrap();

    assert!(warnings.is_empty());
    assert_eq!(
        records,
        vec![
            PedigreeRecord::new("17", Some(CatId::new("4")), None),
            PedigreeRecord::founder("4"),
            PedigreeRecord::founder("tom"),
        ]
    );
}

#[tokio::test]
async fn test_load_skips_corrupted_lines() {
    let file = create_temp_jsonl_file(
        r#"{"cat_id": "kit", "mother_id": "sister", "father_id": "brother"}
{"cat_id": "sister", "mother_id": "dam", "father_id": "sire"
{"cat_id": "", "mother_id": "dam"}
{"mother_id": "dam", "father_id": "sire"}

{"cat_id": "sister", "mother_id": "dam", "father_id": "sire"}
{"cat_id": "brother", "mother_id": "dam", "father_id": "sire"}
"#,
    );

    let (records, warnings) = load_pedigree(file.path()).await.unwrap();

    assert_eq!(records.len(), 3);
    let lines: Vec<usize> = warnings.iter().map(LoadWarning::line_number).collect();
    assert_eq!(lines, vec![2, 3, 4]);
    assert!(matches!(warnings[0], LoadWarning::MalformedJson { .. }));
    assert!(matches!(warnings[1], LoadWarning::InvalidRecord { .. }));
    assert!(matches!(warnings[2], LoadWarning::InvalidRecord { .. }));

    // The surviving records still describe a full sibling mating.
    let graph = AncestryGraph::build(&records);
    assert_eq!(inbreeding_coefficient(&graph, &CatId::new("kit")), 0.25);
}

#[tokio::test]
async fn test_loaded_records_match_in_memory_build() {
    let file = create_temp_jsonl_file(
        r#"{"cat_id": "kit", "mother_id": "dam", "father_id": "sire"}
{"cat_id": "dam", "mother_id": "queen", "father_id": "tom-a"}
{"cat_id": "sire", "mother_id": "queen", "father_id": "tom-b"}
"#,
    );

    let (records, _) = load_pedigree(file.path()).await.unwrap();
    let loaded = AncestryGraph::build(&records);
    let built = AncestryGraph::build([
        PedigreeRecord::with_parents("kit", "dam", "sire"),
        PedigreeRecord::with_parents("dam", "queen", "tom-a"),
        PedigreeRecord::with_parents("sire", "queen", "tom-b"),
    ]);

    assert_eq!(loaded.edges(), built.edges());
    assert_eq!(loaded.cats(), built.cats());
}

#[tokio::test]
async fn test_load_empty_file() {
    let file = create_temp_jsonl_file("");

    let (records, warnings) = load_pedigree(file.path()).await.unwrap();

    assert!(records.is_empty());
    assert!(warnings.is_empty());
}

#[tokio::test]
async fn test_load_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_pedigree(&dir.path().join("absent.jsonl")).await;

    assert!(matches!(result, Err(Error::Io(_))));
}
