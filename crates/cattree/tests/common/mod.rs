//! Common test utilities shared across integration tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Full siblings mated together; the kit's coefficient is 0.25.
pub const FULL_SIBLINGS: &str = r#"{"cat_id": "kit", "mother_id": "sister", "father_id": "brother"}
{"cat_id": "sister", "mother_id": "dam", "father_id": "sire"}
{"cat_id": "brother", "mother_id": "dam", "father_id": "sire"}
{"cat_id": "dam", "mother_id": null, "father_id": null}
{"cat_id": "sire"}
"#;

/// Write a pedigree file into `dir` and return its path
pub fn write_pedigree(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("cats.jsonl");
    std::fs::write(&path, contents).expect("Failed to write pedigree file");
    path
}

/// Run the cattree binary in the specified directory
pub fn run_cattree_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cattree"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute cattree binary")
}

/// Parse stdout of a successful run as JSON
pub fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "cattree failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}
