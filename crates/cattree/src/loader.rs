//! Resilient loading of pedigree records from JSONL files.
//!
//! Each non-empty line holds one [`PedigreeRecord`]:
//!
//! ```text
//! {"cat_id": "tom", "mother_id": "molly", "father_id": "felix"}
//! {"id": 17, "mother": -1, "father": null}
//! ```
//!
//! Lines that fail to parse are skipped and reported as [`LoadWarning`]s so
//! a single bad row never prevents the rest of a pedigree from loading.
//! Only I/O failures abort a load.

use crate::domain::PedigreeRecord;
use crate::error::Result;
use std::fmt;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// Non-fatal problems found while loading a pedigree file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// Line is not valid JSON.
    ///
    /// **Effect**: the line is skipped.
    MalformedJson {
        /// The 1-based line number
        line_number: usize,
        /// Parser error message
        error: String,
    },

    /// Line is valid JSON but not a pedigree record.
    ///
    /// **Effect**: the line is skipped.
    InvalidRecord {
        /// The 1-based line number
        line_number: usize,
        /// Why the record was rejected
        error: String,
    },
}

impl LoadWarning {
    /// Returns the line number associated with this warning.
    #[must_use]
    pub fn line_number(&self) -> usize {
        match self {
            Self::MalformedJson { line_number, .. } | Self::InvalidRecord { line_number, .. } => {
                *line_number
            }
        }
    }
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedJson { line_number, error } => {
                write!(f, "line {}: malformed JSON: {}", line_number, error)
            }
            Self::InvalidRecord { line_number, error } => {
                write!(f, "line {}: invalid record: {}", line_number, error)
            }
        }
    }
}

/// Load pedigree records from a JSONL file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub async fn load_pedigree(path: &Path) -> Result<(Vec<PedigreeRecord>, Vec<LoadWarning>)> {
    let file = File::open(path).await?;
    let (records, warnings) = read_pedigree(BufReader::new(file)).await?;

    tracing::debug!(
        path = %path.display(),
        records = records.len(),
        warnings = warnings.len(),
        "Loaded pedigree"
    );

    Ok((records, warnings))
}

/// Read pedigree records from any buffered async reader.
///
/// # Errors
///
/// Returns an error only if reading from `reader` fails.
pub async fn read_pedigree<R>(reader: R) -> Result<(Vec<PedigreeRecord>, Vec<LoadWarning>)>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut records = Vec::new();
    let mut warnings = Vec::new();
    let mut line_number = 0;

    while let Some(line) = lines.next_line().await? {
        line_number += 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let value: serde_json::Value = match serde_json::from_str(trimmed) {
            Ok(value) => value,
            Err(e) => {
                warnings.push(LoadWarning::MalformedJson {
                    line_number,
                    error: e.to_string(),
                });
                continue;
            }
        };

        match serde_json::from_value::<PedigreeRecord>(value) {
            Ok(record) => records.push(record),
            Err(e) => warnings.push(LoadWarning::InvalidRecord {
                line_number,
                error: e.to_string(),
            }),
        }
    }

    Ok((records, warnings))
}
