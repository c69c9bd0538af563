//! CLI argument structs for all commands.

use clap::Parser;
use std::path::PathBuf;

/// Validate a cat ID argument (non-blank, trimmed).
fn validate_cat_id(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("Cat ID cannot be empty".to_string());
    }
    Ok(trimmed.to_string())
}

/// Arguments for the `coefficient` command
#[derive(Parser, Debug, Clone)]
pub struct CoefficientArgs {
    /// Cat to compute the inbreeding coefficient for
    #[arg(value_parser = validate_cat_id)]
    pub cat: String,

    /// JSONL pedigree file
    #[arg(short, long)]
    pub pedigree: PathBuf,

    /// Generations above the cat to consider (default from config, 10)
    #[arg(short, long, value_parser = clap::value_parser!(usize))]
    pub depth: Option<usize>,

    /// Show common ancestors and every contributing path pair
    #[arg(short, long)]
    pub explain: bool,
}

/// Arguments for the `relationship` command
#[derive(Parser, Debug, Clone)]
pub struct RelationshipArgs {
    /// First cat
    #[arg(value_parser = validate_cat_id)]
    pub first: String,

    /// Second cat
    #[arg(value_parser = validate_cat_id)]
    pub second: String,

    /// JSONL pedigree file
    #[arg(short, long)]
    pub pedigree: PathBuf,

    /// Generations above each cat to consider (default from config, 10)
    #[arg(short, long, value_parser = clap::value_parser!(usize))]
    pub depth: Option<usize>,
}

/// Arguments for the `ancestors` command
#[derive(Parser, Debug, Clone)]
pub struct AncestorsArgs {
    /// Cat whose ancestors to list
    #[arg(value_parser = validate_cat_id)]
    pub cat: String,

    /// JSONL pedigree file
    #[arg(short, long)]
    pub pedigree: PathBuf,

    /// Generations to list (default from config, 10)
    #[arg(short, long, value_parser = clap::value_parser!(usize))]
    pub depth: Option<usize>,
}
