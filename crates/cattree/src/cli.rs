//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for cattree using clap's derive API.
//!
//! # Commands
//!
//! - `coefficient`: Inbreeding coefficient of one cat
//! - `relationship`: Coefficient of relationship between two cats
//! - `ancestors`: List a cat's ancestors by generation
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//! - `--config`: Path to a YAML configuration file
//!
//! # Example
//!
//! ```bash
//! cattree coefficient tom --pedigree cats.jsonl --explain
//! cattree relationship tom tabby --pedigree cats.jsonl --depth 6
//! cattree ancestors tom --pedigree cats.jsonl --json
//! ```

mod args;
mod execute;

pub use args::{AncestorsArgs, CoefficientArgs, RelationshipArgs};

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::CattreeConfig;
use crate::output::OutputMode;

/// Cattree - pedigree analysis for cat breeding records
///
/// Computes inbreeding and relationship coefficients from JSONL pedigree
/// files using Wright's path method.
#[derive(Parser, Debug)]
#[command(name = "cattree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./cattree.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compute the inbreeding coefficient of a cat
    ///
    /// Loads the cat's pedigree up to the configured depth and sums Wright's
    /// path contributions over the ancestors both parents share.
    Coefficient(CoefficientArgs),

    /// Compute the coefficient of relationship between two cats
    Relationship(RelationshipArgs),

    /// List the ancestors of a cat by generation
    Ancestors(AncestorsArgs),
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the output mode based on the --json flag
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        }
    }

    /// Execute the parsed command
    pub async fn execute(&self) -> Result<()> {
        let current_dir = std::env::current_dir()?;
        let config = CattreeConfig::discover(self.config.as_deref(), &current_dir).await?;
        let mode = self.output_mode();

        match &self.command {
            Commands::Coefficient(args) => execute::execute_coefficient(args, &config, mode).await,
            Commands::Relationship(args) => {
                execute::execute_relationship(args, &config, mode).await
            }
            Commands::Ancestors(args) => execute::execute_ancestors(args, &config, mode).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coefficient() {
        let cli = Cli::try_parse_from([
            "cattree",
            "coefficient",
            "tom",
            "--pedigree",
            "cats.jsonl",
            "--depth",
            "4",
            "--explain",
        ])
        .unwrap();

        match cli.command {
            Commands::Coefficient(args) => {
                assert_eq!(args.cat, "tom");
                assert_eq!(args.pedigree, PathBuf::from("cats.jsonl"));
                assert_eq!(args.depth, Some(4));
                assert!(args.explain);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_json_after_subcommand() {
        let cli = Cli::try_parse_from([
            "cattree",
            "relationship",
            "tom",
            "tabby",
            "-p",
            "cats.jsonl",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.output_mode(), OutputMode::Json);
    }

    #[test]
    fn test_parse_requires_pedigree() {
        let result = Cli::try_parse_from(["cattree", "ancestors", "tom"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_empty_cat_id() {
        let result = Cli::try_parse_from(["cattree", "ancestors", "  ", "-p", "cats.jsonl"]);
        assert!(result.is_err());
    }
}
