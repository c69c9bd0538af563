//! Cattree CLI binary.

use anyhow::Result;
use cattree::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the cattree CLI.
///
/// Uses tokio's current_thread runtime; the only async work is file I/O.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    // Can be controlled via RUST_LOG environment variable
    // Example: RUST_LOG=cattree=debug cargo run -- coefficient tom -p cats.jsonl
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cattree=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting cattree CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Cattree CLI completed successfully");
    Ok(())
}
