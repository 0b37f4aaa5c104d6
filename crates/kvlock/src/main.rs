//! kvlock - Entry Point
//!
//! Binary entry point for the `kvlock` command line tool.

use clap::Parser;
use kvlock::cli::{Cli, run};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let status = run(cli).await?;
    Ok(status.into())
}
