//! Binary crate for the `cityweather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive search and configuration prompts
//! - Human-friendly output formatting

use std::process::ExitCode;

use clap::Parser;

mod cli;
mod configure;
mod logging;
mod prompt;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cmd = cli::Cli::parse();
    logging::init(cmd.verbose, cmd.is_interactive());
    cmd.run().await
}
