//! SiteProfiler CLI — profile a company website into a knowledge record.
//!
//! Fetches the site, runs the heuristic extractors, and emits the record
//! as camelCase JSON.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
