//! Tessera command-line entry point

use anyhow::Result;
use clap::Parser;
use tessera_cli::commands::Commands;

/// Clean, segment and chunk extracted document text
#[derive(Debug, Parser)]
#[command(name = "tessera", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
