//! segrule command-line entry point

use clap::Parser;
use segrule_cli::commands::Commands;

/// Rule-driven sentence segmentation
#[derive(Debug, Parser)]
#[command(name = "segrule", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
