mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use bitext_core::config::{load_dotenv, Config};

use crate::cli::{Cli, Command};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // Before parsing, so clap's env fallbacks see values from .env.
    load_dotenv();
    let cli = Cli::parse();

    let config = match cli.profile.as_deref() {
        Some(profile) => Config::for_profile(profile),
        None => Config::from_env(),
    };
    config.log_summary();

    match cli.command {
        Command::Clean(args) => {
            info!(infile = %args.infile.display(), "Cleaning sentence pairs");
            commands::clean(args, &config)
        }
        Command::Export(args) => {
            info!(input = %args.in_path.display(), "Exporting table");
            commands::export(args, &config)
        }
        Command::Split(args) => {
            info!(input = %args.in_path.display(), "Splitting Parquet file");
            commands::split(args, &config)
        }
    }
}
