//! pncp: fetch and summarize PNCP contract searches.
//!
//! Usage:
//!   pncp fetch [--output contratos.csv]
//!   pncp report [--uf PE --year 2023 ...] [--top 10] [--export data.csv]
//!   pncp options
//!   pncp glossary

mod cli;
mod commands;
mod config;
mod logging;
mod paths;

use anyhow::Result;
use clap::Parser;

use cli::Cli;
use cli::Commands;
use config::AppConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.log_file.as_deref())?;

    let config = match cli.config {
        Some(ref path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    match cli.command {
        Commands::Fetch(args) => commands::fetch::run(&config, args).await,
        Commands::Report(args) => commands::report::run(&config, args).await,
        Commands::Options => commands::options::run(&config).await,
        Commands::Glossary => {
            commands::glossary::run();
            Ok(())
        }
    }
}
