//! folio CLI entry point.

use anyhow::{Context, Result};
use clap::Parser;

use folio::cli::commands::{admin, cache, check, posts, projects, researches};
use folio::cli::{AppContext, Cli, Commands};
use folio::infrastructure::config::ConfigLoader;
use folio::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli).await {
        folio::cli::handle_error(err, json);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    let log_config = LogConfig::try_from(&config.logging).map_err(anyhow::Error::msg)?;
    let _logger = LoggerImpl::init(&log_config).context("Failed to initialize logging")?;

    let ctx = if cli.offline {
        AppContext::offline(&config).await?
    } else {
        AppContext::remote(&config)?
    };

    match cli.command {
        Commands::Posts(args) => posts::execute(args, &ctx, cli.json).await,
        Commands::Projects(args) => projects::execute(args, &ctx, cli.json).await,
        Commands::Researches(args) => researches::execute(args, &ctx, cli.json).await,
        Commands::Admin(args) => admin::execute(args, &ctx, cli.json).await,
        Commands::Cache(args) => cache::execute(args, &ctx, cli.json).await,
        Commands::Check => check::execute(&ctx, cli.json).await,
    }
}
