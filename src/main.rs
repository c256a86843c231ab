//! Redraft CLI entry point.

use clap::Parser;

use redraft::cli::commands;
use redraft::cli::{handle_error, service, Cli, Commands};
use redraft::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match service::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => handle_error(err, cli.json),
    };

    let _logger = match LogConfig::try_from(&config.logging)
        .map_err(anyhow::Error::from)
        .and_then(|log_config| LoggerImpl::init(&log_config))
    {
        Ok(logger) => logger,
        Err(err) => handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Humanize(args) => commands::humanize::execute(args, &config, cli.json).await,
        Commands::Detect(args) => commands::detect::execute(args, &config, cli.json).await,
        Commands::Actions(args) => commands::actions::execute(args, cli.json).await,
        Commands::Flow(args) => commands::flow::execute(args, &config, cli.json).await,
    };

    if let Err(err) = result {
        handle_error(err, cli.json);
    }
}
