// snapshot-export - Decrypted record validation and snapshot sender notification
// Copyright (c) 2025 Snapshot Export Contributors
// Licensed under the MIT License

use clap::Parser;
use snapshot_export::cli::{Cli, Commands};
use snapshot_export::config::{load_config, ExporterConfig, LoggingConfig};
use snapshot_export::logging::{init_logging, LogContext};
use std::path::Path;
use std::process;
use tracing::Instrument;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logging settings come from the config file when it is usable; commands
    // report configuration errors themselves.
    let config = if Path::new(&cli.config).exists() {
        load_config(&cli.config).ok()
    } else {
        None
    };

    let log_level = cli
        .log_level
        .clone()
        .or_else(|| config.as_ref().map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    let logging_config = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_else(LoggingConfig::default);

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    let context = log_context(config.as_ref(), &cli.command);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "snapshot-export - Decrypted record validation and snapshot sender notification"
    );

    let exit_code = match execute_command(&cli).instrument(context.span()).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    // Flush buffered file logs before exiting
    drop(guard);
    process::exit(exit_code);
}

fn log_context(config: Option<&ExporterConfig>, command: &Commands) -> LogContext {
    match config {
        Some(config) => LogContext::from_config(config, command.component()),
        None => LogContext::new(
            "",
            std::env::var("HOSTNAME").unwrap_or_else(|_| "unknown".to_string()),
            "development",
            "snapshot-export",
            env!("CARGO_PKG_VERSION"),
            command.component(),
        ),
    }
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::CheckRecords(args) => args.execute(&cli.config).await,
        Commands::Notify(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
