//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for the exporter using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// snapshot-export - Decrypted record validation and snapshot sender notification
#[derive(Parser, Debug)]
#[command(name = "snapshot-export")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        default_value = "snapshot-export.toml",
        env = "SNAPSHOT_EXPORT_CONFIG"
    )]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SNAPSHOT_EXPORT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate decrypted records from a JSON Lines file
    CheckRecords(commands::check::CheckArgs),

    /// Notify the snapshot sender that an export run finished
    Notify(commands::notify::NotifyArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Commands {
    /// Name used for the `component` field of the run's log context
    pub fn component(&self) -> &'static str {
        match self {
            Commands::CheckRecords(_) => "check-records",
            Commands::Notify(_) => "notify",
            Commands::ValidateConfig(_) => "validate-config",
            Commands::Init(_) => "init",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_check_records() {
        let cli = Cli::parse_from(["snapshot-export", "check-records", "--input", "records.jsonl"]);
        assert_eq!(cli.config, "snapshot-export.toml");
        match cli.command {
            Commands::CheckRecords(args) => assert_eq!(args.input, "records.jsonl"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_notify() {
        let cli = Cli::parse_from([
            "snapshot-export",
            "notify",
            "--files-exported",
            "4",
            "--s3-folder",
            "db.core.claimant",
            "--correlation-id",
            "run-1",
        ]);
        match cli.command {
            Commands::Notify(args) => {
                assert_eq!(args.files_exported, 4);
                assert_eq!(args.s3_folder.as_deref(), Some("db.core.claimant"));
                assert_eq!(args.correlation_id.as_deref(), Some("run-1"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from([
            "snapshot-export",
            "--config",
            "custom.toml",
            "validate-config",
        ]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["snapshot-export", "--log-level", "debug", "init"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert_eq!(cli.command.component(), "init");
    }

    #[test]
    fn test_cli_notify_requires_count() {
        assert!(Cli::try_parse_from(["snapshot-export", "notify"]).is_err());
    }
}
