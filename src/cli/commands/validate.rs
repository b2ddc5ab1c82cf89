//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as part of loading
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let sender = &config.snapshot_sender;
        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Application: {}", config.application.name);
        println!("  Environment: {}", config.environment);
        println!("  Log Level: {}", config.application.log_level);
        println!("  Snapshot Sender Enabled: {}", sender.enabled);
        println!("  Queue URL: {}", sender.queue_url);
        println!("  Region: {}", sender.region);
        if let Some(endpoint) = &sender.endpoint_url {
            println!("  Endpoint Override: {endpoint}");
        }
        println!("  Topic: {}", sender.topic_name);
        println!("  Export Date: {}", sender.export_date);
        println!("  Snapshot Type: {}", sender.snapshot_type);
        println!("  Reprocess Files: {}", sender.reprocess_files);
        println!("  Shutdown Flag: {}", sender.shutdown_flag);
        println!(
            "  Retry: {} attempts, {}ms initial delay, x{} backoff (max {}ms)",
            sender.retry.max_attempts,
            sender.retry.initial_delay_ms,
            sender.retry.multiplier,
            sender.retry.max_delay_ms
        );
        println!("  Retry Transient Only: {}", sender.retry.transient_only);
        println!("  Default Record Type: {}", config.validator.default_type);
        println!();
        Ok(0)
    }
}
