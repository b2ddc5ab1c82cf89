//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "snapshot-export.toml")]
    pub output: String,

    /// Include comments explaining every setting
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing snapshot-export configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your queue and run settings", self.output);
                println!("  2. Run: snapshot-export validate-config");
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to create configuration file: {e}");
                Ok(5)
            }
        }
    }

    fn generate_minimal_config() -> String {
        r#"environment = "development"

[application]
log_level = "info"

[snapshot_sender]
enabled = true
queue_url = "https://sqs.eu-west-2.amazonaws.com/123456789012/snapshot-sender"
export_date = "2020-06-05"
topic_name = "db.core.claimant"
snapshot_type = "full"

[snapshot_sender.retry]
max_attempts = 10
initial_delay_ms = 1000
multiplier = 2.0

[validator]
default_type = "TYPE_NOT_SET"

[logging]
local_enabled = false
"#
        .to_string()
    }

    fn generate_config_with_examples() -> String {
        r#"# snapshot-export Configuration File
#
# Values may reference environment variables with ${VAR_NAME}.
# Any setting can be overridden with SNAPSHOT_EXPORT_<SECTION>_<KEY>,
# e.g. SNAPSHOT_EXPORT_SNAPSHOT_SENDER_ENABLED=false

# development, staging or production (reported in every log line)
environment = "development"

[application]
# Application name reported in logs
name = "snapshot-export"

# trace, debug, info, warn or error
log_level = "info"

[snapshot_sender]
# Set to false to skip notifying the snapshot sender entirely
enabled = true

# Destination queue
queue_url = "https://sqs.eu-west-2.amazonaws.com/123456789012/snapshot-sender"
region = "eu-west-2"

# Endpoint override, e.g. for localstack
# endpoint_url = "http://localhost:4566"

# Run metadata carried in every notification
export_date = "2020-06-05"
topic_name = "db.core.claimant"
snapshot_type = "full"          # full or incremental
reprocess_files = false
shutdown_flag = true

# Correlation id of the run (defaults to CORRELATION_ID or a generated UUID)
# correlation_id = "${CORRELATION_ID}"

# Queue visibility delay for each message (0-900)
delay_seconds = 30

[snapshot_sender.retry]
# Attempts including the first one
max_attempts = 10

# Delay before the first retry, multiplied after each retry, capped at max_delay_ms
initial_delay_ms = 1000
multiplier = 2.0
max_delay_ms = 30000

# Every failed send is retried until max_attempts. Set to true to give up
# at once when the queue rejects the message (e.g. missing queue, access denied)
transient_only = false

[validator]
# Type reported for records without an "@type" field
default_type = "TYPE_NOT_SET"

[logging]
# Write JSON logs to a rolling file
local_enabled = false
local_path = "/var/log/snapshot-export"

# daily, hourly or never
local_rotation = "daily"

# Emit console logs as JSON lines
console_json = false
"#
        .to_string()
    }
}
