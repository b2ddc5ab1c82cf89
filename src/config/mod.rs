//! Configuration management for the exporter.
//!
//! # Overview
//!
//! Configuration is read from a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `SNAPSHOT_EXPORT_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (name, log level)
//! - [`SnapshotSenderConfig`] - Queue, run metadata and retry settings for the notification
//! - [`ValidatorConfig`] - Record validator settings
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! environment = "production"
//!
//! [application]
//! log_level = "info"
//!
//! [snapshot_sender]
//! queue_url = "https://sqs.eu-west-2.amazonaws.com/123456789012/snapshot-sender"
//! export_date = "2020-06-05"
//! topic_name = "db.core.claimant"
//! snapshot_type = "full"
//!
//! [snapshot_sender.retry]
//! max_attempts = 10
//! initial_delay_ms = 1000
//! multiplier = 2.0
//!
//! [validator]
//! default_type = "TYPE_NOT_SET"
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use snapshot_export::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("snapshot-export.toml")?;
//! println!("Queue: {}", config.snapshot_sender.queue_url);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_from_str};
pub use schema::{
    ApplicationConfig, Environment, ExporterConfig, LoggingConfig, RetryConfig,
    SnapshotSenderConfig, ValidatorConfig,
};
