//! Configuration schema types
//!
//! This module defines the configuration structure that maps to the TOML file.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Largest visibility delay SQS accepts on a single message
pub const MAX_DELAY_SECONDS: i32 = 900;

/// Runtime environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        };
        f.write_str(name)
    }
}

/// Main exporter configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExporterConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: Environment,

    /// Snapshot sender notification settings
    pub snapshot_sender: SnapshotSenderConfig,

    /// Record validator settings
    #[serde(default)]
    pub validator: ValidatorConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ExporterConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.snapshot_sender.validate()?;
        self.validator.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name, reported in the log context
    #[serde(default = "default_application_name")]
    pub name: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        if self.name.trim().is_empty() {
            return Err("application.name cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_application_name(),
            log_level: default_log_level(),
        }
    }
}

/// Retry configuration for queue delivery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total number of send attempts, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Backoff multiplier applied after each retry
    #[serde(default = "default_backoff_multiplier")]
    pub multiplier: f64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Stop at the first rejected send instead of retrying every failure
    #[serde(default)]
    pub transient_only: bool,
}

impl RetryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("snapshot_sender.retry.max_attempts must be >= 1".to_string());
        }
        if !(self.multiplier >= 1.0) {
            return Err(format!(
                "snapshot_sender.retry.multiplier must be >= 1.0, got {}",
                self.multiplier
            ));
        }
        if self.initial_delay_ms > self.max_delay_ms {
            return Err(format!(
                "snapshot_sender.retry.initial_delay_ms ({}) must not exceed max_delay_ms ({})",
                self.initial_delay_ms, self.max_delay_ms
            ));
        }
        Ok(())
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            multiplier: default_backoff_multiplier(),
            max_delay_ms: default_max_delay_ms(),
            transient_only: false,
        }
    }
}

/// Snapshot sender notification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotSenderConfig {
    /// Send notifications at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// URL of the snapshot sender queue
    pub queue_url: String,

    /// AWS region of the queue
    #[serde(default = "default_region")]
    pub region: String,

    /// Endpoint override (e.g. localstack)
    #[serde(default)]
    pub endpoint_url: Option<String>,

    /// Export date (`YYYY-MM-DD`)
    pub export_date: String,

    /// Reprocess previously exported files
    #[serde(default)]
    pub reprocess_files: bool,

    /// Ask the snapshot sender to shut down once it has processed the run
    #[serde(default = "default_true")]
    pub shutdown_flag: bool,

    /// Snapshot type (full or incremental)
    #[serde(default = "default_snapshot_type")]
    pub snapshot_type: String,

    /// Topic the export is taken from
    pub topic_name: String,

    /// Correlation id of the run, when supplied up front
    #[serde(default)]
    pub correlation_id: Option<String>,

    /// Visibility delay applied to every message
    #[serde(default = "default_delay_seconds")]
    pub delay_seconds: i32,

    /// Retry settings
    #[serde(default)]
    pub retry: RetryConfig,
}

impl SnapshotSenderConfig {
    fn validate(&self) -> Result<(), String> {
        if NaiveDate::parse_from_str(&self.export_date, "%Y-%m-%d").is_err() {
            return Err(format!(
                "snapshot_sender.export_date must be a YYYY-MM-DD date, got '{}'",
                self.export_date
            ));
        }

        let valid_types = ["full", "incremental"];
        if !valid_types.contains(&self.snapshot_type.as_str()) {
            return Err(format!(
                "Invalid snapshot_sender.snapshot_type '{}'. Must be one of: {}",
                self.snapshot_type,
                valid_types.join(", ")
            ));
        }

        if self.topic_name.trim().is_empty() {
            return Err("snapshot_sender.topic_name cannot be empty".to_string());
        }

        if self.enabled {
            url::Url::parse(&self.queue_url).map_err(|e| {
                format!(
                    "snapshot_sender.queue_url '{}' is not a valid URL: {e}",
                    self.queue_url
                )
            })?;
        }

        if let Some(endpoint) = &self.endpoint_url {
            url::Url::parse(endpoint).map_err(|e| {
                format!("snapshot_sender.endpoint_url '{endpoint}' is not a valid URL: {e}")
            })?;
        }

        if !(0..=MAX_DELAY_SECONDS).contains(&self.delay_seconds) {
            return Err(format!(
                "snapshot_sender.delay_seconds must be between 0 and {MAX_DELAY_SECONDS}, got {}",
                self.delay_seconds
            ));
        }

        self.retry.validate()
    }
}

/// Record validator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Type reported for records without an `@type` field
    #[serde(default = "default_record_type")]
    pub default_type: String,
}

impl ValidatorConfig {
    fn validate(&self) -> Result<(), String> {
        if self.default_type.trim().is_empty() {
            return Err("validator.default_type cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            default_type: default_record_type(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log file path
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,

    /// Emit console logs as JSON lines
    #[serde(default)]
    pub console_json: bool,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path is required when local_enabled = true".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
            console_json: false,
        }
    }
}

// Default value functions
fn default_application_name() -> String {
    "snapshot-export".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_region() -> String {
    "eu-west-2".to_string()
}

fn default_snapshot_type() -> String {
    "full".to_string()
}

fn default_delay_seconds() -> i32 {
    30
}

fn default_max_attempts() -> u32 {
    10
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_max_delay_ms() -> u64 {
    30000
}

fn default_record_type() -> String {
    "TYPE_NOT_SET".to_string()
}

fn default_local_path() -> String {
    "/var/log/snapshot-export".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
