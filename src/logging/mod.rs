//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output, plain or JSON lines
//! - Local JSON file logging with rotation
//! - A per-run [`LogContext`] attached as a root span
//!
//! # Example
//!
//! ```no_run
//! use snapshot_export::logging::{init_logging, LogContext};
//! use snapshot_export::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! let context = LogContext::new(
//!     "db.core.claimant",
//!     "host-1",
//!     "production",
//!     "snapshot-export",
//!     "0.3.0",
//!     "cli",
//! );
//! let _run = context.span().entered();
//! tracing::info!("Application started");
//! ```

pub mod context;
pub mod structured;

// Re-export commonly used items
pub use context::LogContext;
pub use structured::{init_logging, LoggingGuard};

/// Log a decrypted record that was skipped
///
/// # Example
///
/// ```no_run
/// use snapshot_export::log_record_skipped;
/// use snapshot_export::domain::{BadDecryptedData, DecryptedDataFault};
///
/// let error = BadDecryptedData {
///     record_id: "00001".to_string(),
///     database: "db".to_string(),
///     collection: "collection".to_string(),
///     fault: DecryptedDataFault::MissingIdentity,
/// };
/// log_record_skipped!(&error);
/// ```
#[macro_export]
macro_rules! log_record_skipped {
    ($error:expr) => {
        tracing::warn!(
            record_id = %$error.record_id,
            db_name = %$error.database,
            collection_name = %$error.collection,
            reason = %$error.fault,
            "{}",
            $error
        );
    };
}

/// Log a notification handed to the queue
///
/// # Example
///
/// ```no_run
/// use snapshot_export::log_notification_sent;
///
/// log_notification_sent!("files_exported", "https://sqs/queue", 1);
/// ```
#[macro_export]
macro_rules! log_notification_sent {
    ($kind:expr, $queue_url:expr, $attempts:expr) => {
        tracing::info!(
            kind = $kind,
            queue_url = %$queue_url,
            attempts = $attempts,
            "Snapshot sender notified"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use snapshot_export::log_error_with_context;
/// use snapshot_export::domain::ExportError;
///
/// let error = ExportError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use snapshot_export::log_retry_attempt;
///
/// log_retry_attempt!(2, 3, "Connection timeout");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = %$reason,
            "Retrying operation"
        );
    };
}
