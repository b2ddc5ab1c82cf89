//! Domain error types
//!
//! This module defines the error hierarchy for the exporter.
//! All errors are domain-specific and don't expose third-party types.

use std::fmt;
use thiserror::Error;

/// Main exporter error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A decrypted record could not be used
    #[error(transparent)]
    BadDecryptedData(#[from] BadDecryptedData),

    /// The snapshot sender notification could not be delivered
    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),
}

/// Why a decrypted record was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecryptedDataFault {
    /// The payload is not a parseable JSON object
    MalformedPayload,

    /// The payload parsed but has no `_id` key
    MissingIdentity,
}

impl DecryptedDataFault {
    /// Reason text embedded in the rejection message
    pub fn reason(&self) -> &'static str {
        match self {
            DecryptedDataFault::MalformedPayload => {
                "Exception occurred while parsing decrypted db object"
            }
            DecryptedDataFault::MissingIdentity => "id not found in the decrypted db object",
        }
    }
}

impl fmt::Display for DecryptedDataFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// A decrypted record that failed validation
///
/// Carries enough context to identify the record in logs: the
/// checksum-stripped id, its source database and collection, and the fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Exception in processing the decrypted record id '{record_id}' in db '{database}' in collection '{collection}' with the reason '{fault}'"
)]
pub struct BadDecryptedData {
    /// Checksum-stripped record id
    pub record_id: String,

    /// Source database name
    pub database: String,

    /// Source collection name
    pub collection: String,

    /// Rejection cause
    pub fault: DecryptedDataFault,
}

/// Errors raised by a queue client for a single send attempt
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// Connectivity, throttling or server-side failure; worth retrying
    #[error("Transient queue failure: {0}")]
    Transient(String),

    /// The queue refused the request; retrying will not help
    #[error("Queue rejected message: {0}")]
    Rejected(String),
}

impl QueueError {
    /// Whether the failed attempt may succeed if repeated
    pub fn is_transient(&self) -> bool {
        matches!(self, QueueError::Transient(_))
    }
}

/// Outcome of an operation that a retry policy gave up on
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RetryError<E>
where
    E: std::error::Error + 'static,
{
    /// Every attempt failed transiently; `last` is the final failure, unmodified
    #[error("gave up after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        #[source]
        last: E,
    },

    /// An attempt failed with a non-retryable error
    #[error("attempt {attempt} failed permanently: {error}")]
    Permanent {
        attempt: u32,
        #[source]
        error: E,
    },
}

impl<E> RetryError<E>
where
    E: std::error::Error + 'static,
{
    /// Number of attempts made before giving up
    pub fn attempts(&self) -> u32 {
        match self {
            RetryError::Exhausted { attempts, .. } => *attempts,
            RetryError::Permanent { attempt, .. } => *attempt,
        }
    }

    /// The error returned by the final attempt
    pub fn last_error(&self) -> &E {
        match self {
            RetryError::Exhausted { last, .. } => last,
            RetryError::Permanent { error, .. } => error,
        }
    }

    /// Consumes self and returns the final attempt's error
    pub fn into_last_error(self) -> E {
        match self {
            RetryError::Exhausted { last, .. } => last,
            RetryError::Permanent { error, .. } => error,
        }
    }
}

/// Failure to deliver a snapshot sender notification
pub type DeliveryError = RetryError<QueueError>;

// Conversion from toml parse errors
impl From<toml::de::Error> for ExportError {
    fn from(err: toml::de::Error) -> Self {
        ExportError::Configuration(format!("TOML parse error: {err}"))
    }
}
