//! Domain models and types for the exporter.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Record identifiers** ([`RecordId`]) with the CRC-32 prefix parsed out
//! - **Source records** ([`SourceRecord`], [`EncryptionBlock`])
//! - **Notifications** ([`ExportNotification`]) for the snapshot sender
//! - **Error types** ([`ExportError`], [`BadDecryptedData`], [`QueueError`], [`DeliveryError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! Fallible operations return [`Result<T, ExportError>`]:
//!
//! ```rust
//! use snapshot_export::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = snapshot_export::config::load_config("snapshot-export.toml")?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod notification;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{
    BadDecryptedData, DecryptedDataFault, DeliveryError, ExportError, QueueError, RetryError,
};
pub use ids::RecordId;
pub use notification::{ExportNotification, NotificationHeader};
pub use record::{EncryptionBlock, SourceRecord};
pub use result::Result;
