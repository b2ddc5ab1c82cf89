//! Core business logic for the exporter.
//!
//! # Modules
//!
//! - [`validation`] - Decrypted payload validation and per-batch summaries
//! - [`notify`] - Snapshot sender notification with retry
//! - [`status`] - Export status reporting
//! - [`export`] - Run completion: final notification and terminal status
//!
//! # Workflow
//!
//! 1. **Validate**: each decrypted record goes through [`validation::Validator`];
//!    bad records are logged and skipped
//! 2. **Report**: the driver signals each exported file to the status service
//! 3. **Complete**: [`export::RunCompletion`] notifies the snapshot sender once
//!    and records the terminal status
//!
//! # Example
//!
//! ```rust,no_run
//! use snapshot_export::adapters::queue::SqsQueueClient;
//! use snapshot_export::config::load_config;
//! use snapshot_export::core::export::RunCompletion;
//! use snapshot_export::core::notify::SnapshotSenderNotifier;
//! use snapshot_export::core::status::ExportStatusTracker;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("snapshot-export.toml")?;
//! let queue = Arc::new(SqsQueueClient::from_config(&config.snapshot_sender).await);
//! let notifier = SnapshotSenderNotifier::from_config(queue, &config.snapshot_sender, "run-1");
//! let tracker = ExportStatusTracker::new("run-1");
//!
//! RunCompletion::new(&notifier, &tracker).finish(0, "").await?;
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod notify;
pub mod status;
pub mod validation;
