// snapshot-export - Decrypted record validation and snapshot sender notification
// Copyright (c) 2025 Snapshot Export Contributors
// Licensed under the MIT License

//! # snapshot-export
//!
//! Final stages of a database snapshot export: checking decrypted records
//! before they are written out, and telling the downstream snapshot sender
//! that a run has finished.
//!
//! ## Overview
//!
//! This library provides:
//! - **Validation** of decrypted records: parse the payload, require an `_id`,
//!   and derive the record type from `@type`
//! - **Notification** of the snapshot sender over SQS, with one message per run
//! - **Retry** of transient queue failures under an explicit [`core::notify::RetryPolicy`]
//! - **Status reporting** of the run's terminal state
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (validation, notification, retry, status, run completion)
//! - [`adapters`] - External integrations (SQS)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and run context
//!
//! ## Validating a record
//!
//! ```rust
//! use snapshot_export::core::validation::Validator;
//! use snapshot_export::domain::{EncryptionBlock, RecordId, SourceRecord};
//!
//! let record = SourceRecord::new(
//!     RecordId::from_identifier(b"00001".to_vec()),
//!     10,
//!     EncryptionBlock::new(
//!         "keyEncryptionKeyId",
//!         "initialisationVector",
//!         "encryptedEncryptionKey",
//!     ),
//!     "db",
//!     "collection",
//!     "2019-07-04T07:27:35.104+0000",
//! );
//!
//! let validator = Validator::new("TYPE_NOT_SET");
//! let validated = validator
//!     .validate(&record, r#"{"_id":{"someId":"1"},"@type":"MONGO_UPDATE"}"#)
//!     .unwrap();
//! assert_eq!(validated.record_type, "MONGO_UPDATE");
//!
//! let skipped = validator.validate(&record, r#"{"type":"addressDeclaration"}"#);
//! assert!(skipped.is_err());
//! ```
//!
//! ## Notifying the snapshot sender
//!
//! ```rust,no_run
//! use snapshot_export::adapters::queue::SqsQueueClient;
//! use snapshot_export::config::load_config;
//! use snapshot_export::core::notify::SnapshotSenderNotifier;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("snapshot-export.toml")?;
//! let queue = SqsQueueClient::from_config(&config.snapshot_sender).await;
//! let notifier =
//!     SnapshotSenderNotifier::from_config(Arc::new(queue), &config.snapshot_sender, "run-1");
//!
//! notifier.notify_exported("db.core.claimant").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`domain::ExportError`] through [`domain::Result`].
//! Record-level failures are [`domain::BadDecryptedData`]; queue delivery
//! failures are [`domain::DeliveryError`], which keeps the attempt count and
//! the last queue error.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
