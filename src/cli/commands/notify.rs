//! Notify command implementation
//!
//! This module implements the `notify` command, which tells the snapshot
//! sender that an export run has finished.

use crate::adapters::queue::SqsQueueClient;
use crate::config::load_config;
use crate::core::export::{CompletionOutcome, RunCompletion};
use crate::core::notify::SnapshotSenderNotifier;
use crate::core::status::ExportStatusTracker;
use crate::domain::ExportError;
use crate::log_error_with_context;
use clap::Args;
use std::sync::Arc;

/// Arguments for the notify command
#[derive(Args, Debug)]
pub struct NotifyArgs {
    /// Number of files the run exported
    #[arg(long)]
    pub files_exported: usize,

    /// S3 folder holding the exported files (required when files were exported)
    #[arg(long)]
    pub s3_folder: Option<String>,

    /// Correlation id of the run
    #[arg(long, env = "CORRELATION_ID")]
    pub correlation_id: Option<String>,
}

impl NotifyArgs {
    /// Execute the notify command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(files_exported = self.files_exported, "Starting notify command");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let s3_folder = match (self.files_exported, self.s3_folder.as_deref()) {
            (0, folder) => folder.unwrap_or_default(),
            (_, Some(folder)) if !folder.trim().is_empty() => folder,
            _ => {
                println!("❌ --s3-folder is required when --files-exported is greater than 0");
                return Ok(2);
            }
        };

        let correlation_id = resolve_correlation_id(
            self.correlation_id.as_deref(),
            config.snapshot_sender.correlation_id.as_deref(),
        );
        tracing::info!(correlation_id = %correlation_id, "Resolved correlation id");

        let queue = SqsQueueClient::from_config(&config.snapshot_sender).await;
        let notifier = SnapshotSenderNotifier::from_config(
            Arc::new(queue),
            &config.snapshot_sender,
            &correlation_id,
        );
        let tracker = ExportStatusTracker::new(&correlation_id);

        if !notifier.is_enabled() {
            println!("ℹ️  Snapshot sender notification is disabled, nothing will be sent");
        }

        match RunCompletion::new(&notifier, &tracker)
            .finish(self.files_exported, s3_folder)
            .await
        {
            Ok(CompletionOutcome::FilesExported { files_exported }) => {
                println!("✅ Snapshot sender notified: {files_exported} file(s) in {s3_folder}");
                println!("   Status: {}", tracker.snapshot().status);
                Ok(0)
            }
            Ok(CompletionOutcome::NoFilesExported) => {
                println!("✅ Snapshot sender notified: no files exported");
                println!("   Status: {}", tracker.snapshot().status);
                Ok(0)
            }
            Err(e @ ExportError::Delivery(_)) => {
                log_error_with_context!(&e, "Failed to notify snapshot sender");
                println!("❌ {e}");
                println!("   Status: {}", tracker.snapshot().status);
                Ok(3)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Picks the run's correlation id: explicit value, then configuration, then a fresh UUID
fn resolve_correlation_id(explicit: Option<&str>, configured: Option<&str>) -> String {
    explicit
        .or(configured)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}
