//! Snapshot sender notifier
//!
//! Tells the snapshot sender that an export run has finished, either with
//! the S3 folder holding the exported files or with a zero-files message.
//! Delivery goes through a [`QueueClient`] under a [`RetryPolicy`].

use super::retry::RetryPolicy;
use crate::adapters::queue::{QueueClient, SendMessageRequest};
use crate::config::SnapshotSenderConfig;
use crate::domain::{DeliveryError, ExportNotification, NotificationHeader, QueueError};
use crate::log_notification_sent;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Run metadata and queue settings used to build every message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierSettings {
    /// Destination queue URL
    pub queue_url: String,

    /// Visibility delay applied to every message
    pub delay_seconds: i32,

    /// Header shared by every notification of this run
    pub header: NotificationHeader,
}

impl NotifierSettings {
    /// Builds settings from configuration and the run's correlation id
    pub fn from_config(config: &SnapshotSenderConfig, correlation_id: impl Into<String>) -> Self {
        Self {
            queue_url: config.queue_url.clone(),
            delay_seconds: config.delay_seconds,
            header: NotificationHeader {
                shutdown_flag: config.shutdown_flag,
                correlation_id: correlation_id.into(),
                topic_name: config.topic_name.clone(),
                export_date: config.export_date.clone(),
                reprocess_files: config.reprocess_files,
                snapshot_type: config.snapshot_type.clone(),
            },
        }
    }
}

/// Sends export-completion notifications to the snapshot sender
///
/// Sending can be switched off; the switch is read on every call, so it may
/// be flipped between calls without rebuilding the notifier.
pub struct SnapshotSenderNotifier {
    queue: Arc<dyn QueueClient>,
    settings: NotifierSettings,
    retry: RetryPolicy,
    enabled: AtomicBool,
}

impl SnapshotSenderNotifier {
    /// Creates a notifier
    pub fn new(
        queue: Arc<dyn QueueClient>,
        settings: NotifierSettings,
        retry: RetryPolicy,
        enabled: bool,
    ) -> Self {
        Self {
            queue,
            settings,
            retry,
            enabled: AtomicBool::new(enabled),
        }
    }

    /// Creates a notifier from configuration
    pub fn from_config(
        queue: Arc<dyn QueueClient>,
        config: &SnapshotSenderConfig,
        correlation_id: impl Into<String>,
    ) -> Self {
        Self::new(
            queue,
            NotifierSettings::from_config(config, correlation_id),
            RetryPolicy::from_config(&config.retry),
            config.enabled,
        )
    }

    /// Whether notifications are currently sent
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Turns sending on or off for subsequent calls
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn settings(&self) -> &NotifierSettings {
        &self.settings
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Announces that files were exported under `s3_full_folder`
    ///
    /// # Errors
    ///
    /// Returns a [`DeliveryError`] if the message could not be delivered
    /// within the retry budget.
    pub async fn notify_exported(&self, s3_full_folder: &str) -> Result<(), DeliveryError> {
        if !self.is_enabled() {
            tracing::info!(
                s3_full_folder = %s3_full_folder,
                "Snapshot sender notification disabled, not sending"
            );
            return Ok(());
        }
        let notification =
            ExportNotification::files_exported(self.settings.header.clone(), s3_full_folder);
        self.send(&notification).await
    }

    /// Announces that the run exported no files
    ///
    /// # Errors
    ///
    /// Returns a [`DeliveryError`] if the message could not be delivered
    /// within the retry budget.
    pub async fn notify_no_files_exported(&self) -> Result<(), DeliveryError> {
        if !self.is_enabled() {
            tracing::info!("Snapshot sender notification disabled, not sending");
            return Ok(());
        }
        let notification = ExportNotification::no_files_exported(self.settings.header.clone());
        self.send(&notification).await
    }

    async fn send(&self, notification: &ExportNotification) -> Result<(), DeliveryError> {
        let body = notification.to_message_body().map_err(|e| DeliveryError::Permanent {
            attempt: 0,
            error: QueueError::Rejected(format!("Failed to render message body: {e}")),
        })?;
        let request = SendMessageRequest::new(
            self.settings.queue_url.clone(),
            body,
            self.settings.delay_seconds,
        );

        tracing::debug!(
            kind = notification.kind(),
            queue_url = %request.queue_url,
            body = %request.message_body,
            "Sending snapshot sender notification"
        );

        let queue = &self.queue;
        let request = &request;
        let result = self
            .retry
            .run(|attempt| async move {
                tracing::debug!(attempt, "Send attempt");
                queue.send_message(request).await.map(|()| attempt)
            })
            .await;

        match result {
            Ok(attempts) => {
                log_notification_sent!(notification.kind(), request.queue_url, attempts);
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    kind = notification.kind(),
                    queue_url = %request.queue_url,
                    attempts = e.attempts(),
                    error = %e,
                    "Failed to notify snapshot sender"
                );
                Err(e)
            }
        }
    }
}
