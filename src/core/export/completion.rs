//! Export run completion
//!
//! Once every record of a run has been processed, the driver hands the
//! final file count to [`RunCompletion`]. It picks the notification variant,
//! sends it, and records the run's terminal status.

use crate::core::notify::SnapshotSenderNotifier;
use crate::core::status::ExportStatusService;
use crate::domain::{DeliveryError, Result};

/// What a completed run reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Files were exported and the folder was announced
    FilesExported { files_exported: usize },

    /// Nothing was exported and the zero-files message was sent
    NoFilesExported,
}

/// Finishes an export run: one notification, one terminal status
pub struct RunCompletion<'a> {
    notifier: &'a SnapshotSenderNotifier,
    status: &'a dyn ExportStatusService,
}

impl<'a> RunCompletion<'a> {
    pub fn new(notifier: &'a SnapshotSenderNotifier, status: &'a dyn ExportStatusService) -> Self {
        Self { notifier, status }
    }

    /// Notifies the snapshot sender and marks the run exported
    ///
    /// With `files_exported == 0` the zero-files message is sent and
    /// `s3_full_folder` is ignored.
    ///
    /// # Errors
    ///
    /// On delivery failure the run is marked failed and the delivery error
    /// is returned.
    pub async fn finish(
        &self,
        files_exported: usize,
        s3_full_folder: &str,
    ) -> Result<CompletionOutcome> {
        let delivery: std::result::Result<CompletionOutcome, DeliveryError> =
            if files_exported == 0 {
                tracing::info!("No files exported, sending zero-files notification");
                self.notifier
                    .notify_no_files_exported()
                    .await
                    .map(|()| CompletionOutcome::NoFilesExported)
            } else {
                tracing::info!(
                    files_exported,
                    s3_full_folder = %s3_full_folder,
                    "Files exported, notifying snapshot sender"
                );
                self.notifier
                    .notify_exported(s3_full_folder)
                    .await
                    .map(|()| CompletionOutcome::FilesExported { files_exported })
            };

        match delivery {
            Ok(outcome) => {
                self.status.set_exported_status();
                Ok(outcome)
            }
            Err(e) => {
                self.status.set_failed_status();
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::queue::{QueueClient, SendMessageRequest};
    use crate::core::notify::{NotifierSettings, RetryPolicy};
    use crate::core::status::{ExportStatus, ExportStatusTracker};
    use crate::domain::{ExportError, NotificationHeader, QueueError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    struct FixedQueue {
        fail: bool,
        calls: AtomicUsize,
    }

    impl FixedQueue {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                fail,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl QueueClient for FixedQueue {
        async fn send_message(
            &self,
            _request: &SendMessageRequest,
        ) -> std::result::Result<(), QueueError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(QueueError::Transient("unreachable".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn notifier(queue: Arc<FixedQueue>) -> SnapshotSenderNotifier {
        SnapshotSenderNotifier::new(
            queue,
            NotifierSettings {
                queue_url: "http://aws:4566".to_string(),
                delay_seconds: 30,
                header: NotificationHeader {
                    shutdown_flag: true,
                    correlation_id: "c".to_string(),
                    topic_name: "db.a.b".to_string(),
                    export_date: "2020-06-05".to_string(),
                    reprocess_files: false,
                    snapshot_type: "full".to_string(),
                },
            },
            RetryPolicy::new(2, Duration::from_millis(1), 1.0),
            true,
        )
    }

    #[tokio::test]
    async fn test_finish_with_files() {
        let queue = FixedQueue::new(false);
        let notifier = notifier(queue.clone());
        let tracker = ExportStatusTracker::new("c");

        let outcome = RunCompletion::new(&notifier, &tracker)
            .finish(3, "db.a")
            .await
            .unwrap();

        assert_eq!(outcome, CompletionOutcome::FilesExported { files_exported: 3 });
        assert_eq!(tracker.snapshot().status, ExportStatus::Exported);
        assert_eq!(queue.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_finish_without_files() {
        let queue = FixedQueue::new(false);
        let notifier = notifier(queue);
        let tracker = ExportStatusTracker::new("c");

        let outcome = RunCompletion::new(&notifier, &tracker)
            .finish(0, "")
            .await
            .unwrap();

        assert_eq!(outcome, CompletionOutcome::NoFilesExported);
        assert_eq!(tracker.snapshot().status, ExportStatus::Exported);
    }

    #[tokio::test]
    async fn test_delivery_failure_marks_run_failed() {
        let queue = FixedQueue::new(true);
        let notifier = notifier(queue.clone());
        let tracker = ExportStatusTracker::new("c");

        let err = RunCompletion::new(&notifier, &tracker)
            .finish(1, "db.a")
            .await
            .unwrap_err();

        assert!(matches!(err, ExportError::Delivery(_)));
        assert_eq!(tracker.snapshot().status, ExportStatus::Failed);
        assert_eq!(queue.calls.load(Ordering::SeqCst), 2);
    }
}
