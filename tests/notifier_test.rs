//! Integration tests for snapshot sender notification and delivery retry

use async_trait::async_trait;
use snapshot_export::adapters::queue::{QueueClient, SendMessageRequest};
use snapshot_export::core::export::{CompletionOutcome, RunCompletion};
use snapshot_export::core::notify::{NotifierSettings, RetryPolicy, SnapshotSenderNotifier};
use snapshot_export::core::status::{ExportStatus, ExportStatusService, ExportStatusTracker};
use snapshot_export::domain::{ExportError, NotificationHeader, QueueError, RetryError};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use test_case::test_case;

const QUEUE_URL: &str = "http://aws:4566";

/// Queue that fails a fixed number of times, then accepts every message
struct ScriptedQueue {
    failures: usize,
    failure: QueueError,
    attempts: Mutex<Vec<SendMessageRequest>>,
}

impl ScriptedQueue {
    fn failing(failures: usize) -> Arc<Self> {
        Arc::new(Self {
            failures,
            failure: QueueError::Transient("service unavailable".to_string()),
            attempts: Mutex::new(Vec::new()),
        })
    }

    fn rejecting() -> Arc<Self> {
        Arc::new(Self {
            failures: usize::MAX,
            failure: QueueError::Rejected("AWS.SimpleQueueService.NonExistentQueue".to_string()),
            attempts: Mutex::new(Vec::new()),
        })
    }

    fn attempts(&self) -> Vec<SendMessageRequest> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueueClient for ScriptedQueue {
    async fn send_message(&self, request: &SendMessageRequest) -> Result<(), QueueError> {
        let mut attempts = self.attempts.lock().unwrap();
        attempts.push(request.clone());
        if attempts.len() <= self.failures {
            Err(self.failure.clone())
        } else {
            Ok(())
        }
    }
}

fn settings(snapshot_type: &str) -> NotifierSettings {
    NotifierSettings {
        queue_url: QUEUE_URL.to_string(),
        delay_seconds: 30,
        header: NotificationHeader {
            shutdown_flag: true,
            correlation_id: "correlation-id".to_string(),
            topic_name: "db.database.collection".to_string(),
            export_date: "2020-06-05".to_string(),
            reprocess_files: false,
            snapshot_type: snapshot_type.to_string(),
        },
    }
}

fn notifier(queue: Arc<ScriptedQueue>, max_attempts: u32) -> SnapshotSenderNotifier {
    SnapshotSenderNotifier::new(
        queue,
        settings("full"),
        RetryPolicy::new(max_attempts, Duration::from_millis(1), 2.0),
        true,
    )
}

#[tokio::test]
async fn test_files_exported_request() {
    let queue = ScriptedQueue::failing(0);
    notifier(queue.clone(), 10)
        .notify_exported("db.collection")
        .await
        .unwrap();

    let expected = SendMessageRequest::new(
        QUEUE_URL,
        r#"{"shutdown_flag":"true","correlation_id":"correlation-id","topic_name":"db.database.collection","export_date":"2020-06-05","reprocess_files":"false","s3_full_folder":"db.collection","snapshot_type":"full"}"#,
        30,
    );
    assert_eq!(queue.attempts(), vec![expected]);
}

#[tokio::test]
async fn test_no_files_exported_request() {
    let queue = ScriptedQueue::failing(0);
    SnapshotSenderNotifier::new(
        queue.clone(),
        settings("incremental"),
        RetryPolicy::new(10, Duration::from_millis(1), 2.0),
        true,
    )
    .notify_no_files_exported()
    .await
    .unwrap();

    let attempts = queue.attempts();
    assert_eq!(attempts.len(), 1);
    assert_eq!(
        attempts[0].message_body,
        r#"{"shutdown_flag":"true","correlation_id":"correlation-id","topic_name":"db.database.collection","export_date":"2020-06-05","reprocess_files":"false","snapshot_type":"incremental","files_exported":0}"#
    );
    assert!(!attempts[0].message_body.contains("s3_full_folder"));
    assert_eq!(attempts[0].delay_seconds, 30);
}

#[test_case(0; "no failures")]
#[test_case(1; "one failure")]
#[test_case(4; "four failures")]
#[test_case(9; "one attempt to spare")]
#[tokio::test]
async fn test_recovers_after_k_failures(k: usize) {
    let queue = ScriptedQueue::failing(k);
    notifier(queue.clone(), 10)
        .notify_exported("db.collection")
        .await
        .unwrap();

    let attempts = queue.attempts();
    assert_eq!(attempts.len(), k + 1);
    assert!(attempts.windows(2).all(|pair| pair[0] == pair[1]));
}

#[tokio::test]
async fn test_zero_files_recovers_after_failures() {
    let queue = ScriptedQueue::failing(2);
    notifier(queue.clone(), 3)
        .notify_no_files_exported()
        .await
        .unwrap();
    assert_eq!(queue.attempts().len(), 3);
}

#[test_case(1; "single attempt")]
#[test_case(3; "three attempts")]
#[test_case(10; "default attempts")]
#[tokio::test]
async fn test_exhausts_after_max_attempts(max_attempts: u32) {
    let queue = ScriptedQueue::failing(usize::MAX);
    let err = notifier(queue.clone(), max_attempts)
        .notify_exported("db.collection")
        .await
        .unwrap_err();

    assert_eq!(queue.attempts().len(), max_attempts as usize);
    assert_eq!(err.attempts(), max_attempts);
    assert_eq!(
        err.last_error(),
        &QueueError::Transient("service unavailable".to_string())
    );
    assert!(matches!(err, RetryError::Exhausted { .. }));
}

#[tokio::test]
async fn test_rejected_message_is_retried_until_exhausted() {
    let queue = ScriptedQueue::rejecting();
    let err = notifier(queue.clone(), 10)
        .notify_no_files_exported()
        .await
        .unwrap_err();

    assert_eq!(queue.attempts().len(), 10);
    assert!(matches!(err, RetryError::Exhausted { attempts: 10, .. }));
    assert_eq!(
        err.last_error(),
        &QueueError::Rejected("AWS.SimpleQueueService.NonExistentQueue".to_string())
    );
}

#[tokio::test]
async fn test_transient_only_policy_stops_on_rejection() {
    let queue = ScriptedQueue::rejecting();
    let err = SnapshotSenderNotifier::new(
        queue.clone(),
        settings("full"),
        RetryPolicy::new(10, Duration::from_millis(1), 2.0).transient_only(),
        true,
    )
    .notify_no_files_exported()
    .await
    .unwrap_err();

    assert_eq!(queue.attempts().len(), 1);
    assert!(matches!(err, RetryError::Permanent { attempt: 1, .. }));
}

#[tokio::test]
async fn test_disabled_sends_nothing() {
    let queue = ScriptedQueue::failing(0);
    let notifier = SnapshotSenderNotifier::new(
        queue.clone(),
        settings("full"),
        RetryPolicy::default(),
        false,
    );

    notifier.notify_exported("db.collection").await.unwrap();
    notifier.notify_no_files_exported().await.unwrap();

    assert!(queue.attempts().is_empty());
}

#[tokio::test]
async fn test_disabled_at_runtime_sends_nothing() {
    let queue = ScriptedQueue::failing(0);
    let notifier = notifier(queue.clone(), 10);

    notifier.set_enabled(false);
    notifier.notify_exported("db.collection").await.unwrap();
    assert!(queue.attempts().is_empty());
}

#[tokio::test]
async fn test_run_completion_reports_status() {
    let queue = ScriptedQueue::failing(1);
    let notifier = notifier(queue.clone(), 5);
    let tracker = ExportStatusTracker::new("correlation-id");

    tracker.increment_exported_count("db.collection/part-0000.gz");
    tracker.increment_exported_count("db.collection/part-0001.gz");
    let files_exported = tracker.snapshot().files_exported();

    let outcome = RunCompletion::new(&notifier, &tracker)
        .finish(files_exported, "db.collection")
        .await
        .unwrap();

    assert_eq!(outcome, CompletionOutcome::FilesExported { files_exported: 2 });
    assert_eq!(tracker.snapshot().status, ExportStatus::Exported);
    assert_eq!(queue.attempts().len(), 2);
}

#[tokio::test]
async fn test_run_completion_failure_marks_failed() {
    let queue = ScriptedQueue::failing(usize::MAX);
    let notifier = notifier(queue.clone(), 2);
    let tracker = ExportStatusTracker::new("correlation-id");

    let err = RunCompletion::new(&notifier, &tracker)
        .finish(0, "")
        .await
        .unwrap_err();

    assert!(matches!(err, ExportError::Delivery(_)));
    assert_eq!(tracker.snapshot().status, ExportStatus::Failed);
    assert_eq!(queue.attempts().len(), 2);
}
