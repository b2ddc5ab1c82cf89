//! Export status reporting
//!
//! The batch driver signals per-file progress and the run's terminal state
//! through [`ExportStatusService`]. Signals are fire-and-forget: nothing in
//! the exporter reads them back.

use std::sync::Mutex;

/// Receiver of export progress and terminal-state signals
pub trait ExportStatusService: Send + Sync {
    /// One more file was exported
    fn increment_exported_count(&self, exported_file: &str);

    /// The export finished successfully
    fn set_exported_status(&self);

    /// The export failed
    fn set_failed_status(&self);

    /// The source table was not available
    fn set_table_unavailable_status(&self);

    /// The topic is blocked from export
    fn set_blocked_topic_status(&self);
}

/// State of an export run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportStatus {
    #[default]
    InProgress,
    Exported,
    Failed,
    TableUnavailable,
    BlockedTopic,
}

impl ExportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportStatus::InProgress => "In_Progress",
            ExportStatus::Exported => "Exported",
            ExportStatus::Failed => "Export_Failed",
            ExportStatus::TableUnavailable => "Table_Unavailable",
            ExportStatus::BlockedTopic => "Blocked_Topic",
        }
    }
}

impl std::fmt::Display for ExportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time copy of a tracker's state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportStatusSnapshot {
    pub status: ExportStatus,
    pub exported_files: Vec<String>,
}

impl ExportStatusSnapshot {
    pub fn files_exported(&self) -> usize {
        self.exported_files.len()
    }
}

/// In-process [`ExportStatusService`] that logs every signal
#[derive(Debug, Default)]
pub struct ExportStatusTracker {
    correlation_id: String,
    state: Mutex<ExportStatusSnapshot>,
}

impl ExportStatusTracker {
    pub fn new(correlation_id: impl Into<String>) -> Self {
        Self {
            correlation_id: correlation_id.into(),
            state: Mutex::new(ExportStatusSnapshot::default()),
        }
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> ExportStatusSnapshot {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ExportStatusSnapshot> {
        // Every update is a single push or assignment, so a poisoned lock
        // still holds a whole snapshot
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn set_status(&self, status: ExportStatus) {
        let mut state = self.lock();
        let previous = state.status;
        state.status = status;
        tracing::info!(
            correlation_id = %self.correlation_id,
            previous = %previous,
            status = %status,
            files_exported = state.exported_files.len(),
            "Export status updated"
        );
    }
}

impl ExportStatusService for ExportStatusTracker {
    fn increment_exported_count(&self, exported_file: &str) {
        let mut state = self.lock();
        state.exported_files.push(exported_file.to_string());
        tracing::debug!(
            correlation_id = %self.correlation_id,
            exported_file = %exported_file,
            files_exported = state.exported_files.len(),
            "Incremented exported count"
        );
    }

    fn set_exported_status(&self) {
        self.set_status(ExportStatus::Exported);
    }

    fn set_failed_status(&self) {
        self.set_status(ExportStatus::Failed);
    }

    fn set_table_unavailable_status(&self) {
        self.set_status(ExportStatus::TableUnavailable);
    }

    fn set_blocked_topic_status(&self) {
        self.set_status(ExportStatus::BlockedTopic);
    }
}
