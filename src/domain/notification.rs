//! Snapshot sender notification messages
//!
//! A finished export run is announced with one of two message shapes. Both
//! share the run header; the "files exported" shape names the S3 folder and
//! the "no files" shape reports a zero count instead. The variants are kept
//! apart so neither can carry the other's trailing field.

use serde::Serialize;

/// Run metadata shared by every notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationHeader {
    /// Whether the snapshot sender should shut down after processing
    pub shutdown_flag: bool,

    /// Correlation id of the export run
    pub correlation_id: String,

    /// Topic the export was taken from
    pub topic_name: String,

    /// Export date (`YYYY-MM-DD`)
    pub export_date: String,

    /// Whether previously exported files are being reprocessed
    pub reprocess_files: bool,

    /// Snapshot type (`full` or `incremental`)
    pub snapshot_type: String,
}

/// Notification sent to the snapshot sender when an export run completes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportNotification {
    /// At least one file was exported under `s3_full_folder`
    FilesExported {
        header: NotificationHeader,
        s3_full_folder: String,
    },

    /// The run produced no files
    NoFilesExported { header: NotificationHeader },
}

// Wire shapes. Field order here is the order on the wire.
#[derive(Serialize)]
struct FilesExportedBody<'a> {
    shutdown_flag: &'a str,
    correlation_id: &'a str,
    topic_name: &'a str,
    export_date: &'a str,
    reprocess_files: &'a str,
    s3_full_folder: &'a str,
    snapshot_type: &'a str,
}

#[derive(Serialize)]
struct NoFilesExportedBody<'a> {
    shutdown_flag: &'a str,
    correlation_id: &'a str,
    topic_name: &'a str,
    export_date: &'a str,
    reprocess_files: &'a str,
    snapshot_type: &'a str,
    files_exported: u64,
}

fn flag(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

impl ExportNotification {
    /// Notification for a run that exported files into `s3_full_folder`
    pub fn files_exported(header: NotificationHeader, s3_full_folder: impl Into<String>) -> Self {
        Self::FilesExported {
            header,
            s3_full_folder: s3_full_folder.into(),
        }
    }

    /// Notification for a run that exported nothing
    pub fn no_files_exported(header: NotificationHeader) -> Self {
        Self::NoFilesExported { header }
    }

    /// The shared run header
    pub fn header(&self) -> &NotificationHeader {
        match self {
            Self::FilesExported { header, .. } | Self::NoFilesExported { header } => header,
        }
    }

    /// Short name of the variant, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FilesExported { .. } => "files_exported",
            Self::NoFilesExported { .. } => "no_files_exported",
        }
    }

    /// Renders the JSON message body
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_message_body(&self) -> serde_json::Result<String> {
        match self {
            Self::FilesExported {
                header,
                s3_full_folder,
            } => serde_json::to_string(&FilesExportedBody {
                shutdown_flag: flag(header.shutdown_flag),
                correlation_id: &header.correlation_id,
                topic_name: &header.topic_name,
                export_date: &header.export_date,
                reprocess_files: flag(header.reprocess_files),
                s3_full_folder,
                snapshot_type: &header.snapshot_type,
            }),
            Self::NoFilesExported { header } => serde_json::to_string(&NoFilesExportedBody {
                shutdown_flag: flag(header.shutdown_flag),
                correlation_id: &header.correlation_id,
                topic_name: &header.topic_name,
                export_date: &header.export_date,
                reprocess_files: flag(header.reprocess_files),
                snapshot_type: &header.snapshot_type,
                files_exported: 0,
            }),
        }
    }
}
