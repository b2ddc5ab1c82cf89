//! Export status reporting

pub mod tracker;

pub use tracker::{ExportStatus, ExportStatusService, ExportStatusSnapshot, ExportStatusTracker};
