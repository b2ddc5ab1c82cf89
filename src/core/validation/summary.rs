//! Validation summary for a batch of records

use super::validator::ValidatedRecord;
use crate::domain::{BadDecryptedData, DecryptedDataFault};
use std::collections::BTreeMap;

/// Running tally of validation outcomes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationSummary {
    /// Records that passed validation
    pub valid: usize,

    /// Records whose payload was not a JSON object
    pub malformed: usize,

    /// Records without an `_id`
    pub missing_id: usize,

    /// Input entries that could not be read as a record at all
    pub unreadable: usize,

    /// Valid records per record type
    pub by_type: BTreeMap<String, usize>,
}

impl ValidationSummary {
    /// Create a new empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a validated record
    pub fn add_valid(&mut self, record: &ValidatedRecord) {
        self.valid += 1;
        *self.by_type.entry(record.record_type.clone()).or_insert(0) += 1;
    }

    /// Count a skipped record
    pub fn add_skipped(&mut self, error: &BadDecryptedData) {
        match error.fault {
            DecryptedDataFault::MalformedPayload => self.malformed += 1,
            DecryptedDataFault::MissingIdentity => self.missing_id += 1,
        }
    }

    /// Count an input entry that could not be turned into a record
    pub fn add_unreadable(&mut self) {
        self.unreadable += 1;
    }

    /// Total records skipped
    pub fn skipped(&self) -> usize {
        self.malformed + self.missing_id + self.unreadable
    }

    /// Total records seen
    pub fn total(&self) -> usize {
        self.valid + self.skipped()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total = self.total(),
            valid = self.valid,
            malformed = self.malformed,
            missing_id = self.missing_id,
            unreadable = self.unreadable,
            types = ?self.by_type,
            "Record validation completed"
        );
    }
}
