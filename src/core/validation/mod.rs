//! Decrypted record validation
//!
//! - [`validator`] - Parses payloads and extracts identity and type
//! - [`summary`] - Per-batch tally of valid and skipped records

pub mod summary;
pub mod validator;

pub use summary::ValidationSummary;
pub use validator::{Document, PayloadError, ValidatedRecord, Validator};
