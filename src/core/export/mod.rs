//! Export run hand-off
//!
//! - [`completion`] - Final notification and terminal status of a run

pub mod completion;

pub use completion::{CompletionOutcome, RunCompletion};
