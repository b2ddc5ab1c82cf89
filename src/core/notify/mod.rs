//! Export-completion notification
//!
//! - [`retry`] - Explicit retry policy with multiplicative backoff
//! - [`notifier`] - Builds and delivers snapshot sender notifications

pub mod notifier;
pub mod retry;

pub use notifier::{NotifierSettings, SnapshotSenderNotifier};
pub use retry::{RetryPolicy, Retryable};
