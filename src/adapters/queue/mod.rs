//! Message queue integration
//!
//! - [`traits`] - The [`QueueClient`] abstraction used by the notifier
//! - [`sqs`] - Amazon SQS implementation

pub mod sqs;
pub mod traits;

pub use sqs::SqsQueueClient;
pub use traits::{QueueClient, SendMessageRequest};
