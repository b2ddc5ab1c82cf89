//! Queue abstraction traits
//!
//! This module defines the trait that queue adapters must implement to
//! deliver snapshot sender notifications.

use crate::domain::QueueError;
use async_trait::async_trait;

/// A single message send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessageRequest {
    /// Destination queue URL
    pub queue_url: String,

    /// Message body
    pub message_body: String,

    /// Visibility delay in seconds
    pub delay_seconds: i32,
}

impl SendMessageRequest {
    /// Creates a new send request
    pub fn new(
        queue_url: impl Into<String>,
        message_body: impl Into<String>,
        delay_seconds: i32,
    ) -> Self {
        Self {
            queue_url: queue_url.into(),
            message_body: message_body.into(),
            delay_seconds,
        }
    }
}

/// Queue client trait for notification delivery
///
/// One call is one delivery attempt. Implementations classify failures as
/// [`QueueError::Transient`] or [`QueueError::Rejected`]; retrying is left
/// to the caller. Clients are shared across runs, so they must be `Send + Sync`.
#[async_trait]
pub trait QueueClient: Send + Sync {
    /// Sends one message
    ///
    /// # Errors
    ///
    /// Returns a transient error for connectivity, throttling and server-side
    /// failures, and a rejection for anything the queue refused outright.
    async fn send_message(&self, request: &SendMessageRequest) -> Result<(), QueueError>;
}
