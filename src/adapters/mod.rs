//! External system integrations.
//!
//! - [`queue`] - Message queue abstraction and the Amazon SQS implementation
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits so the core can be
//! tested with in-process implementations.
//!
//! ```rust,no_run
//! use snapshot_export::adapters::queue::{QueueClient, SendMessageRequest, SqsQueueClient};
//! use snapshot_export::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("snapshot-export.toml")?;
//! let client = SqsQueueClient::from_config(&config.snapshot_sender).await;
//! let request = SendMessageRequest::new(&config.snapshot_sender.queue_url, "{}", 30);
//! client.send_message(&request).await?;
//! # Ok(())
//! # }
//! ```

pub mod queue;
