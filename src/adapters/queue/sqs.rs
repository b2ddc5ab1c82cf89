//! Amazon SQS queue client
//!
//! Sends snapshot sender notifications with `aws-sdk-sqs` and maps SDK
//! failures onto [`QueueError`].

use super::traits::{QueueClient, SendMessageRequest};
use crate::config::SnapshotSenderConfig;
use crate::domain::QueueError;
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_sqs::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_sqs::operation::send_message::SendMessageError;
use aws_sdk_sqs::Client;

/// SQS error codes that signal throttling rather than a bad request
const THROTTLING_CODES: &[&str] = &[
    "ThrottlingException",
    "RequestThrottled",
    "Throttling",
    "ServiceUnavailable",
    "KmsThrottled",
];

/// SQS-backed [`QueueClient`]
#[derive(Clone)]
pub struct SqsQueueClient {
    client: Client,
}

impl SqsQueueClient {
    /// Wraps an existing SDK client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// Creates a client from the snapshot sender configuration
    ///
    /// Credentials come from the default AWS provider chain. An
    /// `endpoint_url` in the configuration overrides the regional endpoint.
    pub async fn from_config(config: &SnapshotSenderConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let shared = loader.load().await;

        tracing::debug!(
            region = %config.region,
            endpoint_url = ?config.endpoint_url,
            "SQS client initialized"
        );

        Self {
            client: Client::new(&shared),
        }
    }
}

#[async_trait]
impl QueueClient for SqsQueueClient {
    async fn send_message(&self, request: &SendMessageRequest) -> Result<(), QueueError> {
        let output = self
            .client
            .send_message()
            .queue_url(&request.queue_url)
            .message_body(&request.message_body)
            .delay_seconds(request.delay_seconds)
            .send()
            .await
            .map_err(classify_sdk_error)?;

        tracing::debug!(
            message_id = output.message_id().unwrap_or_default(),
            queue_url = %request.queue_url,
            "Message accepted by SQS"
        );

        Ok(())
    }
}

fn classify_sdk_error(err: SdkError<SendMessageError>) -> QueueError {
    let message = DisplayErrorContext(&err).to_string();
    match &err {
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) | SdkError::ResponseError(_) => {
            QueueError::Transient(message)
        }
        SdkError::ServiceError(context) => {
            let status = context.raw().status().as_u16();
            let code = context.err().code();
            if is_transient_status(status) || code.is_some_and(is_throttling_code) {
                QueueError::Transient(message)
            } else {
                QueueError::Rejected(message)
            }
        }
        _ => QueueError::Rejected(message),
    }
}

fn is_transient_status(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}

fn is_throttling_code(code: &str) -> bool {
    THROTTLING_CODES.contains(&code)
}
