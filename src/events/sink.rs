//! Publishing targets for status-change events

use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("webhook request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("webhook returned {0}")]
    Status(StatusCode),
}

/// Destination for serialized events
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Sink name for logging
    fn name(&self) -> &'static str;

    async fn publish(&self, topic: &str, key: &str, payload: &[u8]) -> Result<(), SinkError>;
}

/// Writes events to the tracing log
pub struct LogSink;

#[async_trait]
impl EventSink for LogSink {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn publish(&self, topic: &str, key: &str, payload: &[u8]) -> Result<(), SinkError> {
        tracing::info!(
            topic,
            key,
            payload = %String::from_utf8_lossy(payload),
            "order status changed"
        );
        Ok(())
    }
}

/// POSTs each event as JSON to a fixed URL
///
/// The topic and key travel in the `X-Event-Topic` and `X-Event-Key` headers.
pub struct WebhookSink {
    client: reqwest::Client,
    url: String,
}

impl WebhookSink {
    pub fn new(url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl EventSink for WebhookSink {
    fn name(&self) -> &'static str {
        "webhook"
    }

    async fn publish(&self, topic: &str, key: &str, payload: &[u8]) -> Result<(), SinkError> {
        let resp = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header("X-Event-Topic", topic)
            .header("X-Event-Key", key)
            .body(payload.to_vec())
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(SinkError::Status(resp.status()));
        }
        Ok(())
    }
}
