use std::time::Duration;
use thiserror::Error;

/// Failure to hand an event to the bus.
///
/// Only [`publish_best_effort`](crate::publish_best_effort) swallows these;
/// callers using a publisher directly see them as-is.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("publish error: {0}")]
    Publish(String),

    #[error("publish timed out after {0:?}")]
    Timeout(Duration),

    #[error("publisher is closed")]
    Closed,
}

impl PublishError {
    pub fn publish(msg: impl Into<String>) -> Self {
        Self::Publish(msg.into())
    }
}
