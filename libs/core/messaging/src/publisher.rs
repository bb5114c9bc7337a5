use crate::error::PublishError;
use crate::event::DomainEvent;
use async_trait::async_trait;
use tracing::{debug, warn};

/// Sink for domain events.
///
/// Implementations must be safe to share between request tasks.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish one event. `payload` becomes the envelope's `data`.
    async fn publish(
        &self,
        event: &str,
        key: &str,
        payload: serde_json::Value,
    ) -> Result<(), PublishError>;

    /// Flush and release the underlying connection.
    async fn close(&self) -> Result<(), PublishError>;
}

/// Publisher used when no event bus is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPublisher;

#[async_trait]
impl EventPublisher for NoopPublisher {
    async fn publish(
        &self,
        event: &str,
        key: &str,
        _payload: serde_json::Value,
    ) -> Result<(), PublishError> {
        debug!(event, key, "Event bus disabled, dropping event");
        Ok(())
    }

    async fn close(&self) -> Result<(), PublishError> {
        Ok(())
    }
}

/// Publish `event`, logging instead of returning any failure.
pub async fn publish_best_effort<E>(publisher: &dyn EventPublisher, event: &E)
where
    E: DomainEvent,
{
    let name = event.name();
    let key = event.key();

    let payload = match serde_json::to_value(event) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(event = name, key = %key, error = %e, "Failed to serialize event");
            return;
        }
    };

    if let Err(e) = publisher.publish(name, &key, payload).await {
        warn!(event = name, key = %key, error = %e, "Failed to publish event");
    }
}
