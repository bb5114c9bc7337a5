use crate::error::PublishError;
use crate::event::EventEnvelope;
use crate::publisher::EventPublisher;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Records envelopes in memory; can be switched to fail every publish.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPublisher {
    events: Arc<RwLock<Vec<EventEnvelope>>>,
    fail: Arc<AtomicBool>,
    failed_attempts: Arc<AtomicUsize>,
    closed: Arc<AtomicBool>,
}

impl InMemoryPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A publisher whose every publish returns an error.
    pub fn failing() -> Self {
        let publisher = Self::default();
        publisher.set_failing(true);
        publisher
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub async fn events(&self) -> Vec<EventEnvelope> {
        self.events.read().await.clone()
    }

    pub async fn events_named(&self, name: &str) -> Vec<EventEnvelope> {
        self.events
            .read()
            .await
            .iter()
            .filter(|e| e.event == name)
            .cloned()
            .collect()
    }

    pub fn failed_attempts(&self) -> usize {
        self.failed_attempts.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventPublisher for InMemoryPublisher {
    async fn publish(
        &self,
        event: &str,
        key: &str,
        payload: serde_json::Value,
    ) -> Result<(), PublishError> {
        if self.is_closed() {
            return Err(PublishError::Closed);
        }
        if self.fail.load(Ordering::SeqCst) {
            self.failed_attempts.fetch_add(1, Ordering::SeqCst);
            return Err(PublishError::publish("injected failure"));
        }

        self.events
            .write()
            .await
            .push(EventEnvelope::new(event, key, payload));
        Ok(())
    }

    async fn close(&self) -> Result<(), PublishError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_records_in_order() {
        let publisher = InMemoryPublisher::new();
        publisher
            .publish("task.created", "task:1", json!({"id": 1}))
            .await
            .unwrap();
        publisher
            .publish("task.updated", "task:1", json!({"id": 1}))
            .await
            .unwrap();

        let events = publisher.events().await;
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event, "task.created");
        assert_eq!(events[1].event, "task.updated");
        assert_eq!(publisher.events_named("task.updated").await.len(), 1);
    }

    #[tokio::test]
    async fn test_failure_injection_can_be_toggled() {
        let publisher = InMemoryPublisher::failing();
        assert!(publisher.publish("task.created", "task:1", json!({})).await.is_err());

        publisher.set_failing(false);
        assert!(publisher.publish("task.created", "task:1", json!({})).await.is_ok());
        assert_eq!(publisher.failed_attempts(), 1);
    }

    #[tokio::test]
    async fn test_closed_publisher_rejects() {
        let publisher = InMemoryPublisher::new();
        publisher.close().await.unwrap();

        let err = publisher
            .publish("task.created", "task:1", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, PublishError::Closed));
        assert!(publisher.is_closed());
    }
}
