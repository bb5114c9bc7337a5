//! NATS backend for [`EventPublisher`].

use crate::config::EventsConfig;
use crate::error::PublishError;
use crate::event::EventEnvelope;
use crate::publisher::EventPublisher;
use async_nats::{Client, HeaderMap};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Header carrying the envelope key, for consumers that shard on it.
pub const EVENT_KEY_HEADER: &str = "Event-Key";

/// Publishes envelopes as JSON on core NATS subjects.
#[derive(Clone)]
pub struct NatsPublisher {
    client: Client,
    config: EventsConfig,
}

impl NatsPublisher {
    pub fn new(client: Client, config: EventsConfig) -> Self {
        Self { client, config }
    }

    /// Connect to `config.nats_url`.
    pub async fn connect(config: EventsConfig, client_name: &str) -> Result<Self, PublishError> {
        let url = config
            .nats_url
            .clone()
            .ok_or_else(|| PublishError::Connection("NATS_URL is not set".to_string()))?;

        let client = async_nats::ConnectOptions::new()
            .name(client_name)
            .connect(url.as_str())
            .await
            .map_err(|e| PublishError::Connection(format!("{}: {}", url, e)))?;

        info!(
            url = %url,
            task_subject = %config.task_subject,
            project_subject = %config.project_subject,
            "NATS event publisher connected"
        );

        Ok(Self::new(client, config))
    }
}

#[async_trait]
impl EventPublisher for NatsPublisher {
    #[instrument(skip(self, payload))]
    async fn publish(
        &self,
        event: &str,
        key: &str,
        payload: serde_json::Value,
    ) -> Result<(), PublishError> {
        let subject = self.config.subject_for(event).to_string();

        let envelope = EventEnvelope::new(event, key, payload);
        let body = serde_json::to_vec(&envelope)?;

        let mut headers = HeaderMap::new();
        headers.insert(EVENT_KEY_HEADER, key);

        let send = async {
            self.client
                .publish_with_headers(subject.clone(), headers, body.into())
                .await
                .map_err(|e| PublishError::publish(e.to_string()))?;
            self.client
                .flush()
                .await
                .map_err(|e| PublishError::publish(e.to_string()))
        };

        tokio::time::timeout(self.config.publish_timeout, send)
            .await
            .map_err(|_| PublishError::Timeout(self.config.publish_timeout))??;

        debug!(event, key, subject = %subject, "Event published");
        Ok(())
    }

    async fn close(&self) -> Result<(), PublishError> {
        self.client
            .flush()
            .await
            .map_err(|e| PublishError::publish(e.to_string()))?;
        info!("NATS event publisher flushed");
        Ok(())
    }
}
