//! Event contracts shared with downstream consumers.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Event names understood by consumers.
pub mod event_names {
    pub const PROJECT_CREATED: &str = "project.created";
    pub const TASK_CREATED: &str = "task.created";
    pub const TASK_UPDATED: &str = "task.updated";

    /// Prefix that routes an event to the project stream.
    pub const PROJECT_PREFIX: &str = "project.";
}

/// Something that happened to a domain entity.
pub trait DomainEvent: Serialize + Send + Sync {
    /// Dotted event name, e.g. `task.created`.
    fn name(&self) -> &'static str;

    /// Partition key, e.g. `task:42`.
    fn key(&self) -> String;
}

/// Wire format of every published event.
///
/// ```json
/// {
///   "event": "task.created",
///   "key": "task:1",
///   "timestamp": "2026-01-05T10:00:00.123456789Z",
///   "data": { "id": 1, "projectID": 1, "title": "T1", "status": "open", "userID": "u1", "username": "alice" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event: String,
    pub key: String,
    /// RFC 3339, UTC, nanosecond precision
    pub timestamp: String,
    pub data: serde_json::Value,
}

impl EventEnvelope {
    /// Stamp an envelope with the current time.
    pub fn new(event: impl Into<String>, key: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event: event.into(),
            key: key.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCreated {
    pub id: i64,
    pub name: String,
    #[serde(rename = "userID")]
    pub user_id: String,
    pub username: String,
}

impl DomainEvent for ProjectCreated {
    fn name(&self) -> &'static str {
        event_names::PROJECT_CREATED
    }

    fn key(&self) -> String {
        format!("project:{}", self.id)
    }
}

/// Task snapshot carried by both task events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    pub id: i64,
    #[serde(rename = "projectID")]
    pub project_id: i64,
    pub title: String,
    pub status: String,
    #[serde(rename = "userID")]
    pub user_id: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskCreated(pub TaskSnapshot);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskUpdated(pub TaskSnapshot);

impl DomainEvent for TaskCreated {
    fn name(&self) -> &'static str {
        event_names::TASK_CREATED
    }

    fn key(&self) -> String {
        format!("task:{}", self.0.id)
    }
}

impl DomainEvent for TaskUpdated {
    fn name(&self) -> &'static str {
        event_names::TASK_UPDATED
    }

    fn key(&self) -> String {
        format!("task:{}", self.0.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use serde_json::json;

    fn snapshot() -> TaskSnapshot {
        TaskSnapshot {
            id: 1,
            project_id: 1,
            title: "T1".to_string(),
            status: "open".to_string(),
            user_id: "u1".to_string(),
            username: "alice".to_string(),
        }
    }

    #[test]
    fn test_project_created_payload_and_key() {
        let event = ProjectCreated {
            id: 1,
            name: "Alpha".to_string(),
            user_id: "u1".to_string(),
            username: "alice".to_string(),
        };

        assert_eq!(event.name(), "project.created");
        assert_eq!(event.key(), "project:1");
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"id": 1, "name": "Alpha", "userID": "u1", "username": "alice"})
        );
    }

    #[test]
    fn test_task_events_share_payload_shape() {
        let created = TaskCreated(snapshot());
        let updated = TaskUpdated(snapshot());

        assert_eq!(created.name(), "task.created");
        assert_eq!(updated.name(), "task.updated");
        assert_eq!(created.key(), "task:1");
        assert_eq!(
            serde_json::to_value(&created).unwrap(),
            json!({
                "id": 1,
                "projectID": 1,
                "title": "T1",
                "status": "open",
                "userID": "u1",
                "username": "alice"
            })
        );
        assert_eq!(
            serde_json::to_value(&created).unwrap(),
            serde_json::to_value(&updated).unwrap()
        );
    }

    #[test]
    fn test_envelope_timestamp_is_utc_nanos() {
        let envelope = EventEnvelope::new("task.created", "task:1", json!({}));

        assert!(envelope.timestamp.ends_with('Z'));
        let (_, fraction) = envelope.timestamp.split_once('.').unwrap();
        assert_eq!(fraction.len(), "123456789Z".len());
        assert!(DateTime::parse_from_rfc3339(&envelope.timestamp).is_ok());
    }

    #[test]
    fn test_envelope_field_names() {
        let envelope = EventEnvelope::new("project.created", "project:1", json!({"id": 1}));
        let value = serde_json::to_value(&envelope).unwrap();

        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["data", "event", "key", "timestamp"]);
    }
}
