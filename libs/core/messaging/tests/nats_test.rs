//! NATS publisher tests against a real server.
//!
//! Requires Docker: `cargo test -p messaging --features nats -- --ignored`

#![cfg(feature = "nats")]

use futures::StreamExt;
use messaging::nats::{EVENT_KEY_HEADER, NatsPublisher};
use messaging::{
    EventEnvelope, EventPublisher, EventsConfig, ProjectCreated, TaskCreated, TaskSnapshot,
    publish_best_effort,
};
use std::time::Duration;
use test_utils::TestNats;

fn config(url: &str) -> EventsConfig {
    EventsConfig {
        nats_url: Some(url.to_string()),
        ..EventsConfig::default()
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_events_are_routed_by_prefix() {
    let nats = TestNats::new().await;
    let client = nats.client();
    let mut projects = client.subscribe("project-events").await.unwrap();
    let mut tasks = client.subscribe("task-events").await.unwrap();

    let publisher = NatsPublisher::connect(config(nats.connection_string()), "messaging-test")
        .await
        .unwrap();

    publish_best_effort(
        &publisher,
        &ProjectCreated {
            id: 1,
            name: "Alpha".to_string(),
            user_id: "u1".to_string(),
            username: "alice".to_string(),
        },
    )
    .await;
    publish_best_effort(
        &publisher,
        &TaskCreated(TaskSnapshot {
            id: 7,
            project_id: 1,
            title: "T1".to_string(),
            status: "open".to_string(),
            user_id: "u1".to_string(),
            username: "alice".to_string(),
        }),
    )
    .await;

    let project_msg = tokio::time::timeout(Duration::from_secs(5), projects.next())
        .await
        .expect("timeout waiting for project event")
        .unwrap();
    let envelope: EventEnvelope = serde_json::from_slice(&project_msg.payload).unwrap();
    assert_eq!(envelope.event, "project.created");
    assert_eq!(envelope.key, "project:1");
    assert_eq!(envelope.data["userID"], "u1");

    let task_msg = tokio::time::timeout(Duration::from_secs(5), tasks.next())
        .await
        .expect("timeout waiting for task event")
        .unwrap();
    let headers = task_msg.headers.expect("key header");
    assert_eq!(headers.get(EVENT_KEY_HEADER).unwrap().as_str(), "task:7");

    publisher.close().await.unwrap();
}

#[tokio::test]
async fn test_connect_without_url_fails() {
    let result = NatsPublisher::connect(EventsConfig::default(), "messaging-test").await;
    assert!(result.is_err());
}
