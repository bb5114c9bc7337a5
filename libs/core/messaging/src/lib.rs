//! Domain event notification.
//!
//! Services describe what happened with a [`DomainEvent`] and hand it to
//! [`publish_best_effort`]. The event is wrapped in an [`EventEnvelope`] and
//! sent through whatever [`EventPublisher`] the binary wired in:
//!
//! - [`NoopPublisher`] when no bus is configured
//! - [`InMemoryPublisher`] for tests
//! - `nats::NatsPublisher` (feature `nats`) in production
//!
//! A failed publish never fails the operation that triggered it.
//!
//! ```ignore
//! use messaging::{ProjectCreated, publish_best_effort};
//!
//! let project = repository.create(new_project).await?;
//! publish_best_effort(events.as_ref(), &ProjectCreated::from(&project)).await;
//! ```

mod config;
mod error;
mod event;
mod memory;
mod publisher;

#[cfg(feature = "nats")]
pub mod nats;

pub use config::EventsConfig;
pub use error::PublishError;
pub use event::{
    DomainEvent, EventEnvelope, ProjectCreated, TaskCreated, TaskSnapshot, TaskUpdated,
    event_names,
};
pub use memory::InMemoryPublisher;
pub use publisher::{EventPublisher, NoopPublisher, publish_best_effort};
