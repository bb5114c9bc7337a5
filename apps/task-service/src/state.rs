//! Shared application state.

use database::postgres::DatabaseConnection;
use messaging::EventPublisher;
use std::sync::Arc;

/// Cloned into the route builders and the shutdown cleanup; every field is a
/// cheap handle.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: DatabaseConnection,
    /// NATS, or a no-op publisher when the bus is disabled or unreachable
    pub events: Arc<dyn EventPublisher>,
}
