use axum_helpers::server::create_production_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres;
use messaging::nats::NatsPublisher;
use messaging::{EventPublisher, NoopPublisher};
use migration::Migrator;
use std::sync::Arc;
use tracing::{info, warn};

use task_service::config::Config;
use task_service::state::AppState;
use task_service::{api, build_app};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(
        name = config.app.name,
        version = config.app.version,
        "Starting task service"
    );

    let db = postgres::connect_from_config_with_retry(
        config.database.clone(),
        Some(config.retry.clone()),
    )
    .await
    .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    postgres::run_migrations::<Migrator>(&db, config.app.name).await?;

    let events = connect_events(&config).await;

    let state = AppState {
        config,
        db,
        events,
    };

    let router_config = state.config.router_config();
    let app = build_app(api::routes(&state), &router_config, state.config.app)?
        .merge(api::ready_router(state.db.clone()));

    let shutdown_timeout = state.config.server.shutdown_timeout;
    create_production_app(app, &state.config.server, shutdown_timeout, async move {
        info!("Shutting down: closing event publisher and database pool");

        if let Err(e) = state.events.close().await {
            warn!(error = %e, "Error closing event publisher");
        }
        match state.db.close().await {
            Ok(_) => info!("PostgreSQL connection closed"),
            Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Task service shutdown complete");
    Ok(())
}

/// NATS when configured and reachable, otherwise events are dropped.
async fn connect_events(config: &Config) -> Arc<dyn EventPublisher> {
    if !config.events.enabled() {
        info!("NATS_URL not set, events disabled");
        return Arc::new(NoopPublisher);
    }

    match NatsPublisher::connect(config.events.clone(), config.app.name).await {
        Ok(publisher) => {
            info!("NATS connected successfully");
            Arc::new(publisher)
        }
        Err(e) => {
            warn!(error = %e, "Failed to connect to NATS, continuing without events");
            Arc::new(NoopPublisher)
        }
    }
}
