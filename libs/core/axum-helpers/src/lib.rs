//! # Axum Helpers
//!
//! Shared HTTP plumbing for the service binaries.
//!
//! - **[`server`]**: router assembly with OpenAPI docs, health endpoints, graceful shutdown
//! - **[`http`]**: CORS and security header middleware
//! - **[`errors`]**: `AppError` and the JSON error body
//! - **[`extractors`]**: caller identity, numeric path ids, validated JSON
//!
//! ```ignore
//! use axum_helpers::server::{RouterConfig, create_production_app, create_router, health_router};
//!
//! let router = create_router::<ApiDoc>(api_routes, &RouterConfig::default())?
//!     .merge(health_router(app_info!()));
//! create_production_app(router, &server_config, server_config.shutdown_timeout, async {}).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, RouterConfig, ShutdownCoordinator, create_production_app,
    create_router, health_router, run_health_checks, shutdown_signal,
};

pub use http::{create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{CallerIdentity, IdPath, ValidatedJson};
