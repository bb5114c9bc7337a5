//! Task service: projects and tasks over HTTP, backed by PostgreSQL, with
//! change events on NATS.

pub mod api;
pub mod config;
pub mod openapi;
pub mod state;

use axum::Router;
use axum_helpers::{RouterConfig, create_router, health_router};
use core_config::AppInfo;
use std::io;

/// Docs, middleware and fallbacks around `api_routes`, plus `/health`.
pub fn build_app(api_routes: Router, config: &RouterConfig, app: AppInfo) -> io::Result<Router> {
    Ok(create_router::<openapi::ApiDoc>(api_routes, config)?.merge(health_router(app)))
}
