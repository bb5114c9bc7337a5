//! PostgreSQL connectivity for the task service.
//!
//! Wraps SeaORM connection setup with pool settings loaded from the
//! environment, startup retry with exponential backoff, a `SELECT 1`
//! readiness probe, and a generic migration runner.
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let config = PostgresConfig::from_env()?;
//! let db = postgres::connect_from_config_with_retry(config, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "task_service").await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult, RetryConfig};
