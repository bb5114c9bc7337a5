use core_config::{AppInfo, FromEnv, app_info, env_or_default, server::ServerConfig};
use database::RetryConfig;
use database::postgres::PostgresConfig;
use messaging::EventsConfig;

pub use core_config::Environment;

/// Service configuration, composed from the shared config pieces.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: PostgresConfig,
    pub retry: RetryConfig,
    pub events: EventsConfig,
    /// Comma-separated origins, or `*`
    pub cors_allowed_origin: String,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let database = PostgresConfig::from_env()?; // DATABASE_URL is required
        let retry = RetryConfig::from_env()?;
        let events = EventsConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            environment,
            server,
            database,
            retry,
            events,
            cors_allowed_origin: env_or_default("CORS_ALLOWED_ORIGIN", "*"),
        })
    }

    pub fn router_config(&self) -> axum_helpers::RouterConfig {
        axum_helpers::RouterConfig::new(&self.cors_allowed_origin, self.server.request_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_config_from_env_defaults() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://localhost/tasks")),
                ("NATS_URL", None),
                ("CORS_ALLOWED_ORIGIN", None),
                ("PORT", None),
                ("APP_ENV", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "task_service");
                assert_eq!(config.environment, Environment::Development);
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.cors_allowed_origin, "*");
                assert!(!config.events.enabled());
            },
        );
    }

    #[test]
    fn test_config_from_env_overrides() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://localhost/tasks")),
                ("NATS_URL", Some("nats://bus:4222")),
                ("CORS_ALLOWED_ORIGIN", Some("https://app.example.com")),
                ("REQUEST_TIMEOUT_SECS", Some("5")),
                ("APP_ENV", Some("production")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert!(config.environment.is_production());
                assert!(config.events.enabled());

                let router = config.router_config();
                assert_eq!(router.cors_allowed_origin, "https://app.example.com");
                assert_eq!(router.request_timeout, Duration::from_secs(5));
            },
        );
    }

    #[test]
    fn test_config_requires_database_url() {
        temp_env::with_vars_unset(["DATABASE_URL", "DB_DSN"], || {
            assert!(Config::from_env().is_err());
        });
    }
}
