use crate::event::event_names::PROJECT_PREFIX;
use core_config::{ConfigError, FromEnv, env_optional, env_or_default, env_parse_or};
use std::time::Duration;

pub const DEFAULT_TASK_SUBJECT: &str = "task-events";
pub const DEFAULT_PROJECT_SUBJECT: &str = "project-events";
const DEFAULT_PUBLISH_TIMEOUT_MS: u64 = 2000;

/// Event bus settings.
///
/// Events are disabled when `nats_url` is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct EventsConfig {
    pub nats_url: Option<String>,
    pub task_subject: String,
    pub project_subject: String,
    pub publish_timeout: Duration,
}

impl EventsConfig {
    pub fn enabled(&self) -> bool {
        self.nats_url.is_some()
    }

    /// `project.*` events go to the project subject, everything else to the task subject.
    pub fn subject_for(&self, event: &str) -> &str {
        if event.starts_with(PROJECT_PREFIX) {
            &self.project_subject
        } else {
            &self.task_subject
        }
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            nats_url: None,
            task_subject: DEFAULT_TASK_SUBJECT.to_string(),
            project_subject: DEFAULT_PROJECT_SUBJECT.to_string(),
            publish_timeout: Duration::from_millis(DEFAULT_PUBLISH_TIMEOUT_MS),
        }
    }
}

/// - NATS_URL (unset disables events)
/// - EVENTS_TASK_SUBJECT (default "task-events")
/// - EVENTS_PROJECT_SUBJECT (default "project-events")
/// - EVENTS_PUBLISH_TIMEOUT_MS (default 2000)
impl FromEnv for EventsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            nats_url: env_optional("NATS_URL"),
            task_subject: env_or_default("EVENTS_TASK_SUBJECT", DEFAULT_TASK_SUBJECT),
            project_subject: env_or_default("EVENTS_PROJECT_SUBJECT", DEFAULT_PROJECT_SUBJECT),
            publish_timeout: Duration::from_millis(env_parse_or(
                "EVENTS_PUBLISH_TIMEOUT_MS",
                DEFAULT_PUBLISH_TIMEOUT_MS,
            )?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 4] = [
        "NATS_URL",
        "EVENTS_TASK_SUBJECT",
        "EVENTS_PROJECT_SUBJECT",
        "EVENTS_PUBLISH_TIMEOUT_MS",
    ];

    #[test]
    fn test_defaults_disable_events() {
        temp_env::with_vars_unset(VARS, || {
            let config = EventsConfig::from_env().unwrap();
            assert!(!config.enabled());
            assert_eq!(config, EventsConfig::default());
        });
    }

    #[test]
    fn test_from_env_custom() {
        temp_env::with_vars(
            [
                ("NATS_URL", Some("nats://localhost:4222")),
                ("EVENTS_TASK_SUBJECT", Some("tasks")),
                ("EVENTS_PROJECT_SUBJECT", Some("projects")),
                ("EVENTS_PUBLISH_TIMEOUT_MS", Some("500")),
            ],
            || {
                let config = EventsConfig::from_env().unwrap();
                assert!(config.enabled());
                assert_eq!(config.task_subject, "tasks");
                assert_eq!(config.project_subject, "projects");
                assert_eq!(config.publish_timeout, Duration::from_millis(500));
            },
        );
    }

    #[test]
    fn test_blank_url_disables_events() {
        temp_env::with_var("NATS_URL", Some(""), || {
            assert!(!EventsConfig::from_env().unwrap().enabled());
        });
    }

    #[test]
    fn test_invalid_timeout() {
        temp_env::with_var("EVENTS_PUBLISH_TIMEOUT_MS", Some("fast"), || {
            assert!(EventsConfig::from_env().is_err());
        });
    }

    #[test]
    fn test_subject_routing_by_prefix() {
        let config = EventsConfig::default();
        assert_eq!(config.subject_for("project.created"), "project-events");
        assert_eq!(config.subject_for("task.created"), "task-events");
        assert_eq!(config.subject_for("task.updated"), "task-events");
        assert_eq!(config.subject_for("projects"), "task-events");
    }
}
