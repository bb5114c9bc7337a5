use chrono::{DateTime, Utc};
use messaging::{TaskCreated, TaskSnapshot, TaskUpdated};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumString};
use ts_rs::TS;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Task priority levels
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
    TS,
)]
#[ts(export)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "task_priority")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TaskPriority {
    #[sea_orm(string_value = "low")]
    Low,
    #[default]
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "high")]
    High,
    #[sea_orm(string_value = "critical")]
    Critical,
}

/// Task status. Any status may move to any other.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
    TS,
)]
#[ts(export)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "task_status")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TaskStatus {
    /// Every new task starts here
    #[default]
    #[sea_orm(string_value = "open")]
    Open,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "closed")]
    Closed,
}

/// A unit of work inside a project, owned by the user who created it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub project_id: i64,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub user_id: String,
    pub username: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    /// Refreshed on every update
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Overwrite the fields the update carries; absent ones keep their value.
    pub fn apply_update(&mut self, update: UpdateTask) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        self.updated_at = Utc::now();
    }

    /// Event payload, enriched with the acting caller's display name.
    pub fn snapshot(&self, username: &str) -> TaskSnapshot {
        TaskSnapshot {
            id: self.id,
            project_id: self.project_id,
            title: self.title.clone(),
            status: self.status.to_string(),
            user_id: self.user_id.clone(),
            username: username.to_string(),
        }
    }

    pub fn created_event(&self, username: &str) -> TaskCreated {
        TaskCreated(self.snapshot(username))
    }

    pub fn updated_event(&self, username: &str) -> TaskUpdated {
        TaskUpdated(self.snapshot(username))
    }
}

/// Request body for creating a task.
///
/// Empty strings count as absent. A missing `project_id` never matches a
/// project, so the request fails the ownership check.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema, TS)]
#[ts(export)]
pub struct CreateTask {
    #[serde(default)]
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub description: Option<String>,
    #[serde(default, alias = "projectID")]
    pub project_id: i64,
    /// `medium` when omitted
    #[serde(default, deserialize_with = "empty_as_none")]
    pub priority: Option<TaskPriority>,
}

/// Request body for updating a task. Only non-empty fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema, TS)]
#[ts(export)]
pub struct UpdateTask {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub priority: Option<TaskPriority>,
}

/// Row handed to the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub project_id: i64,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub user_id: String,
    pub username: String,
}

/// Query parameters for `GET /tasks`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TaskListQuery {
    /// Restrict the listing to one project
    #[serde(default, alias = "projectID", deserialize_with = "empty_as_none")]
    pub project_id: Option<i64>,
}

/// Deserialize a string field where `""` means "not supplied".
///
/// Non-empty values go through `FromStr`, so an unknown enum value is a
/// deserialization error.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.is_empty() => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| de::Error::custom(format!("invalid value '{raw}': {e}"))),
    }
}
