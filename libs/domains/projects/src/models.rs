use chrono::{DateTime, Utc};
use messaging::ProjectCreated;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;
use validator::Validate;

/// A named container for tasks, owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
pub struct Project {
    /// System-assigned identifier
    pub id: i64,
    pub name: String,
    /// Owner id from the caller identity
    pub user_id: String,
    /// Owner display name at creation time
    pub username: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn created_event(&self) -> ProjectCreated {
        ProjectCreated {
            id: self.id,
            name: self.name.clone(),
            user_id: self.user_id.clone(),
            username: self.username.clone(),
        }
    }
}

/// Request body for creating a project.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema, TS)]
#[ts(export)]
pub struct CreateProject {
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
}

/// Row handed to the repository; ownership comes from the caller, not the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub user_id: String,
    pub username: String,
}
