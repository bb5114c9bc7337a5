use axum_helpers::errors::validation_message;
use messaging::{EventPublisher, NoopPublisher, publish_best_effort};
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProjectError, ProjectResult};
use crate::models::{CreateProject, NewProject, Project};
use crate::repository::ProjectRepository;

/// Service layer for Project business logic
pub struct ProjectService<R: ProjectRepository> {
    repository: Arc<R>,
    events: Arc<dyn EventPublisher>,
}

impl<R: ProjectRepository> Clone for ProjectService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            events: Arc::clone(&self.events),
        }
    }
}

impl<R: ProjectRepository> ProjectService<R> {
    /// A service that emits no events.
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            events: Arc::new(NoopPublisher),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn EventPublisher>) -> Self {
        self.events = events;
        self
    }

    /// Validate, persist, then announce `project.created`.
    ///
    /// The event is best-effort: the project is returned even if publishing fails.
    #[instrument(skip_all, fields(user_id = %user_id))]
    pub async fn create_project(
        &self,
        input: CreateProject,
        user_id: &str,
        username: &str,
    ) -> ProjectResult<Project> {
        input
            .validate()
            .map_err(|e| ProjectError::Validation(validation_message(&e)))?;

        let project = self
            .repository
            .create(NewProject {
                name: input.name,
                user_id: user_id.to_string(),
                username: username.to_string(),
            })
            .await?;

        publish_best_effort(self.events.as_ref(), &project.created_event()).await;
        Ok(project)
    }

    #[instrument(skip_all, fields(project_id = id, user_id = %user_id))]
    pub async fn get_project(&self, id: i64, user_id: &str) -> ProjectResult<Project> {
        self.repository
            .get_by_id(id, user_id)
            .await?
            .ok_or(ProjectError::NotFound(id))
    }

    #[instrument(skip_all, fields(user_id = %user_id))]
    pub async fn list_projects(&self, user_id: &str) -> ProjectResult<Vec<Project>> {
        self.repository.list_by_user(user_id).await
    }
}
