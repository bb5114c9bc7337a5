use axum_helpers::errors::validation_message;
use messaging::{EventPublisher, NoopPublisher, publish_best_effort};
use std::sync::Arc;
use tracing::{debug, instrument};
use validator::Validate;

use crate::accessor::ProjectAccessor;
use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, NewTask, Task, TaskStatus, UpdateTask};
use crate::repository::TaskRepository;

/// Service layer for Task business logic
pub struct TaskService<R: TaskRepository, P: ProjectAccessor> {
    repository: Arc<R>,
    projects: Arc<P>,
    events: Arc<dyn EventPublisher>,
}

impl<R: TaskRepository, P: ProjectAccessor> Clone for TaskService<R, P> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            projects: Arc::clone(&self.projects),
            events: Arc::clone(&self.events),
        }
    }
}

impl<R: TaskRepository, P: ProjectAccessor> TaskService<R, P> {
    /// A service that emits no events.
    pub fn new(repository: R, projects: P) -> Self {
        Self {
            repository: Arc::new(repository),
            projects: Arc::new(projects),
            events: Arc::new(NoopPublisher),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn EventPublisher>) -> Self {
        self.events = events;
        self
    }

    /// Validate, check the parent project, persist as `open`, then announce
    /// `task.created`.
    #[instrument(skip_all, fields(project_id = input.project_id, user_id = %user_id))]
    pub async fn create_task(
        &self,
        input: CreateTask,
        user_id: &str,
        username: &str,
    ) -> TaskResult<Task> {
        input
            .validate()
            .map_err(|e| TaskError::Validation(validation_message(&e)))?;

        self.projects
            .verify_project(input.project_id, user_id)
            .await
            .map_err(|e| {
                debug!(error = %e, "Project check failed");
                TaskError::ProjectAccess(input.project_id)
            })?;

        let task = self
            .repository
            .create(NewTask {
                title: input.title,
                description: input.description.unwrap_or_default(),
                project_id: input.project_id,
                status: TaskStatus::Open,
                priority: input.priority.unwrap_or_default(),
                user_id: user_id.to_string(),
                username: username.to_string(),
            })
            .await?;

        publish_best_effort(self.events.as_ref(), &task.created_event(username)).await;
        Ok(task)
    }

    #[instrument(skip_all, fields(task_id = id, user_id = %user_id))]
    pub async fn get_task(&self, id: i64, user_id: &str) -> TaskResult<Task> {
        self.repository
            .get_by_id(id, user_id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    #[instrument(skip_all, fields(user_id = %user_id))]
    pub async fn list_tasks(&self, user_id: &str) -> TaskResult<Vec<Task>> {
        self.repository.list_by_user(user_id).await
    }

    /// Tasks are filtered by their own owner; the project itself is not re-checked.
    #[instrument(skip_all, fields(project_id = project_id, user_id = %user_id))]
    pub async fn list_tasks_by_project(
        &self,
        project_id: i64,
        user_id: &str,
    ) -> TaskResult<Vec<Task>> {
        self.repository.list_by_project(project_id, user_id).await
    }

    /// Apply the supplied fields, persist, then announce `task.updated`.
    #[instrument(skip_all, fields(task_id = id, user_id = %user_id))]
    pub async fn update_task(
        &self,
        id: i64,
        input: UpdateTask,
        user_id: &str,
        username: &str,
    ) -> TaskResult<Task> {
        let mut task = self.get_task(id, user_id).await?;
        task.apply_update(input);

        let task = self.repository.update(task).await?;

        publish_best_effort(self.events.as_ref(), &task.updated_event(username)).await;
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::MockProjectAccessor;
    use crate::models::TaskPriority;
    use crate::repository::{InMemoryTaskRepository, MockTaskRepository};
    use domain_projects::ProjectError;
    use messaging::InMemoryPublisher;
    use mockall::predicate::*;

    fn allow_all() -> MockProjectAccessor {
        let mut projects = MockProjectAccessor::new();
        projects.expect_verify_project().returning(|_, _| Ok(()));
        projects
    }

    fn service_with(
        projects: MockProjectAccessor,
    ) -> (
        TaskService<InMemoryTaskRepository, MockProjectAccessor>,
        InMemoryPublisher,
    ) {
        let events = InMemoryPublisher::new();
        let service = TaskService::new(InMemoryTaskRepository::new(), projects)
            .with_events(Arc::new(events.clone()));
        (service, events)
    }

    fn create(title: &str, project_id: i64) -> CreateTask {
        CreateTask {
            title: title.to_string(),
            project_id,
            ..CreateTask::default()
        }
    }

    #[tokio::test]
    async fn test_create_task_defaults_and_event() {
        let (service, events) = service_with(allow_all());

        let task = service.create_task(create("T1", 1), "u1", "alice").await.unwrap();

        assert_eq!(task.id, 1);
        assert_eq!(task.project_id, 1);
        assert_eq!(task.status, TaskStatus::Open);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.description, "");

        let published = events.events_named("task.created").await;
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].key, "task:1");
        assert_eq!(published[0].data["status"], "open");
        assert_eq!(published[0].data["projectID"], 1);
    }

    #[tokio::test]
    async fn test_create_task_keeps_supplied_priority() {
        let (service, _) = service_with(allow_all());
        let input = CreateTask {
            priority: Some(TaskPriority::Critical),
            description: Some("ship it".to_string()),
            ..create("T1", 1)
        };

        let task = service.create_task(input, "u1", "alice").await.unwrap();
        assert_eq!(task.priority, TaskPriority::Critical);
        assert_eq!(task.description, "ship it");
    }

    #[tokio::test]
    async fn test_create_task_empty_title_skips_everything() {
        let mut projects = MockProjectAccessor::new();
        projects.expect_verify_project().never();
        let (service, events) = service_with(projects);

        let err = service.create_task(create("", 1), "u1", "alice").await.unwrap_err();

        assert!(matches!(err, TaskError::Validation(msg) if msg == "title is required"));
        assert!(events.events().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_task_foreign_project_is_project_access() {
        let mut projects = MockProjectAccessor::new();
        projects
            .expect_verify_project()
            .with(eq(5), eq("u1"))
            .times(1)
            .returning(|id, _| Err(ProjectError::NotFound(id)));

        let mut repo = MockTaskRepository::new();
        repo.expect_create().never();

        let service = TaskService::new(repo, projects);
        let err = service.create_task(create("T1", 5), "u1", "alice").await.unwrap_err();

        assert!(matches!(err, TaskError::ProjectAccess(5)));
    }

    #[tokio::test]
    async fn test_project_lookup_failure_is_project_access() {
        let mut projects = MockProjectAccessor::new();
        projects
            .expect_verify_project()
            .returning(|_, _| Err(ProjectError::Persistence("timeout".to_string())));
        let (service, _) = service_with(projects);

        let err = service.create_task(create("T1", 1), "u1", "alice").await.unwrap_err();
        assert!(matches!(err, TaskError::ProjectAccess(1)));
    }

    #[tokio::test]
    async fn test_create_task_survives_publish_failure() {
        let events = InMemoryPublisher::failing();
        let service = TaskService::new(InMemoryTaskRepository::new(), allow_all())
            .with_events(Arc::new(events.clone()));

        let task = service.create_task(create("T1", 1), "u1", "alice").await.unwrap();

        assert_eq!(events.failed_attempts(), 1);
        assert_eq!(service.get_task(task.id, "u1").await.unwrap(), task);
    }

    #[tokio::test]
    async fn test_update_applies_only_non_empty_fields() {
        let (service, events) = service_with(allow_all());
        let input = CreateTask {
            description: Some("first".to_string()),
            ..create("T1", 1)
        };
        service.create_task(input, "u1", "alice").await.unwrap();

        let updated = service
            .update_task(
                1,
                UpdateTask {
                    status: Some(TaskStatus::Completed),
                    ..UpdateTask::default()
                },
                "u1",
                "alice",
            )
            .await
            .unwrap();

        assert_eq!(updated.status, TaskStatus::Completed);
        assert_eq!(updated.title, "T1");
        assert_eq!(updated.description, "first");

        let published = events.events_named("task.updated").await;
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].data["status"], "completed");
        assert_eq!(published[0].data["title"], "T1");
    }

    #[tokio::test]
    async fn test_update_other_owner_is_not_found() {
        let (service, events) = service_with(allow_all());
        service.create_task(create("T1", 1), "u1", "alice").await.unwrap();

        let err = service
            .update_task(1, UpdateTask::default(), "u2", "bob")
            .await
            .unwrap_err();

        assert!(matches!(err, TaskError::NotFound(1)));
        assert!(events.events_named("task.updated").await.is_empty());
    }

    #[tokio::test]
    async fn test_get_and_list_are_owner_scoped() {
        let (service, _) = service_with(allow_all());
        service.create_task(create("T1", 1), "u1", "alice").await.unwrap();
        service.create_task(create("T2", 2), "u1", "alice").await.unwrap();
        service.create_task(create("T3", 1), "u2", "bob").await.unwrap();

        assert!(matches!(
            service.get_task(1, "u2").await,
            Err(TaskError::NotFound(1))
        ));
        assert_eq!(service.list_tasks("u1").await.unwrap().len(), 2);

        let by_project = service.list_tasks_by_project(1, "u1").await.unwrap();
        assert_eq!(by_project.len(), 1);
        assert_eq!(by_project[0].title, "T1");
    }

    #[tokio::test]
    async fn test_update_persistence_failure_skips_publish() {
        let mut repo = MockTaskRepository::new();
        repo.expect_get_by_id().returning(|id, user_id| {
            let now = chrono::Utc::now();
            Ok(Some(Task {
                id,
                title: "T1".to_string(),
                description: String::new(),
                project_id: 1,
                status: TaskStatus::Open,
                priority: TaskPriority::Medium,
                user_id: user_id.to_string(),
                username: "alice".to_string(),
                created_at: now,
                updated_at: now,
            }))
        });
        repo.expect_update()
            .times(1)
            .returning(|_| Err(TaskError::Persistence("disk full".to_string())));

        let events = InMemoryPublisher::new();
        let service = TaskService::new(repo, allow_all()).with_events(Arc::new(events.clone()));

        let err = service
            .update_task(1, UpdateTask::default(), "u1", "alice")
            .await
            .unwrap_err();
        assert!(matches!(err, TaskError::Persistence(_)));
        assert!(events.events().await.is_empty());
    }
}
