use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{TaskError, TaskResult};
use crate::models::{NewTask, Task};

/// Task persistence. Lookups never return another user's task.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn create(&self, input: NewTask) -> TaskResult<Task>;

    async fn get_by_id(&self, id: i64, user_id: &str) -> TaskResult<Option<Task>>;

    async fn list_by_user(&self, user_id: &str) -> TaskResult<Vec<Task>>;

    async fn list_by_project(&self, project_id: i64, user_id: &str) -> TaskResult<Vec<Task>>;

    /// Persist every mutable field of `task`. `NotFound` if the row is gone.
    async fn update(&self, task: Task) -> TaskResult<Task>;
}

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    tasks: BTreeMap<i64, Task>,
}

/// In-memory implementation of TaskRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryTaskRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, input: NewTask) -> TaskResult<Task> {
        let mut store = self.store.write().await;
        store.next_id += 1;

        let now = Utc::now();
        let task = Task {
            id: store.next_id,
            title: input.title,
            description: input.description,
            project_id: input.project_id,
            status: input.status,
            priority: input.priority,
            user_id: input.user_id,
            username: input.username,
            created_at: now,
            updated_at: now,
        };
        store.tasks.insert(task.id, task.clone());

        tracing::info!(task_id = task.id, project_id = task.project_id, "Created task");
        Ok(task)
    }

    async fn get_by_id(&self, id: i64, user_id: &str) -> TaskResult<Option<Task>> {
        let store = self.store.read().await;
        Ok(store
            .tasks
            .get(&id)
            .filter(|t| t.user_id == user_id)
            .cloned())
    }

    async fn list_by_user(&self, user_id: &str) -> TaskResult<Vec<Task>> {
        let store = self.store.read().await;
        Ok(store
            .tasks
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_by_project(&self, project_id: i64, user_id: &str) -> TaskResult<Vec<Task>> {
        let store = self.store.read().await;
        Ok(store
            .tasks
            .values()
            .filter(|t| t.project_id == project_id && t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update(&self, task: Task) -> TaskResult<Task> {
        let mut store = self.store.write().await;
        let slot = store
            .tasks
            .get_mut(&task.id)
            .ok_or(TaskError::NotFound(task.id))?;
        *slot = task.clone();

        tracing::info!(task_id = task.id, status = %task.status, "Updated task");
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TaskPriority, TaskStatus};

    fn new_task(title: &str, project_id: i64, user_id: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            description: String::new(),
            project_id,
            status: TaskStatus::Open,
            priority: TaskPriority::Medium,
            user_id: user_id.to_string(),
            username: "alice".to_string(),
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let repo = InMemoryTaskRepository::new();
        let a = repo.create(new_task("a", 1, "u1")).await.unwrap();
        let b = repo.create(new_task("b", 1, "u2")).await.unwrap();

        assert_eq!((a.id, b.id), (1, 2));
    }

    #[tokio::test]
    async fn test_lookups_are_owner_scoped() {
        let repo = InMemoryTaskRepository::new();
        let task = repo.create(new_task("a", 1, "u1")).await.unwrap();

        assert!(repo.get_by_id(task.id, "u1").await.unwrap().is_some());
        assert!(repo.get_by_id(task.id, "u2").await.unwrap().is_none());
        assert!(repo.list_by_user("u2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_by_project_filters_both_keys() {
        let repo = InMemoryTaskRepository::new();
        repo.create(new_task("a", 1, "u1")).await.unwrap();
        repo.create(new_task("b", 2, "u1")).await.unwrap();
        repo.create(new_task("c", 1, "u2")).await.unwrap();
        repo.create(new_task("d", 1, "u1")).await.unwrap();

        let titles: Vec<String> = repo
            .list_by_project(1, "u1")
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, ["a", "d"]);
    }

    #[tokio::test]
    async fn test_update_replaces_stored_row() {
        let repo = InMemoryTaskRepository::new();
        let mut task = repo.create(new_task("a", 1, "u1")).await.unwrap();
        task.status = TaskStatus::Closed;

        repo.update(task).await.unwrap();

        let stored = repo.get_by_id(1, "u1").await.unwrap().unwrap();
        assert_eq!(stored.status, TaskStatus::Closed);
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let repo = InMemoryTaskRepository::new();
        let mut task = repo.create(new_task("a", 1, "u1")).await.unwrap();
        task.id = 42;

        assert!(matches!(repo.update(task).await, Err(TaskError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_ids() {
        let repo = InMemoryTaskRepository::new();
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.create(new_task(&format!("t{i}"), 1, "u1")).await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().id);
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=16).collect::<Vec<_>>());
    }
}
