use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ProjectResult;
use crate::models::{NewProject, Project};

/// Project persistence. Every read is filtered by owner.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Insert a project and return it with its assigned id and timestamps.
    async fn create(&self, input: NewProject) -> ProjectResult<Project>;

    /// `None` when the project does not exist or belongs to another user.
    async fn get_by_id(&self, id: i64, user_id: &str) -> ProjectResult<Option<Project>>;

    /// All of the user's projects in id order.
    async fn list_by_user(&self, user_id: &str) -> ProjectResult<Vec<Project>>;
}

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    projects: BTreeMap<i64, Project>,
}

/// In-memory implementation of ProjectRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProjectRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn create(&self, input: NewProject) -> ProjectResult<Project> {
        let mut store = self.store.write().await;
        store.next_id += 1;

        let now = Utc::now();
        let project = Project {
            id: store.next_id,
            name: input.name,
            user_id: input.user_id,
            username: input.username,
            created_at: now,
            updated_at: now,
        };
        store.projects.insert(project.id, project.clone());

        tracing::info!(project_id = project.id, "Created project");
        Ok(project)
    }

    async fn get_by_id(&self, id: i64, user_id: &str) -> ProjectResult<Option<Project>> {
        let store = self.store.read().await;
        Ok(store
            .projects
            .get(&id)
            .filter(|p| p.user_id == user_id)
            .cloned())
    }

    async fn list_by_user(&self, user_id: &str) -> ProjectResult<Vec<Project>> {
        let store = self.store.read().await;
        Ok(store
            .projects
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_project(name: &str, user_id: &str) -> NewProject {
        NewProject {
            name: name.to_string(),
            user_id: user_id.to_string(),
            username: format!("{}-name", user_id),
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential_from_one() {
        let repo = InMemoryProjectRepository::new();

        let first = repo.create(new_project("Alpha", "u1")).await.unwrap();
        let second = repo.create(new_project("Beta", "u2")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.created_at, first.updated_at);
    }

    #[tokio::test]
    async fn test_get_by_id_is_owner_scoped() {
        let repo = InMemoryProjectRepository::new();
        let project = repo.create(new_project("Alpha", "u1")).await.unwrap();

        assert!(repo.get_by_id(project.id, "u1").await.unwrap().is_some());
        assert!(repo.get_by_id(project.id, "u2").await.unwrap().is_none());
        assert!(repo.get_by_id(999, "u1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_by_user_in_id_order() {
        let repo = InMemoryProjectRepository::new();
        repo.create(new_project("A", "u1")).await.unwrap();
        repo.create(new_project("B", "u2")).await.unwrap();
        repo.create(new_project("C", "u1")).await.unwrap();

        let names: Vec<_> = repo
            .list_by_user("u1")
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["A", "C"]);
        assert!(repo.list_by_user("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_ids() {
        let repo = InMemoryProjectRepository::new();

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.create(new_project(&format!("p{}", i), "u1")).await.unwrap().id
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }
}
