use async_trait::async_trait;
use domain_projects::{ProjectRepository, ProjectResult, ProjectService};

/// The one question tasks ask about projects: may this user attach work to it?
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectAccessor: Send + Sync {
    /// `Ok` only when the project exists and belongs to `user_id`.
    async fn verify_project(&self, project_id: i64, user_id: &str) -> ProjectResult<()>;
}

#[async_trait]
impl<R: ProjectRepository> ProjectAccessor for ProjectService<R> {
    async fn verify_project(&self, project_id: i64, user_id: &str) -> ProjectResult<()> {
        self.get_project(project_id, user_id).await.map(|_| ())
    }
}
