use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::{
    entity,
    error::{TaskError, TaskResult},
    models::{NewTask, Task},
    repository::TaskRepository,
};

#[derive(Clone)]
pub struct PgTaskRepository {
    db: DatabaseConnection,
}

impl PgTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn create(&self, input: NewTask) -> TaskResult<Task> {
        let now = Utc::now();
        let model = entity::ActiveModel {
            title: Set(input.title),
            description: Set(input.description),
            project_id: Set(input.project_id),
            status: Set(input.status),
            priority: Set(input.priority),
            user_id: Set(input.user_id),
            username: Set(input.username),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        tracing::info!(task_id = model.id, project_id = model.project_id, "Created task");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64, user_id: &str) -> TaskResult<Option<Task>> {
        let model = entity::Entity::find_by_id(id)
            .filter(entity::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn list_by_user(&self, user_id: &str) -> TaskResult<Vec<Task>> {
        let models = entity::Entity::find()
            .filter(entity::Column::UserId.eq(user_id))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_by_project(&self, project_id: i64, user_id: &str) -> TaskResult<Vec<Task>> {
        let models = entity::Entity::find()
            .filter(entity::Column::ProjectId.eq(project_id))
            .filter(entity::Column::UserId.eq(user_id))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, task: Task) -> TaskResult<Task> {
        let id = task.id;
        let active = entity::ActiveModel {
            id: Unchanged(task.id),
            title: Set(task.title),
            description: Set(task.description),
            project_id: Unchanged(task.project_id),
            status: Set(task.status),
            priority: Set(task.priority),
            user_id: Unchanged(task.user_id),
            username: Unchanged(task.username),
            created_at: Unchanged(task.created_at.into()),
            updated_at: Set(task.updated_at.into()),
        };

        let model = match active.update(&self.db).await {
            Ok(model) => model,
            Err(DbErr::RecordNotUpdated) => return Err(TaskError::NotFound(id)),
            Err(e) => return Err(e.into()),
        };

        tracing::info!(task_id = model.id, status = %model.status, "Updated task");
        Ok(model.into())
    }
}
