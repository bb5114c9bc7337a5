use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use crate::{
    entity,
    error::ProjectResult,
    models::{NewProject, Project},
    repository::ProjectRepository,
};

#[derive(Clone)]
pub struct PgProjectRepository {
    db: DatabaseConnection,
}

impl PgProjectRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProjectRepository for PgProjectRepository {
    async fn create(&self, input: NewProject) -> ProjectResult<Project> {
        let now = Utc::now();
        let model = entity::ActiveModel {
            name: Set(input.name),
            user_id: Set(input.user_id),
            username: Set(input.username),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        tracing::info!(project_id = model.id, "Created project");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64, user_id: &str) -> ProjectResult<Option<Project>> {
        let model = entity::Entity::find_by_id(id)
            .filter(entity::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn list_by_user(&self, user_id: &str) -> ProjectResult<Vec<Project>> {
        let models = entity::Entity::find()
            .filter(entity::Column::UserId.eq(user_id))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
