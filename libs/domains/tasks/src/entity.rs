use crate::models::{TaskPriority, TaskStatus};
use sea_orm::entity::prelude::*;

/// `tasks` table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub project_id: i64,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub user_id: String,
    pub username: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Task {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            project_id: model.project_id,
            status: model.status,
            priority: model.priority,
            user_id: model.user_id,
            username: model.username,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}
