use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260101_000001_create_projects::Projects;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(TaskStatus::Enum)
                    .values(TaskStatus::values())
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(TaskPriority::Enum)
                    .values(TaskPriority::values())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(big_integer(Tasks::Id).auto_increment().primary_key())
                    .col(string(Tasks::Title))
                    .col(text(Tasks::Description).default(""))
                    .col(big_integer(Tasks::ProjectId))
                    .col(
                        ColumnDef::new(Tasks::Status)
                            .enumeration(TaskStatus::Enum, TaskStatus::values())
                            .not_null()
                            .default("open"),
                    )
                    .col(
                        ColumnDef::new(Tasks::Priority)
                            .enumeration(TaskPriority::Enum, TaskPriority::values())
                            .not_null()
                            .default("medium"),
                    )
                    .col(string(Tasks::UserId))
                    .col(string(Tasks::Username).default(""))
                    .col(
                        timestamp_with_time_zone(Tasks::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Tasks::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tasks_project_id")
                            .from(Tasks::Table, Tasks::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_user_id")
                    .table(Tasks::Table)
                    .col(Tasks::UserId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_project_id")
                    .table(Tasks::Table)
                    .col(Tasks::ProjectId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tasks::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_type(Type::drop().if_exists().name(TaskPriority::Enum).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().if_exists().name(TaskStatus::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Tasks {
    Table,
    Id,
    Title,
    Description,
    ProjectId,
    Status,
    Priority,
    UserId,
    Username,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum TaskStatus {
    #[sea_orm(iden = "task_status")]
    Enum,
    #[sea_orm(iden = "open")]
    Open,
    #[sea_orm(iden = "in_progress")]
    InProgress,
    #[sea_orm(iden = "completed")]
    Completed,
    #[sea_orm(iden = "closed")]
    Closed,
}

impl TaskStatus {
    fn values() -> [Self; 4] {
        [Self::Open, Self::InProgress, Self::Completed, Self::Closed]
    }
}

#[derive(DeriveIden, Clone, Copy)]
enum TaskPriority {
    #[sea_orm(iden = "task_priority")]
    Enum,
    #[sea_orm(iden = "low")]
    Low,
    #[sea_orm(iden = "medium")]
    Medium,
    #[sea_orm(iden = "high")]
    High,
    #[sea_orm(iden = "critical")]
    Critical,
}

impl TaskPriority {
    fn values() -> [Self; 4] {
        [Self::Low, Self::Medium, Self::High, Self::Critical]
    }
}
