pub use sea_orm_migration::prelude::*;

mod m20260101_000001_create_projects;
mod m20260101_000002_create_tasks;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_projects::Migration),
            Box::new(m20260101_000002_create_tasks::Migration),
        ]
    }
}
