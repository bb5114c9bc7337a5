use axum::Router;
use database::postgres::DatabaseConnection;
use domain_projects::{PgProjectRepository, ProjectRepository, ProjectService};
use domain_tasks::{PgTaskRepository, TaskRepository, TaskService};

pub mod health;

use crate::state::AppState;

/// Postgres-backed domain routes, sharing the state's publisher.
pub fn routes(state: &AppState) -> Router {
    let projects = ProjectService::new(PgProjectRepository::new(state.db.clone()))
        .with_events(state.events.clone());
    let tasks = TaskService::new(PgTaskRepository::new(state.db.clone()), projects.clone())
        .with_events(state.events.clone());

    domain_routes(projects, tasks)
}

/// Mount both domains. The task service checks parent projects through the
/// same `ProjectService` that serves `/projects`.
pub fn domain_routes<PR, TR>(
    projects: ProjectService<PR>,
    tasks: TaskService<TR, ProjectService<PR>>,
) -> Router
where
    PR: ProjectRepository + 'static,
    TR: TaskRepository + 'static,
{
    Router::new()
        .nest("/projects", domain_projects::handlers::router(projects))
        .nest("/tasks", domain_tasks::handlers::router(tasks))
}

/// `/ready`, probing the database pool.
pub fn ready_router(db: DatabaseConnection) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(db)
}
