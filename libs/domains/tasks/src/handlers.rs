use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AppError, CallerIdentity, IdPath, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestQueryResponse, BadRequestValidationResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::accessor::ProjectAccessor;
use crate::error::TaskResult;
use crate::models::{CreateTask, Task, TaskListQuery, TaskPriority, TaskStatus, UpdateTask};
use crate::repository::TaskRepository;
use crate::service::TaskService;

pub const TAG: &str = "tasks";

/// OpenAPI documentation for Tasks API
#[derive(OpenApi)]
#[openapi(
    paths(list_tasks, create_task, get_task, update_task),
    components(
        schemas(Task, CreateTask, UpdateTask, TaskStatus, TaskPriority),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            BadRequestQueryResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Task management endpoints")
    )
)]
pub struct ApiDoc;

type SharedService<R, P> = Arc<TaskService<R, P>>;

/// Task routes, to be nested under `/tasks`.
pub fn router<R, P>(service: TaskService<R, P>) -> Router
where
    R: TaskRepository + 'static,
    P: ProjectAccessor + 'static,
{
    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/{id}", get(get_task).put(update_task))
        .with_state(Arc::new(service))
}

/// List the caller's tasks, optionally within one project
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(
        TaskListQuery,
        ("X-User-Id" = String, Header, description = "Caller user id"),
    ),
    responses(
        (status = 200, description = "The caller's tasks in creation order", body = Vec<Task>),
        (status = 400, response = BadRequestQueryResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_tasks<R: TaskRepository, P: ProjectAccessor>(
    State(service): State<SharedService<R, P>>,
    caller: CallerIdentity,
    query: Result<Query<TaskListQuery>, QueryRejection>,
) -> Result<Json<Vec<Task>>, AppError> {
    let Query(query) = query?;

    let tasks = match query.project_id {
        Some(project_id) => {
            service
                .list_tasks_by_project(project_id, &caller.user_id)
                .await?
        }
        None => service.list_tasks(&caller.user_id).await?,
    };
    Ok(Json(tasks))
}

/// Create a task in one of the caller's projects
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    params(
        ("X-User-Id" = String, Header, description = "Caller user id"),
        ("X-Username" = Option<String>, Header, description = "Caller display name"),
    ),
    request_body = CreateTask,
    responses(
        (status = 201, description = "Task created with status open", body = Task),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_task<R: TaskRepository, P: ProjectAccessor>(
    State(service): State<SharedService<R, P>>,
    caller: CallerIdentity,
    ValidatedJson(input): ValidatedJson<CreateTask>,
) -> TaskResult<impl IntoResponse> {
    let task = service
        .create_task(input, &caller.user_id, &caller.username)
        .await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Get one of the caller's tasks
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Task ID"),
        ("X-User-Id" = String, Header, description = "Caller user id"),
    ),
    responses(
        (status = 200, description = "Task found", body = Task),
        (status = 400, response = BadRequestIdResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_task<R: TaskRepository, P: ProjectAccessor>(
    State(service): State<SharedService<R, P>>,
    caller: CallerIdentity,
    IdPath(id): IdPath,
) -> TaskResult<Json<Task>> {
    let task = service.get_task(id, &caller.user_id).await?;
    Ok(Json(task))
}

/// Update one of the caller's tasks; empty or missing fields are left unchanged
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Task ID"),
        ("X-User-Id" = String, Header, description = "Caller user id"),
        ("X-Username" = Option<String>, Header, description = "Caller display name"),
    ),
    request_body = UpdateTask,
    responses(
        (status = 200, description = "Task updated", body = Task),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_task<R: TaskRepository, P: ProjectAccessor>(
    State(service): State<SharedService<R, P>>,
    caller: CallerIdentity,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateTask>,
) -> TaskResult<Json<Task>> {
    let task = service
        .update_task(id, input, &caller.user_id, &caller.username)
        .await?;
    Ok(Json(task))
}
