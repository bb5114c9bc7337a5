use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    CallerIdentity, IdPath, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProjectResult;
use crate::models::{CreateProject, Project};
use crate::repository::ProjectRepository;
use crate::service::ProjectService;

pub const TAG: &str = "projects";

/// OpenAPI documentation for Projects API
#[derive(OpenApi)]
#[openapi(
    paths(list_projects, create_project, get_project),
    components(
        schemas(Project, CreateProject),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Project management endpoints")
    )
)]
pub struct ApiDoc;

/// Project routes, to be nested under `/projects`.
pub fn router<R: ProjectRepository + 'static>(service: ProjectService<R>) -> Router {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route("/{id}", get(get_project))
        .with_state(Arc::new(service))
}

/// List the caller's projects
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(
        ("X-User-Id" = String, Header, description = "Caller user id"),
    ),
    responses(
        (status = 200, description = "The caller's projects in creation order", body = Vec<Project>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_projects<R: ProjectRepository>(
    State(service): State<Arc<ProjectService<R>>>,
    caller: CallerIdentity,
) -> ProjectResult<Json<Vec<Project>>> {
    let projects = service.list_projects(&caller.user_id).await?;
    Ok(Json(projects))
}

/// Create a project owned by the caller
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    params(
        ("X-User-Id" = String, Header, description = "Caller user id"),
        ("X-Username" = Option<String>, Header, description = "Caller display name"),
    ),
    request_body = CreateProject,
    responses(
        (status = 201, description = "Project created", body = Project),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_project<R: ProjectRepository>(
    State(service): State<Arc<ProjectService<R>>>,
    caller: CallerIdentity,
    ValidatedJson(input): ValidatedJson<CreateProject>,
) -> ProjectResult<impl IntoResponse> {
    let project = service
        .create_project(input, &caller.user_id, &caller.username)
        .await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// Get one of the caller's projects
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Project ID"),
        ("X-User-Id" = String, Header, description = "Caller user id"),
    ),
    responses(
        (status = 200, description = "Project found", body = Project),
        (status = 400, response = BadRequestIdResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_project<R: ProjectRepository>(
    State(service): State<Arc<ProjectService<R>>>,
    caller: CallerIdentity,
    IdPath(id): IdPath,
) -> ProjectResult<Json<Project>> {
    let project = service.get_project(id, &caller.user_id).await?;
    Ok(Json(project))
}
