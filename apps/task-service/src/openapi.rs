use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse, axum_helpers::HealthResponse)
    ),
    info(
        title = "Task Service API",
        version = "0.1.0",
        description = "Projects and the tasks inside them, scoped to the calling user (X-User-Id)"
    ),
    nest(
        (path = "/projects", api = domain_projects::ApiDoc),
        (path = "/tasks", api = domain_tasks::ApiDoc)
    )
)]
pub struct ApiDoc;
