use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("{0}")]
    Validation(String),

    /// Missing, or owned by someone else.
    #[error("project {0} not found")]
    NotFound(i64),

    #[error("persistence error: {0}")]
    Persistence(String),
}

pub type ProjectResult<T> = Result<T, ProjectError>;

impl From<DbErr> for ProjectError {
    fn from(err: DbErr) -> Self {
        ProjectError::Persistence(err.to_string())
    }
}

impl From<ProjectError> for AppError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::Validation(msg) => AppError::InvalidInput(msg),
            err @ ProjectError::NotFound(_) => AppError::NotFound(err.to_string()),
            ProjectError::Persistence(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for ProjectError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
