use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("{0}")]
    Validation(String),

    /// Missing, or owned by someone else.
    #[error("task {0} not found")]
    NotFound(i64),

    /// The parent project is missing, foreign, or could not be checked.
    #[error("project not found or access denied")]
    ProjectAccess(i64),

    #[error("persistence error: {0}")]
    Persistence(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

impl From<DbErr> for TaskError {
    fn from(err: DbErr) -> Self {
        TaskError::Persistence(err.to_string())
    }
}

impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::Validation(msg) => AppError::InvalidInput(msg),
            err @ (TaskError::NotFound(_) | TaskError::ProjectAccess(_)) => {
                AppError::NotFound(err.to_string())
            }
            TaskError::Persistence(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
