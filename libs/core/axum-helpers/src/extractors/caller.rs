//! Caller identity forwarded by the upstream gateway.

use crate::errors::AppError;
use crate::http::{USER_ID_HEADER, USERNAME_HEADER};
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};

/// The authenticated caller, read from `X-User-Id` and `X-Username`.
///
/// A missing or blank user id rejects the request with 401. The username is
/// informational and may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub user_id: String,
    pub username: String,
}

impl CallerIdentity {
    pub fn new(user_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
        }
    }

    fn from_headers(headers: &HeaderMap) -> Result<Self, AppError> {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .unwrap_or_default()
                .to_string()
        };

        let user_id = header(USER_ID_HEADER);
        if user_id.is_empty() {
            return Err(AppError::Unauthorized("missing X-User-Id header".to_string()));
        }

        Ok(Self {
            user_id,
            username: header(USERNAME_HEADER),
        })
    }
}

impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_headers(&parts.headers)
    }
}
