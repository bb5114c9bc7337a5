use axum::http::{HeaderName, HeaderValue, Method, header, header::InvalidHeaderValue};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Caller identity headers forwarded by the gateway.
pub const USER_ID_HEADER: &str = "x-user-id";
pub const USERNAME_HEADER: &str = "x-username";

/// Creates the CORS layer from a comma-separated origin list.
///
/// `*` or an empty list allows any origin. Credentials are never allowed,
/// the service reads identity from headers rather than cookies.
pub fn create_cors_layer(origins: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    let origins: Vec<&str> = origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let allow_origin = if origins.is_empty() || origins.contains(&"*") {
        AllowOrigin::from(Any)
    } else {
        let values = origins
            .into_iter()
            .map(HeaderValue::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(values)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(USER_ID_HEADER),
            HeaderName::from_static(USERNAME_HEADER),
        ])
        .max_age(Duration::from_secs(3600)))
}
