//! HTTP middleware: CORS and security headers.

pub mod cors;
pub mod security;

pub use cors::{USER_ID_HEADER, USERNAME_HEADER, create_cors_layer};
pub use security::security_headers;
