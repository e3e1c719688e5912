//! Permissive cross-origin headers added to every response.
//!
//! The API holds no sensitive data and has no authentication, so any origin
//! may call it.

use axum::{
    Router,
    http::{
        HeaderValue,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
    },
};
use tower_http::set_header::SetResponseHeaderLayer;

/// The value of the `Access-Control-Allow-Origin` header.
pub const ALLOW_ORIGIN: &str = "*";
/// The value of the `Access-Control-Allow-Methods` header.
pub const ALLOW_METHODS: &str = "GET, POST, DELETE, OPTIONS";
/// The value of the `Access-Control-Allow-Headers` header.
pub const ALLOW_HEADERS: &str = "Content-Type";

/// Add the cross-origin headers to every response from `router`, including
/// error responses and responses from the fallback handlers.
pub fn add_cors_headers(router: Router) -> Router {
    router
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ))
}
