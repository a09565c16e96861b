//! CORS middleware configuration.

use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

use super::auth::TOKEN_HEADER;

/// Create a CORS layer from configuration.
pub fn create_cors_layer(origins: &[String]) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];

    // No origins configured: any origin, no credentials
    if origins.is_empty() {
        CorsLayer::new()
            .allow_methods(methods)
            .allow_headers(Any)
            .allow_origin(Any)
    } else {
        let parsed_origins: Vec<HeaderValue> =
            origins.iter().filter_map(|o| o.parse().ok()).collect();

        if parsed_origins.is_empty() {
            tracing::warn!("No valid CORS origins configured, allowing any origin");
            CorsLayer::new()
                .allow_methods(methods)
                .allow_headers(Any)
                .allow_origin(Any)
        } else {
            CorsLayer::new()
                .allow_methods(methods)
                .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT, TOKEN_HEADER])
                .allow_credentials(true)
                .allow_origin(parsed_origins)
        }
    }
}
