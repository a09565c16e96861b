//! Router configuration for the HTTP interface.

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use super::handlers::{
    connect, disconnect, get_index, get_show, get_stats, get_status, me, post_upload, AppState,
};
use super::middleware::{create_cors_layer, session_context};

/// Default request body limit (10MB).
pub const DEFAULT_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Create the main router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String], body_limit: usize) -> Router {
    // No authentication required
    let public_routes = Router::new()
        .route("/status", get(get_status))
        .route("/stats", get(get_stats))
        .route("/connect", get(connect));

    // Token required (enforced by the AuthUser extractor)
    let protected_routes = Router::new()
        .route("/disconnect", get(disconnect))
        .route("/users/me", get(me))
        .route("/files", post(post_upload).get(get_index))
        .route("/files/:id", get(get_show));

    let sessions = app_state.sessions.clone();

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        request_id = %Uuid::new_v4(),
                        method = %req.method(),
                        path = %req.uri().path(),
                    )
                }))
                .layer(create_cors_layer(cors_origins))
                .layer(DefaultBodyLimit::max(body_limit))
                .layer(middleware::from_fn(move |req, next| {
                    let sessions = sessions.clone();
                    session_context(sessions, req, next)
                })),
        )
        .with_state(app_state)
}
