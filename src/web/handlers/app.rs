//! Service status handlers. No authentication required.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::db::UserRepository;
use crate::file::FileRepository;
use crate::web::dto::{StatsResponse, StatusResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// GET /status - Readiness of the document and key-value stores.
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let db = state.db.is_alive().await;
    let kv = state.sessions.store().is_alive().await;
    Json(StatusResponse { db, kv })
}

/// GET /stats - Number of users and file records.
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Result<Json<StatsResponse>, ApiError> {
    let users = UserRepository::new(state.db.pool()).count().await?;
    let files = FileRepository::new(state.db.pool()).count().await?;
    Ok(Json(StatsResponse { users, files }))
}
