//! User handlers.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::db::UserRepository;
use crate::web::dto::MeResponse;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// GET /users/me - The authenticated user.
pub async fn me(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<MeResponse>, ApiError> {
    // A session can outlive its user row
    let user = UserRepository::new(state.db.pool())
        .get_by_id(auth.user_id)
        .await?
        .ok_or_else(ApiError::unauthorized)?;

    Ok(Json(MeResponse {
        id: user.id,
        email: user.email,
    }))
}
