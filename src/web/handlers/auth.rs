//! Login and logout handlers.

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::{
    headers::{authorization::Basic, Authorization},
    TypedHeader,
};
use std::sync::Arc;

use crate::auth::verify_credentials;
use crate::web::dto::TokenResponse;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// GET /connect - Exchange Basic credentials for a session token.
pub async fn connect(
    State(state): State<Arc<AppState>>,
    credentials: Option<TypedHeader<Authorization<Basic>>>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Some(TypedHeader(Authorization(basic))) = credentials else {
        tracing::debug!("Login rejected: missing or malformed Basic header");
        return Err(ApiError::unauthorized());
    };

    let user = verify_credentials(state.db.pool(), basic.username(), basic.password())
        .await?
        .ok_or_else(ApiError::unauthorized)?;

    let token = state.sessions.issue(user.id).await?;

    Ok(Json(TokenResponse { token }))
}

/// GET /disconnect - Revoke the presented session token.
pub async fn disconnect(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<StatusCode, ApiError> {
    state.sessions.revoke(&auth.token).await?;
    tracing::info!(user_id = %auth.user_id, "User disconnected");
    Ok(StatusCode::NO_CONTENT)
}
