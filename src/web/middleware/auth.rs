//! Session token authentication.
//!
//! Every file operation starts by extracting [`AuthUser`]. The token is read
//! from the `X-Token` header and resolved through the [`SessionManager`]
//! placed in the request extensions by [`session_context`].

use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{request::Parts, HeaderName, Request},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::auth::SessionManager;
use crate::db::UserId;
use crate::web::error::ApiError;

/// Header carrying the session token.
pub const TOKEN_HEADER: HeaderName = HeaderName::from_static("x-token");

/// Extractor for authenticated users.
///
/// Rejects with 401 when the header is absent or the token does not resolve.
/// A failing key-value store is a 500, not a 401.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    /// The token the request was authenticated with.
    pub token: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let token = parts
                .headers
                .get(&TOKEN_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .ok_or_else(|| {
                    tracing::debug!("Rejected: missing token");
                    ApiError::unauthorized()
                })?;

            let sessions = parts
                .extensions
                .get::<Arc<SessionManager>>()
                .cloned()
                .ok_or_else(|| {
                    tracing::error!("Session manager not configured");
                    ApiError::internal()
                })?;

            match sessions.resolve(&token).await? {
                Some(user_id) => Ok(AuthUser { user_id, token }),
                None => {
                    tracing::debug!("Rejected: token does not resolve");
                    Err(ApiError::unauthorized())
                }
            }
        })
    }
}

/// Middleware function to inject the session manager into request extensions.
pub async fn session_context(
    sessions: Arc<SessionManager>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(sessions);
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKvStore;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    fn parts_with(token: Option<&str>, sessions: Option<Arc<SessionManager>>) -> Parts {
        let mut builder = Request::builder().uri("/files");
        if let Some(token) = token {
            builder = builder.header("X-Token", token);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        if let Some(sessions) = sessions {
            parts.extensions.insert(sessions);
        }
        parts
    }

    fn sessions() -> Arc<SessionManager> {
        Arc::new(SessionManager::new(Arc::new(MemoryKvStore::new())))
    }

    #[tokio::test]
    async fn test_valid_token() {
        let sessions = sessions();
        let token = sessions.issue(UserId(9)).await.unwrap();
        let mut parts = parts_with(Some(&token), Some(sessions));

        let user = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(user.user_id, UserId(9));
        assert_eq!(user.token, token);
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let mut parts = parts_with(None, Some(sessions()));

        let err = AuthUser::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_token_is_unauthorized() {
        let mut parts = parts_with(Some("f47ac10b-58cc-4372-a567-0e02b2c3d479"), Some(sessions()));

        let err = AuthUser::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_missing_session_manager_is_internal() {
        let mut parts = parts_with(Some("anything"), None);

        let err = AuthUser::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
