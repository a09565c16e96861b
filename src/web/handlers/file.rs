//! File handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::file::{FileId, FileService, ParentRef};
use crate::web::dto::{FileResponse, IndexQuery, UploadRequest};
use crate::web::error::{ApiError, ErrorCode};
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// POST /files - Create a folder, file or image.
pub async fn post_upload(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    body: Result<Json<UploadRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<FileResponse>), ApiError> {
    let Json(req) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Upload rejected: unreadable body");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::new(ErrorCode::PayloadTooLarge, "Request body too large")
        } else {
            ApiError::bad_request("Invalid JSON body")
        }
    })?;

    let record = FileService::new(state.db.pool(), &state.storage)
        .create(auth.user_id, req.into())
        .await?;

    Ok((StatusCode::CREATED, Json(record.into())))
}

/// GET /files/:id - Show one of the caller's records.
///
/// Records owned by someone else are reported as not found.
pub async fn get_show(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<FileResponse>, ApiError> {
    let id: FileId = id.parse().map_err(|_| ApiError::not_found())?;

    let record = FileService::new(state.db.pool(), &state.storage)
        .get_owned(auth.user_id, id)
        .await?
        .ok_or_else(ApiError::not_found)?;

    Ok(Json(record.into()))
}

/// GET /files - List one page of the caller's records.
///
/// Without `parentId` (or with `0`) every record the caller owns is listed.
/// A `parentId` that is not an id matches nothing.
pub async fn get_index(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Query(query): Query<IndexQuery>,
) -> Result<Json<Vec<FileResponse>>, ApiError> {
    let parent = match query.parent_id.as_deref() {
        None => ParentRef::Root,
        Some(raw) => match ParentRef::parse(raw) {
            Some(parent) => parent,
            None => return Ok(Json(Vec::new())),
        },
    };

    let records = FileService::new(state.db.pool(), &state.storage)
        .list(auth.user_id, parent, query.page())
        .await?;

    Ok(Json(records.into_iter().map(FileResponse::from).collect()))
}
