//! File handlers.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::Response,
    Json,
};

use crate::web::dto::{ContentQuery, FileResponse, ListFilesQuery, UploadFileRequest};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::{AuthUser, OptionalAuthUser};

/// POST /files - Create a folder, file or image.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<UploadFileRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<FileResponse>), ApiError> {
    let Json(req) = payload?;
    let record = state.files.upload(&user_id, req.into()).await?;
    Ok((StatusCode::CREATED, Json(record.into())))
}

/// GET /files/:id - Show one of the caller's entries.
pub async fn get_file(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<FileResponse>, ApiError> {
    let record = state.files.show(&user_id, &id).await?;
    Ok(Json(record.into()))
}

/// GET /files?parentId=&page= - List the caller's entries under a folder.
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    query: Result<Query<ListFilesQuery>, QueryRejection>,
) -> Result<Json<Vec<FileResponse>>, ApiError> {
    let Query(query) = query?;
    let records = state
        .files
        .list(&user_id, query.parent_id.as_deref(), query.page.as_deref())
        .await?;
    Ok(Json(records.into_iter().map(FileResponse::from).collect()))
}

/// PUT /files/:id/publish - Make an entry public.
pub async fn publish_file(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<FileResponse>, ApiError> {
    let record = state.files.set_public(&user_id, &id, true).await?;
    Ok(Json(record.into()))
}

/// PUT /files/:id/unpublish - Make an entry private.
pub async fn unpublish_file(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<FileResponse>, ApiError> {
    let record = state.files.set_public(&user_id, &id, false).await?;
    Ok(Json(record.into()))
}

/// GET /files/:id/data?size= - Raw bytes of a file or one of its variants.
///
/// Works without a token for public entries.
pub async fn get_file_data(
    State(state): State<Arc<AppState>>,
    OptionalAuthUser(user_id): OptionalAuthUser,
    Path(id): Path<String>,
    query: Result<Query<ContentQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let content = state
        .files
        .get_content(user_id.as_ref(), &id, query.size.as_deref())
        .await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content.content_type)
        .header(header::CONTENT_LENGTH, content.data.len())
        .body(Body::from(content.data))
        .map_err(|e| {
            tracing::error!("Failed to build content response: {}", e);
            ApiError::internal()
        })
}
