use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use models::gallery;
use service::resources::{gallery::HiddenInput, parse_id};

use super::collect_files;
use crate::errors::ApiError;
use crate::state::AppState;

/// Multipart field names accepted for batch uploads.
pub(crate) const BATCH_FIELDS: &[&str] = &["files", "files[]"];

#[utoipa::path(
    get, path = "/gallery", tag = "gallery",
    responses(
        (status = 200, description = "All gallery items", body = [crate::openapi::GalleryItemDoc]),
        (status = 500, description = "Database error")
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<gallery::Model>>, ApiError> {
    Ok(Json(state.gallery.list().await?))
}

#[utoipa::path(
    post, path = "/gallery", tag = "gallery",
    request_body(content = crate::openapi::UploadFilesForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "One record per uploaded file", body = [crate::openapi::GalleryItemDoc]),
        (status = 400, description = "Malformed multipart body"),
        (status = 500, description = "File storage or database error")
    )
)]
pub async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Vec<gallery::Model>>, ApiError> {
    let files = collect_files(multipart?, BATCH_FIELDS).await?;
    Ok(Json(state.gallery.upload_batch(files).await?))
}

#[utoipa::path(
    put, path = "/gallery/{id}", tag = "gallery",
    params(("id" = i32, Path, description = "Gallery item ID")),
    request_body = crate::openapi::HiddenInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::GalleryItemDoc),
        (status = 400, description = "Invalid id or malformed body"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Database error")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<HiddenInput>, JsonRejection>,
) -> Result<Json<gallery::Model>, ApiError> {
    let id = parse_id(&raw_id)?;
    let Json(input) = payload?;
    Ok(Json(state.gallery.set_hidden(id, input.hidden).await?))
}

#[utoipa::path(
    delete, path = "/gallery/{id}", tag = "gallery",
    params(("id" = i32, Path, description = "Gallery item ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Database error")
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&raw_id)?;
    state.gallery.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
