use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use models::docs;
use service::resources::parse_id;

use super::{collect_files, gallery::BATCH_FIELDS};
use crate::errors::ApiError;
use crate::state::AppState;

#[utoipa::path(
    get, path = "/docs", tag = "docs",
    responses(
        (status = 200, description = "All documents", body = [crate::openapi::DocumentDoc]),
        (status = 500, description = "Database error")
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<docs::Model>>, ApiError> {
    Ok(Json(state.docs.list().await?))
}

#[utoipa::path(
    post, path = "/docs", tag = "docs",
    request_body(content = crate::openapi::UploadFilesForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "One record per uploaded file", body = [crate::openapi::DocumentDoc]),
        (status = 400, description = "Malformed multipart body"),
        (status = 500, description = "File storage or database error")
    )
)]
pub async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Vec<docs::Model>>, ApiError> {
    let files = collect_files(multipart?, BATCH_FIELDS).await?;
    Ok(Json(state.docs.upload_batch(files).await?))
}

#[utoipa::path(
    put, path = "/docs/{id}", tag = "docs",
    params(("id" = i32, Path, description = "Document ID")),
    request_body(content = crate::openapi::ReplaceFileForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Updated", body = crate::openapi::DocumentDoc),
        (status = 400, description = "Invalid id, malformed body, or not exactly one file"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "File storage or database error")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<docs::Model>, ApiError> {
    let id = parse_id(&raw_id)?;
    let mut files = collect_files(multipart?, &["file"]).await?;
    if files.len() != 1 {
        return Err(ApiError::bad_request(format!(
            "expected exactly one file in field \"file\", got {}",
            files.len()
        )));
    }
    let upload = files.remove(0);
    Ok(Json(state.docs.replace_file(id, upload).await?))
}

#[utoipa::path(
    delete, path = "/docs/{id}", tag = "docs",
    params(("id" = i32, Path, description = "Document ID")),
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
    state.docs.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
