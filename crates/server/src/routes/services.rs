use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use models::services;
use service::resources::{parse_id, services::ServiceInput};

use crate::errors::ApiError;
use crate::state::AppState;

#[utoipa::path(
    get, path = "/services", tag = "services",
    responses(
        (status = 200, description = "All services", body = [crate::openapi::ServiceDoc]),
        (status = 500, description = "Database error")
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<services::Model>>, ApiError> {
    Ok(Json(state.services.list().await?))
}

#[utoipa::path(
    post, path = "/services", tag = "services",
    request_body = crate::openapi::ServiceInputDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::ServiceDoc),
        (status = 400, description = "Malformed body or empty field"),
        (status = 500, description = "Database error")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ServiceInput>, JsonRejection>,
) -> Result<Json<services::Model>, ApiError> {
    let Json(input) = payload?;
    Ok(Json(state.services.create(input).await?))
}

#[utoipa::path(
    put, path = "/services/{id}", tag = "services",
    params(("id" = i32, Path, description = "Service ID")),
    request_body = crate::openapi::ServiceInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ServiceDoc),
        (status = 400, description = "Invalid id or malformed body"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Database error")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<ServiceInput>, JsonRejection>,
) -> Result<Json<services::Model>, ApiError> {
    let id = parse_id(&raw_id)?;
    let Json(input) = payload?;
    Ok(Json(state.services.update(id, input).await?))
}
