use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use models::contacts;
use service::resources::contacts::ContactsInput;

use crate::errors::ApiError;
use crate::state::AppState;

#[utoipa::path(
    get, path = "/contacts", tag = "contacts",
    responses(
        (status = 200, description = "Zero or one contact records", body = [crate::openapi::ContactsDoc]),
        (status = 500, description = "Database error")
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<contacts::Model>>, ApiError> {
    Ok(Json(state.contacts.list().await?))
}

#[utoipa::path(
    put, path = "/contacts", tag = "contacts",
    request_body = crate::openapi::ContactsDoc,
    responses(
        (status = 200, description = "Created or replaced", body = crate::openapi::ContactsDoc),
        (status = 400, description = "Malformed body or missing address/phone/email"),
        (status = 500, description = "Database error")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    payload: Result<Json<ContactsInput>, JsonRejection>,
) -> Result<Json<contacts::Model>, ApiError> {
    let Json(input) = payload?;
    Ok(Json(state.contacts.upsert(input).await?))
}
