pub mod contacts;
pub mod docs;
pub mod gallery;
pub mod services;

use axum::{
    extract::{DefaultBodyLimit, Multipart},
    http::{header, HeaderValue},
    routing::{get, put},
    Json, Router,
};
use common::types::Health;
use service::resources::UploadedFile;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::errors::ApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;

const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is alive", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Drain a multipart body, keeping file parts whose field name is in `fields`.
/// Parts without a file name are plain form values and are skipped.
pub(crate) async fn collect_files(
    mut multipart: Multipart,
    fields: &[&str],
) -> Result<Vec<UploadedFile>, ApiError> {
    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        let wanted = field.name().is_some_and(|name| fields.contains(&name));
        let Some(file_name) = field.file_name().map(str::to_owned) else {
            continue;
        };
        if !wanted {
            continue;
        }
        let data = field.bytes().await?;
        files.push(UploadedFile::new(file_name, data));
    }
    Ok(files)
}

/// Build the full application router: resource routes, static uploads,
/// health probe and API docs, wrapped in CORS and access logging.
pub fn build_router(state: AppState, cors: CorsLayer, max_upload_bytes: usize) -> Router {
    let uploads = ServeDir::new(state.files.root());

    let api = Router::new()
        .route("/services", get(services::list).post(services::create))
        .route("/services/:id", put(services::update))
        .route("/gallery", get(gallery::list).post(gallery::upload))
        .route("/gallery/:id", put(gallery::update).delete(gallery::delete))
        .route("/contacts", get(contacts::list).put(contacts::update))
        .route("/docs", get(docs::list).post(docs::upload))
        .route("/docs/:id", put(docs::update).delete(docs::delete))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state);

    Router::new()
        .route("/health", get(health))
        .nest_service("/uploads", uploads)
        .merge(api)
        .merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // CorsLayer only lists methods and headers on preflight answers
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx and transport failures
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
