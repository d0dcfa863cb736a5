use axum::http::{header, Method};
use axum::Router;
use common::{env::ensure_dir, utils::logging::init_logging_from_env};
use configs::{AppConfig, ServerConfig};
use dotenvy::dotenv;
use migration::MigratorTrait;
use service::storage::file_store::FileStore;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::routes;
use crate::state::AppState;

/// Any origin; the methods and request headers the admin front-end uses.
pub fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// `host:port`; the host may be a name and is resolved when binding.
fn bind_addr(server: &ServerConfig) -> String {
    format!("{}:{}", server.host, server.port)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = AppConfig::load_and_validate()?;
    ensure_dir(&cfg.uploads.dir).await?;

    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;
    info!("schema up to date");

    let state = AppState::new(db, FileStore::new(&cfg.uploads.dir));
    let app: Router = routes::build_router(state, build_cors(), cfg.uploads.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(bind_addr(&cfg.server)).await?;
    info!(addr = %listener.local_addr()?, uploads = %cfg.uploads.dir, "admin api listening");
    axum::serve(listener, app).await?;
    Ok(())
}
