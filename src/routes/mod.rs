//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the API endpoints and the static marketing site under
//! a single Axum router. The marketing pages are plain static files served
//! at `/`; the demo and generation surfaces live under `/api`.

pub mod demo;
pub mod generate;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// API routes shared by the website and any external demo client.
pub fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/generate", post(generate::generate_code))
        .route("/api/demo/ws", get(demo::handle_ws))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Resolve the path to the marketing website directory.
fn website_dir() -> PathBuf {
    std::env::var("WEBSITE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("website"))
}

/// Full application: API routes with the static site as fallback.
pub fn app(state: AppState) -> Router {
    let website_service = ServeDir::new(website_dir()).append_index_html_on_directories(true);
    api_routes(state)
        .fallback_service(website_service)
        .layer(CompressionLayer::new())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
