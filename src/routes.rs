use axum::{http::StatusCode, response::Html, routing::get, Router};
use std::path::Path;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::dashboard;
use crate::format::DisplayFormat;
use crate::shell::page;
use crate::source::TransactionSource;

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn TransactionSource>,
    pub display: Arc<DisplayFormat>,
}

pub fn router(state: AppState, static_dir: &Path) -> Router {
    tracing::debug!("📋 Configuring application routes");

    let app = Router::new()
        .route("/", get(dashboard::fraud_dashboard))
        .route("/fraud", get(dashboard::fraud_dashboard))
        .route("/health", get(health))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    tracing::info!(
        routes = "/, /fraud, /health",
        static_content = %static_dir.display(),
        "✅ Application routes configured"
    );

    app
}

pub async fn health() -> &'static str {
    "ok"
}

/// Unmatched paths get the shell with an empty content region.
pub async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(page("SmartBank Analytics", "")))
}
