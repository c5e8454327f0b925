//! SmartBank Analytics fraud detection dashboard.

mod config;
mod dashboard;
mod error;
mod format;
mod logging;
mod routes;
mod shell;
mod source;
mod transaction;

use axum_server::tls_rustls::RustlsConfig;
use std::sync::Arc;

use config::Settings;
use routes::AppState;
use source::{BuiltinSource, JsonFileSource, TransactionSource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_dashboard_logging();

    tracing::info!(
        service = "SmartBank Analytics",
        version = env!("CARGO_PKG_VERSION"),
        "🚀 Starting fraud dashboard server"
    );

    let settings = Settings::from_env().map_err(|e| {
        tracing::error!(error = %e, "❌ Invalid configuration");
        e
    })?;

    let source: Arc<dyn TransactionSource> = match &settings.data_file {
        Some(path) => Arc::new(JsonFileSource::load(path).await.map_err(|e| {
            tracing::error!(error = %e, "❌ Failed to load transaction data");
            e
        })?),
        None => Arc::new(BuiltinSource),
    };

    tracing::info!(source = %source.describe(), "🗂️ Transaction source ready");

    let state = AppState {
        source: source.clone(),
        display: Arc::new(settings.display.clone()),
    };
    let app = routes::router(state, &settings.static_dir);

    let addr = settings.bind_addr();
    tracing::info!(
        address = %addr,
        tls_enabled = settings.tls.is_some(),
        "🌐 Server configuration ready"
    );

    println!("{}", logging::banner(&settings.base_url(), &source.describe()));

    let served = match &settings.tls {
        Some(tls_files) => {
            tracing::debug!(
                cert_file = %tls_files.cert.display(),
                key_file = %tls_files.key.display(),
                "🔐 Loading TLS configuration"
            );
            let tls = RustlsConfig::from_pem_file(&tls_files.cert, &tls_files.key)
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "❌ Failed to load TLS configuration");
                    e
                })?;

            tracing::info!(bind_address = %addr, "🚀 Starting HTTPS server");
            axum_server::bind_rustls(addr, tls)
                .serve(app.into_make_service())
                .await
        }
        None => {
            tracing::info!(bind_address = %addr, "🚀 Starting HTTP server");
            axum_server::bind(addr)
                .serve(app.into_make_service())
                .await
        }
    };

    served.map_err(|e| {
        tracing::error!(error = %e, "❌ Server failed");
        e
    })?;

    tracing::info!("👋 Server shutdown completed");
    Ok(())
}
