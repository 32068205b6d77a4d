//! Tabula HTTP server
//!
//! Axum router for spreadsheet uploads, manual record entry, dataset queries
//! and the static pages of the web UI.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers;
use crate::config::TabulaConfig;
use crate::core::{CategoryRegistry, RecordService};
use crate::store::{DatasetStore, JsonFileStore};

/// Shared application state
pub struct AppState {
    pub version: String,
    pub service: RecordService<Arc<dyn DatasetStore>>,
    pub registry: CategoryRegistry,
    pub public_dir: PathBuf,
}

impl AppState {
    /// State backed by `<data_dir>/<category>.json` documents
    pub fn from_config(config: &TabulaConfig) -> Self {
        Self::with_store(
            Arc::new(JsonFileStore::new(&config.data_dir)),
            config.public_dir.clone(),
        )
    }

    /// State over any store, with an empty category registry
    pub fn with_store(store: Arc<dyn DatasetStore>, public_dir: PathBuf) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            service: RecordService::new(store),
            registry: CategoryRegistry::new(),
            public_dir,
        }
    }
}

/// Build the router without binding a socket
pub fn build_router(state: Arc<AppState>, config: &TabulaConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health and info endpoints
        .route("/health", get(handlers::health))
        .route("/version", get(handlers::version))
        // Dataset API
        .route("/upload", post(handlers::upload))
        .route("/api/update-categories", post(handlers::update_categories))
        .route("/api/get-headers/:category", get(handlers::get_headers))
        .route("/api/add-data", post(handlers::add_data))
        .route("/api/get-data/:category", get(handlers::get_data))
        // Pages
        .route("/", get(handlers::index_page))
        .route("/:category", get(handlers::category_page))
        .fallback(handlers::static_or_not_found)
        // State and middleware
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Run the API server
pub async fn run_api_server(config: TabulaConfig) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "tabula_server=info,royalbit_tabula=info,tower_http=info".into()
            }),
        )
        .init();

    let state = Arc::new(AppState::from_config(&config));
    let app = build_router(state, &config);

    let addr: SocketAddr = config.address().parse()?;
    info!("Tabula server starting on http://{}", addr);
    info!("   Data directory: {}", config.data_dir.display());
    info!("   Public directory: {}", config.public_dir.display());
    info!(
        "   Upload limit: {} bytes, request timeout: {}s",
        config.max_upload_bytes, config.request_timeout_secs
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Tabula server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server...");
}
