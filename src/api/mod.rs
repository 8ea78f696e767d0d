// src/api/mod.rs — HTTP surface for plugin scripts and head injection

pub mod auth;
pub mod handlers;
pub mod types;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::assets::AssetService;
use crate::head::HeadInjector;
use crate::infra::config::ServerConfig;
pub use types::{ApiResponse, ResponseCode};

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub assets: AssetService,
    pub head: Arc<HeadInjector>,
    pub token: Option<String>,
}

impl ApiState {
    pub fn new(assets: AssetService, head: HeadInjector, token: Option<String>) -> Self {
        Self {
            assets,
            head: Arc::new(head),
            token,
        }
    }
}

/// Build the axum router with all API routes.
pub fn build_router(state: ApiState, config: &ServerConfig) -> Router {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    Router::new()
        .route("/plugin/get", get(handlers::get_plugin))
        .route("/plugin/upload", post(handlers::upload_plugin))
        .route(
            "/plugin/delete",
            post(handlers::delete_plugin).delete(handlers::delete_plugin),
        )
        .route("/plugin/list", get(handlers::list_plugins))
        .route("/head", get(handlers::head_fragments))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server and run until Ctrl-C.
pub async fn start_server(config: &ServerConfig, state: ApiState) -> anyhow::Result<()> {
    let addr = config.bind_addr();

    let router = build_router(state, config);

    tracing::info!("API server listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
            tracing::info!("Shutdown signal received");
        })
        .await?;
    Ok(())
}
