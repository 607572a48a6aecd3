use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use wikivid_core::Result;

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    // Credentials rule out a wildcard origin, so the caller's origin is echoed.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Router::new()
        .route("/create_video_from_url", post(handlers::create_video_from_url))
        .route("/create_video_from_url/", post(handlers::create_video_from_url))
        .route("/videos/:filename", get(handlers::get_video))
        .route("/download_video/:video_filename", get(handlers::download_video))
        .route("/api/video-status/:filename", get(handlers::video_status))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Bind and serve until ctrl-c.
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    info!("🚀 Listening on http://{}", addr);

    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

pub mod prelude {
    pub use crate::{create_app, serve, ApiError, AppState, ServerConfig};
    pub use wikivid_core::{Error, Result};
}
