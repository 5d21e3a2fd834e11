//! Router construction and server startup.

use std::{net::SocketAddr, sync::Arc};

use axum::{Router, http::Method, routing::get};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::{
    handler::{get_presence, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Port used when none is configured
pub const DEFAULT_PORT: u16 = 3001;

/// Build the application router
pub fn create_app(state: Arc<AppState>) -> Router {
    // Any origin may connect, GET and POST only
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST]);

    Router::new()
        .route("/ws", get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/api/presence", get(get_presence))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `0.0.0.0:port` and serve until a shutdown signal arrives
pub async fn run(port: u16) -> std::io::Result<()> {
    let state = Arc::new(AppState::new());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server is listening on {}", listener.local_addr()?);

    serve(listener, state).await
}

/// Serve the application on an already bound listener
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> std::io::Result<()> {
    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}
