//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::{AllowedOrigin, ServerConfig},
    usecase::RelayDispatcher,
};

use super::{
    handler::{get_connections, health_check, index_page, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Build the application router.
///
/// # Routes
///
/// * `GET /` - demo page
/// * `GET /ws` - WebSocket signaling endpoint
/// * `GET /api/health` - health check
/// * `GET /api/connections` - live connections
pub fn build_router(state: Arc<AppState>, allowed_origin: &AllowedOrigin) -> Router {
    let cors = match allowed_origin {
        AllowedOrigin::Any => CorsLayer::new().allow_origin(Any),
        AllowedOrigin::Exact(origin) => {
            CorsLayer::new().allow_origin(AllowOrigin::exact(origin.clone()))
        }
    };

    let api = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/connections", get(get_connections))
        .layer(cors);

    Router::new()
        // WebSocket エンドポイント
        .route("/ws", get(websocket_handler))
        // HTTP エンドポイント
        .route("/", get(index_page))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// WebSocket signaling server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(dispatcher, ServerConfig::default());
/// server.run().await?;
/// ```
pub struct Server {
    dispatcher: Arc<RelayDispatcher>,
    config: ServerConfig,
}

impl Server {
    pub fn new(dispatcher: Arc<RelayDispatcher>, config: ServerConfig) -> Self {
        Self { dispatcher, config }
    }

    /// Run the signaling server until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address
    /// or if there's an error during server execution.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let app_state = Arc::new(AppState {
            dispatcher: self.dispatcher,
            keepalive: self.config.keepalive,
        });
        let app = build_router(app_state, &self.config.allowed_origin);

        // Bind the server to the host and port
        let bind_addr = self.config.bind_addr();
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!(
            "Signaling relay listening on http://{}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
