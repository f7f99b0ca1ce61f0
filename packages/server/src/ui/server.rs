//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::usecase::{EventRouter, GetHealthUseCase, GetRoomsUseCase};

use super::{
    config::ServerConfig,
    handler::{get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

pub type ServerError = Box<dyn std::error::Error + Send + Sync>;

/// Watch-party server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(event_router, get_health_usecase, get_rooms_usecase);
/// server.run(ServerConfig::default()).await?;
/// ```
pub struct Server {
    /// EventRouter（WebSocket イベントのディスパッチ）
    event_router: Arc<EventRouter>,
    /// GetHealthUseCase（ヘルスチェック）
    get_health_usecase: Arc<GetHealthUseCase>,
    /// GetRoomsUseCase（Room 一覧取得）
    get_rooms_usecase: Arc<GetRoomsUseCase>,
}

impl Server {
    pub fn new(
        event_router: Arc<EventRouter>,
        get_health_usecase: Arc<GetHealthUseCase>,
        get_rooms_usecase: Arc<GetRoomsUseCase>,
    ) -> Self {
        Self {
            event_router,
            get_health_usecase,
            get_rooms_usecase,
        }
    }

    /// Build the axum router with every endpoint, CORS and request tracing.
    ///
    /// # Errors
    ///
    /// Returns an error if one of the allowed origins is not a valid header value.
    pub fn into_router(self, allowed_origins: &[String]) -> Result<Router, ServerError> {
        let app_state = Arc::new(AppState {
            event_router: self.event_router,
            get_health_usecase: self.get_health_usecase,
            get_rooms_usecase: self.get_rooms_usecase,
        });

        let origins = allowed_origins
            .iter()
            .map(|origin| origin.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()?;
        let cors = CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST]);

        let app = Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(app_state);

        Ok(app)
    }

    /// Bind to the configured address and run until a shutdown signal arrives.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address or
    /// if there's an error during server execution.
    pub async fn run(self, config: ServerConfig) -> Result<(), ServerError> {
        let listener = TcpListener::bind(config.bind_addr()).await?;
        self.serve(listener, &config.allowed_origins).await
    }

    /// Serve on an already bound listener.
    pub async fn serve(
        self,
        listener: TcpListener,
        allowed_origins: &[String],
    ) -> Result<(), ServerError> {
        let app = self.into_router(allowed_origins)?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Watch-party server listening on {}", local_addr);
        tracing::info!("Connect to: ws://{}/ws", local_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
