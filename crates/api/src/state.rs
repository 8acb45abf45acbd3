use std::sync::Arc;

use dormhub_storage::BlobStore;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: dormhub_db::DbPool,
    /// Server configuration (JWT secrets, timeouts, CORS origins).
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (admin alert feeds).
    pub ws_manager: Arc<WsManager>,
    /// Centralized event bus for publishing domain events.
    pub event_bus: Arc<dormhub_events::EventBus>,
    /// Blob store for complaint and resolution images.
    pub blob_store: Arc<dyn BlobStore>,
}
