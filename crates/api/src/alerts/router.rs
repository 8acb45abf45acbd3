//! Event-to-WebSocket routing.
//!
//! [`AlertRouter`] subscribes to the domain event bus and pushes each event
//! to every connected admin feed as a JSON text frame. Only admins can open
//! a feed connection (the upgrade route is gated), so broadcasting to all
//! connections is the correct audience.

use std::sync::Arc;

use axum::extract::ws::Message;
use tokio::sync::broadcast;

use dormhub_events::DomainEvent;

use crate::ws::WsManager;

/// Routes domain events to connected WebSocket clients.
pub struct AlertRouter {
    ws_manager: Arc<WsManager>,
}

impl AlertRouter {
    /// Create a new router with the given WebSocket manager.
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the main routing loop.
    ///
    /// Consumes events from the broadcast channel until it closes (i.e. the
    /// [`EventBus`](dormhub_events::EventBus) is dropped at shutdown). A
    /// lagged subscription skips the overwritten events and keeps going;
    /// each subscriber otherwise sees every event in publish order.
    pub async fn run(self, mut receiver: broadcast::Receiver<DomainEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    self.broadcast_event(&event).await;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Alert router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, alert router shutting down");
                    break;
                }
            }
        }
    }

    /// Serialize one event and push it to every connection.
    async fn broadcast_event(&self, event: &DomainEvent) {
        let json = match serde_json::to_string(event) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    event_type = %event.event_type,
                    "Failed to serialize event"
                );
                return;
            }
        };

        self.ws_manager.broadcast(Message::Text(json.into())).await;
        tracing::debug!(event_type = %event.event_type, "Event broadcast to alert feeds");
    }
}
