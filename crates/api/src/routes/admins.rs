//! Route definitions for the `/admins` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admins;
use crate::state::AppState;

/// Routes mounted at `/admins`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(admins::list_admins))
        .route("/{user_id}/approve", post(admins::approve_admin))
        .route("/{user_id}/reject", post(admins::reject_admin))
}
