//! Route definitions for the `/complaints` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::complaints;
use crate::state::AppState;

/// Routes mounted at `/complaints`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(complaints::list_complaints).post(complaints::file_complaint),
        )
        .route("/mine", get(complaints::list_my_complaints))
        .route("/{id}/resolve", post(complaints::resolve_complaint))
        .route("/{id}/decline", post(complaints::decline_complaint))
}
