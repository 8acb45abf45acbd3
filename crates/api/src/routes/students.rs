//! Route definitions for the `/students` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::students;
use crate::state::AppState;

/// Routes mounted at `/students`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(students::list_students))
        .route(
            "/me",
            get(students::get_my_details).put(students::upsert_my_details),
        )
}
