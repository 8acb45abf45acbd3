//! Route definitions for the `/sos` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::sos;
use crate::state::AppState;

/// Routes mounted at `/sos`. Triggering is public; listing is admin-only.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(sos::list_alerts).post(sos::trigger_sos))
}
