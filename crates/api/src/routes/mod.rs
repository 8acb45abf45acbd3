pub mod admins;
pub mod auth;
pub mod complaints;
pub mod dashboard;
pub mod health;
pub mod sos;
pub mod students;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws/alerts                        admin alert feed WebSocket (admin only)
///
/// /auth/register                    register (public)
/// /auth/login                       login (public)
/// /auth/refresh                     refresh (public)
/// /auth/logout                      logout (requires auth)
/// /auth/session                     session snapshot (requires auth)
/// /auth/password                    change own password (requires auth)
///
/// /students/me                      get, upsert own room details (student)
/// /students                         student directory (admin)
///
/// /complaints                       list all (admin), file (student, multipart)
/// /complaints/mine                  own complaints (student)
/// /complaints/{id}/resolve          resolve (admin, multipart)
/// /complaints/{id}/decline          decline (admin)
///
/// /admins                           list registrations (admin)
/// /admins/{user_id}/approve         approve (primary admin)
/// /admins/{user_id}/reject          reject (primary admin)
///
/// /sos                              trigger (public), list (admin)
///
/// /dashboard/stats                  overview counters (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws/alerts", get(ws::alerts_ws_handler))
        .nest("/auth", auth::router())
        .nest("/students", students::router())
        .nest("/complaints", complaints::router())
        .nest("/admins", admins::router())
        .nest("/sos", sos::router())
        .nest("/dashboard", dashboard::router())
}
