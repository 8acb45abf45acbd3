//! Handlers for the `/dashboard` resource (admin overview counters).

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use dormhub_core::complaint::{STATUS_PENDING, STATUS_RESOLVED};

use dormhub_db::repositories::{ComplaintRepo, SosAlertRepo, StudentDetailRepo};

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Counters shown on the admin dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub students: i64,
    pub pending_complaints: i64,
    pub resolved_complaints: i64,
    pub sos_alerts: i64,
}

/// GET /api/v1/dashboard/stats
///
/// Aggregate counters for the admin dashboard (admin only).
pub async fn get_stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardStats>>> {
    let students = StudentDetailRepo::count(&state.pool).await?;
    let pending_complaints =
        ComplaintRepo::count_by_status(&state.pool, STATUS_PENDING).await?;
    let resolved_complaints =
        ComplaintRepo::count_by_status(&state.pool, STATUS_RESOLVED).await?;
    let sos_alerts = SosAlertRepo::count(&state.pool).await?;

    Ok(Json(DataResponse {
        data: DashboardStats {
            students,
            pending_complaints,
            resolved_complaints,
            sos_alerts,
        },
    }))
}
