//! Handlers for the `/admins` resource (the admin approval workflow).
//!
//! Any admin may view the registration list, but only the primary admin
//! may decide. Decisions are scoped to `role = 'admin'` rows, so student
//! and primary-admin assignments can never be mutated from here.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use dormhub_core::approval::{APPROVAL_APPROVED, APPROVAL_REJECTED};
use dormhub_core::error::CoreError;
use dormhub_core::types::DbId;

use dormhub_db::models::role_assignment::AdminRegistration;
use dormhub_db::repositories::RoleRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequirePrimaryAdmin};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admins
///
/// List all admin registrations with usernames and approval status.
/// Registrations with no profile row show as `"Unknown"`.
pub async fn list_admins(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<AdminRegistration>>>> {
    let admins = RoleRepo::list_admin_registrations(&state.pool).await?;
    Ok(Json(DataResponse { data: admins }))
}

/// POST /api/v1/admins/{user_id}/approve
///
/// Approve an admin registration (primary admin only). Idempotent:
/// approving an already-approved admin succeeds without side effects.
pub async fn approve_admin(
    RequirePrimaryAdmin(primary): RequirePrimaryAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<StatusCode> {
    decide(&state, user_id, APPROVAL_APPROVED).await?;

    tracing::info!(
        admin_user_id = user_id,
        decided_by = primary.user_id,
        "Admin registration approved"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admins/{user_id}/reject
///
/// Reject an admin registration (primary admin only). The role row is kept
/// with status `rejected`; the account is never deleted.
pub async fn reject_admin(
    RequirePrimaryAdmin(primary): RequirePrimaryAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<StatusCode> {
    decide(&state, user_id, APPROVAL_REJECTED).await?;

    tracing::info!(
        admin_user_id = user_id,
        decided_by = primary.user_id,
        "Admin registration rejected"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// Apply an approval decision to an account's admin role row.
async fn decide(state: &AppState, user_id: DbId, approval_status: &str) -> AppResult<()> {
    let found = RoleRepo::set_admin_approval(&state.pool, user_id, approval_status).await?;
    if !found {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "AdminRegistration",
            id: user_id,
        }));
    }
    Ok(())
}
