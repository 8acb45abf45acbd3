//! Role assignment model.

use serde::Serialize;
use sqlx::FromRow;

use dormhub_core::types::{DbId, Timestamp};

/// A role assignment row from the `user_roles` table.
///
/// Binds an account to a role (`student`, `admin`, `primary_admin`) and an
/// approval status (`pending`, `approved`, `rejected`); see the constants
/// in `dormhub_core::{roles, approval}`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RoleAssignment {
    pub id: DbId,
    pub user_id: DbId,
    pub role: String,
    pub approval_status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An admin registration as shown in the approval workflow: the role row
/// joined against the profile for a display name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminRegistration {
    pub user_id: DbId,
    pub username: String,
    pub approval_status: String,
}
