//! Repository for the `user_roles` table.

use sqlx::PgPool;

use dormhub_core::roles::{ROLE_ADMIN, ROLE_PRIMARY_ADMIN};
use dormhub_core::types::DbId;

use crate::models::role_assignment::{AdminRegistration, RoleAssignment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, role, approval_status, created_at, updated_at";

/// Provides operations for role assignments.
pub struct RoleRepo;

impl RoleRepo {
    /// Find the role assignment for an account. At most one row exists per
    /// account (enforced by a unique constraint).
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<RoleAssignment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_roles WHERE user_id = $1");
        sqlx::query_as::<_, RoleAssignment>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List all admin registrations with their usernames, newest first.
    ///
    /// Role rows without a matching profile get the display name
    /// `"Unknown"` rather than being dropped from the listing.
    pub async fn list_admin_registrations(
        pool: &PgPool,
    ) -> Result<Vec<AdminRegistration>, sqlx::Error> {
        sqlx::query_as::<_, AdminRegistration>(
            "SELECT ur.user_id, COALESCE(p.username, 'Unknown') AS username, ur.approval_status
             FROM user_roles ur
             LEFT JOIN profiles p ON p.user_id = ur.user_id
             WHERE ur.role = $1
             ORDER BY ur.created_at DESC",
        )
        .bind(ROLE_ADMIN)
        .fetch_all(pool)
        .await
    }

    /// Set the approval status of an account's admin role.
    ///
    /// Scoped to `role = 'admin'` so student and primary-admin rows are
    /// never touched. Idempotent: repeating a decision rewrites the same
    /// value and still reports success.
    ///
    /// Returns `true` if a matching admin row exists.
    pub async fn set_admin_approval(
        pool: &PgPool,
        user_id: DbId,
        approval_status: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_roles
             SET approval_status = $2, updated_at = NOW()
             WHERE user_id = $1 AND role = $3",
        )
        .bind(user_id)
        .bind(approval_status)
        .bind(ROLE_ADMIN)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether a primary admin has been provisioned.
    pub async fn primary_admin_exists(pool: &PgPool) -> Result<bool, sqlx::Error> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM user_roles WHERE role = $1")
                .bind(ROLE_PRIMARY_ADMIN)
                .fetch_one(pool)
                .await?;
        Ok(count.0 > 0)
    }
}
