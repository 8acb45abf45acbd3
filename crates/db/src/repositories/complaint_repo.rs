//! Repository for the `complaints` table.

use sqlx::PgPool;

use dormhub_core::complaint::{STATUS_DECLINED, STATUS_PENDING, STATUS_RESOLVED};
use dormhub_core::types::DbId;

use crate::models::complaint::{Complaint, CreateComplaint, ResolveComplaint};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, student_name, room_no, title, description, \
                        complaint_image_url, status, resolution_description, \
                        resolution_image_url, resolved_at, resolved_by, created_at";

/// Provides operations for the complaint lifecycle.
///
/// The two terminal transitions (`resolve`, `decline`) are conditional
/// updates on `status = 'pending'`, so concurrent decisions cannot both
/// land: whichever update commits first wins and the other affects zero
/// rows.
pub struct ComplaintRepo;

impl ComplaintRepo {
    /// File a complaint, returning the created row. Status starts at
    /// `pending`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateComplaint,
    ) -> Result<Complaint, sqlx::Error> {
        let query = format!(
            "INSERT INTO complaints
                 (user_id, student_name, room_no, title, description, complaint_image_url)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Complaint>(&query)
            .bind(input.user_id)
            .bind(&input.student_name)
            .bind(&input.room_no)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.complaint_image_url)
            .fetch_one(pool)
            .await
    }

    /// Find a complaint by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Complaint>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM complaints WHERE id = $1");
        sqlx::query_as::<_, Complaint>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every complaint, newest-created-first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Complaint>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM complaints ORDER BY created_at DESC");
        sqlx::query_as::<_, Complaint>(&query).fetch_all(pool).await
    }

    /// List the complaints filed by one account, newest-created-first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Complaint>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM complaints WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Complaint>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Transition a pending complaint to `resolved`, stamping the resolver
    /// and resolution time.
    ///
    /// Returns `true` if the complaint was still pending and is now
    /// resolved; `false` if it does not exist or had already reached a
    /// terminal state.
    pub async fn resolve(
        pool: &PgPool,
        id: DbId,
        input: &ResolveComplaint,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE complaints SET
                status = $2,
                resolution_description = $3,
                resolution_image_url = $4,
                resolved_at = NOW(),
                resolved_by = $5
             WHERE id = $1 AND status = $6",
        )
        .bind(id)
        .bind(STATUS_RESOLVED)
        .bind(&input.resolution_description)
        .bind(&input.resolution_image_url)
        .bind(input.resolved_by)
        .bind(STATUS_PENDING)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Transition a pending complaint to `declined`.
    ///
    /// Returns `true` if the complaint was still pending and is now
    /// declined; `false` otherwise.
    pub async fn decline(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE complaints SET status = $2 WHERE id = $1 AND status = $3",
        )
        .bind(id)
        .bind(STATUS_DECLINED)
        .bind(STATUS_PENDING)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count complaints with the given status.
    pub async fn count_by_status(pool: &PgPool, status: &str) -> Result<i64, sqlx::Error> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM complaints WHERE status = $1")
                .bind(status)
                .fetch_one(pool)
                .await?;
        Ok(count.0)
    }
}
