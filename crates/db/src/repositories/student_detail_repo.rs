//! Repository for the `student_details` table.

use sqlx::PgPool;

use dormhub_core::types::DbId;

use crate::models::student_detail::{StudentDetail, UpsertStudentDetail};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, roll_no, room_no, email, created_at, updated_at";

/// Provides operations for room registrations.
pub struct StudentDetailRepo;

impl StudentDetailRepo {
    /// Insert or update a student's room registration.
    ///
    /// Uses `ON CONFLICT (user_id) DO UPDATE` so registering and editing
    /// are the same idempotent operation.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        input: &UpsertStudentDetail,
    ) -> Result<StudentDetail, sqlx::Error> {
        let query = format!(
            "INSERT INTO student_details (user_id, name, roll_no, room_no, email)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (user_id) DO UPDATE SET
                 name = EXCLUDED.name,
                 roll_no = EXCLUDED.roll_no,
                 room_no = EXCLUDED.room_no,
                 email = EXCLUDED.email,
                 updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StudentDetail>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.roll_no)
            .bind(&input.room_no)
            .bind(&input.email)
            .fetch_one(pool)
            .await
    }

    /// Find the registration belonging to an account.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<StudentDetail>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM student_details WHERE user_id = $1");
        sqlx::query_as::<_, StudentDetail>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List all registrations ordered by room number (the directory view).
    pub async fn list(pool: &PgPool) -> Result<Vec<StudentDetail>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM student_details ORDER BY room_no ASC");
        sqlx::query_as::<_, StudentDetail>(&query)
            .fetch_all(pool)
            .await
    }

    /// Count all registered students.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM student_details")
            .fetch_one(pool)
            .await?;
        Ok(count.0)
    }
}
