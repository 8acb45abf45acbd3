//! Repository for the `sos_alerts` table.

use sqlx::PgPool;

use crate::models::sos_alert::{CreateSosAlert, SosAlert};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, room_no, triggered_by, triggered_by_name, is_anonymous, created_at";

/// Provides operations for SOS alerts. The table is insert-only.
pub struct SosAlertRepo;

impl SosAlertRepo {
    /// Record an alert, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSosAlert,
    ) -> Result<SosAlert, sqlx::Error> {
        let query = format!(
            "INSERT INTO sos_alerts (room_no, triggered_by, triggered_by_name, is_anonymous)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SosAlert>(&query)
            .bind(&input.room_no)
            .bind(input.triggered_by)
            .bind(&input.triggered_by_name)
            .bind(input.is_anonymous)
            .fetch_one(pool)
            .await
    }

    /// List every alert, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<SosAlert>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sos_alerts ORDER BY created_at DESC");
        sqlx::query_as::<_, SosAlert>(&query).fetch_all(pool).await
    }

    /// Count all alerts.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sos_alerts")
            .fetch_one(pool)
            .await?;
        Ok(count.0)
    }
}
