//! Repository for the `profiles` table.

use sqlx::PgPool;

use dormhub_core::types::DbId;

use crate::models::profile::Profile;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, username, created_at";

/// Provides read operations for profiles. Profiles are written only as
/// part of account registration (see `UserRepo::register`).
pub struct ProfileRepo;

impl ProfileRepo {
    /// Find the profile belonging to an account.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE user_id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve an account's username, or `None` if no profile exists.
    pub async fn username_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT username FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
