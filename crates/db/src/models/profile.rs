//! Profile model.

use serde::Serialize;
use sqlx::FromRow;

use dormhub_core::types::{DbId, Timestamp};

/// A profile row from the `profiles` table (1:1 with `users`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub created_at: Timestamp,
}
