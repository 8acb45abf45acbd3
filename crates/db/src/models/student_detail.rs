//! Student room registration model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use dormhub_core::types::{DbId, Timestamp};

/// A room registration row from the `student_details` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentDetail {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub roll_no: String,
    pub room_no: String,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for upserting a student's room registration.
#[derive(Debug, Deserialize)]
pub struct UpsertStudentDetail {
    pub name: String,
    pub roll_no: String,
    pub room_no: String,
    pub email: String,
}
