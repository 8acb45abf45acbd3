//! Complaint model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use dormhub_core::types::{DbId, Timestamp};

/// A complaint row from the `complaints` table.
///
/// `student_name` and `room_no` are snapshots taken from `student_details`
/// at filing time, kept deliberately denormalized so the complaint records
/// where the student lived when they filed it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Complaint {
    pub id: DbId,
    pub user_id: DbId,
    pub student_name: String,
    pub room_no: String,
    pub title: String,
    pub description: String,
    pub complaint_image_url: Option<String>,
    pub status: String,
    pub resolution_description: Option<String>,
    pub resolution_image_url: Option<String>,
    pub resolved_at: Option<Timestamp>,
    pub resolved_by: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for filing a complaint. Status always starts at `pending`.
pub struct CreateComplaint {
    pub user_id: DbId,
    pub student_name: String,
    pub room_no: String,
    pub title: String,
    pub description: String,
    pub complaint_image_url: Option<String>,
}

/// DTO for resolving a complaint.
pub struct ResolveComplaint {
    pub resolution_description: String,
    pub resolution_image_url: Option<String>,
    pub resolved_by: DbId,
}
