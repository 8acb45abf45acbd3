//! SOS alert model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use dormhub_core::types::{DbId, Timestamp};

/// An alert row from the `sos_alerts` table. Immutable once created.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SosAlert {
    pub id: DbId,
    pub room_no: String,
    pub triggered_by: Option<DbId>,
    pub triggered_by_name: String,
    pub is_anonymous: bool,
    pub created_at: Timestamp,
}

/// DTO for recording an alert.
pub struct CreateSosAlert {
    pub room_no: String,
    pub triggered_by: Option<DbId>,
    pub triggered_by_name: String,
    pub is_anonymous: bool,
}
