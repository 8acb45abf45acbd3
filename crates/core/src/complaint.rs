//! Complaint lifecycle constants and validation.
//!
//! A complaint moves along exactly one of `pending -> resolved` or
//! `pending -> declined`; both destinations are terminal.

/// Filed and awaiting an admin decision.
pub const STATUS_PENDING: &str = "pending";

/// Closed with a resolution description (and optionally an image).
pub const STATUS_RESOLVED: &str = "resolved";

/// Closed without action.
pub const STATUS_DECLINED: &str = "declined";

/// All valid complaint status values.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_RESOLVED, STATUS_DECLINED];

/// Whether a status admits no further transitions.
pub fn is_terminal(status: &str) -> bool {
    status == STATUS_RESOLVED || status == STATUS_DECLINED
}

/// Validate the resolution text supplied when resolving a complaint.
pub fn validate_resolution_description(description: &str) -> Result<(), String> {
    if description.trim().is_empty() {
        Err("Resolution description must not be empty".to_string())
    } else {
        Ok(())
    }
}
