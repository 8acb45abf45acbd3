//! Approval status constants and validation.
//!
//! Every role assignment carries an approval status. Student roles are
//! created `approved`; admin roles start `pending` and must be moved to
//! `approved` by the primary admin before the bearer can sign in.

/// Awaiting a decision from the primary admin.
pub const APPROVAL_PENDING: &str = "pending";

/// Cleared to use the application.
pub const APPROVAL_APPROVED: &str = "approved";

/// Turned down. The row is kept; rejection is a status, not a deletion.
pub const APPROVAL_REJECTED: &str = "rejected";

/// All valid approval status values.
pub const VALID_APPROVAL_STATUSES: &[&str] =
    &[APPROVAL_PENDING, APPROVAL_APPROVED, APPROVAL_REJECTED];

/// Validate that an approval status string is one of the accepted values.
pub fn validate_approval_status(status: &str) -> Result<(), String> {
    if VALID_APPROVAL_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(format!(
            "Invalid approval status '{status}'. Must be one of: {}",
            VALID_APPROVAL_STATUSES.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_validate() {
        for status in VALID_APPROVAL_STATUSES {
            assert!(validate_approval_status(status).is_ok());
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(validate_approval_status("revoked").is_err());
    }
}
