//! Well-known role name constants.
//!
//! These must match the CHECK constraint in the `user_roles` migration.

/// A resident who registers room details and files complaints.
pub const ROLE_STUDENT: &str = "student";

/// A staff member who triages complaints and views the student directory.
/// Requires approval by the primary admin before the account is usable.
pub const ROLE_ADMIN: &str = "admin";

/// The single distinguished admin authorized to approve or reject other
/// admin registrations. Created by the seed binary, never via sign-up.
pub const ROLE_PRIMARY_ADMIN: &str = "primary_admin";

/// Roles a caller may request at sign-up. `primary_admin` is deliberately
/// absent -- it can only be provisioned out-of-band.
pub const VALID_SIGNUP_ROLES: &[&str] = &[ROLE_STUDENT, ROLE_ADMIN];

/// Validate that a requested sign-up role is one of the accepted values.
pub fn validate_signup_role(role: &str) -> Result<(), String> {
    if VALID_SIGNUP_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_SIGNUP_ROLES.join(", ")
        ))
    }
}

/// Whether a role carries admin authority (regular or primary).
pub fn is_admin_role(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_PRIMARY_ADMIN
}
