//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated account from a JWT Bearer token.
//! - [`auth::OptionalAuthUser`] -- Like `AuthUser` but never rejects (for the SOS path).
//! - [`rbac::RequireStudent`] -- Requires the `student` role.
//! - [`rbac::RequireAdmin`] -- Requires `admin` or `primary_admin`.
//! - [`rbac::RequirePrimaryAdmin`] -- Requires the `primary_admin` role.
//! - [`rbac::RequireAuth`] -- Requires any authenticated account.

pub mod auth;
pub mod rbac;
