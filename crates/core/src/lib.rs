//! Shared domain types, constants, and validation helpers.
//!
//! This crate holds the pieces every other dormhub crate agrees on: the
//! error taxonomy, well-known role and status values, and the small
//! validation functions the DB and API layers both use.

pub mod alert;
pub mod approval;
pub mod complaint;
pub mod error;
pub mod roles;
pub mod types;
