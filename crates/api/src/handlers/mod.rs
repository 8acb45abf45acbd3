//! Request handlers.
//!
//! Each submodule provides async handler functions for a single resource.
//! Handlers delegate to the corresponding repository in `dormhub_db` and
//! map errors via [`AppError`](crate::error::AppError).

pub mod admins;
pub mod auth;
pub mod complaints;
pub mod dashboard;
pub mod sos;
pub mod students;
