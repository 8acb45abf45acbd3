//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod complaint_repo;
pub mod profile_repo;
pub mod role_repo;
pub mod session_repo;
pub mod sos_alert_repo;
pub mod student_detail_repo;
pub mod user_repo;

pub use complaint_repo::ComplaintRepo;
pub use profile_repo::ProfileRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use sos_alert_repo::SosAlertRepo;
pub use student_detail_repo::StudentDetailRepo;
pub use user_repo::UserRepo;
