//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the minimum requirement. Use these in route handlers to enforce
//! authorization at the type level. The role claim in the token was written
//! after the approval gate, so no database round-trip is needed here.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use dormhub_core::error::CoreError;
use dormhub_core::roles::{is_admin_role, ROLE_PRIMARY_ADMIN, ROLE_STUDENT};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `student` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn student_only(RequireStudent(user): RequireStudent) -> AppResult<Json<()>> {
///     // user is guaranteed to be a student here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireStudent(pub AuthUser);

impl FromRequestParts<AppState> for RequireStudent {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_STUDENT {
            return Err(AppError::Core(CoreError::Forbidden(
                "Student role required".into(),
            )));
        }
        Ok(RequireStudent(user))
    }
}

/// Requires `admin` or `primary_admin`. Rejects with 403 Forbidden otherwise.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !is_admin_role(&user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires the `primary_admin` role. Rejects with 403 Forbidden otherwise.
///
/// Regular admins may list registrations but only the primary admin may
/// approve or reject them.
pub struct RequirePrimaryAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequirePrimaryAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_PRIMARY_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Primary admin role required".into(),
            )));
        }
        Ok(RequirePrimaryAdmin(user))
    }
}

/// Requires any authenticated account (any valid role).
///
/// Functionally equivalent to [`AuthUser`] but named explicitly for use in
/// route definitions where the intent "this route requires authentication"
/// should be self-documenting.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}
