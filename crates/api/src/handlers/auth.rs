//! Handlers for the `/auth` resource (register, login, refresh, logout,
//! session snapshot, password change).
//!
//! This is where the approval gate lives: tokens are only ever minted for
//! an account whose role assignment permits use of the application, so a
//! pending or rejected admin can authenticate but never obtains a session.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use dormhub_core::approval::{APPROVAL_APPROVED, APPROVAL_PENDING};
use dormhub_core::error::CoreError;
use dormhub_core::roles::{validate_signup_role, ROLE_ADMIN, ROLE_STUDENT};
use dormhub_core::types::DbId;

use dormhub_db::models::user::{CreateUser, UserInfo};
use dormhub_db::repositories::{ProfileRepo, RoleRepo, SessionRepo, UserRepo};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Minimum password length enforced on registration and password change.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum consecutive failed login attempts before locking the account.
const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Duration in minutes to lock an account after exceeding failed attempts.
const LOCK_DURATION_MINS: i64 = 15;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    pub password: String,
    pub username: String,
    /// Requested role: `"student"` or `"admin"`.
    pub role: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Request body for `PUT /auth/password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub new_password: String,
}

/// Successful authentication response returned by login, refresh, and
/// student registration.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
    pub role: String,
    pub username: String,
}

/// Response for an admin registration: no tokens, the account is parked
/// until the primary admin approves it.
#[derive(Debug, Serialize)]
pub struct PendingApprovalResponse {
    pub approval_status: String,
    pub message: String,
}

/// Response for `GET /auth/session`.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: UserInfo,
    /// The account's role, or `null` while the assignment is not approved.
    pub role: Option<String>,
    pub username: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an account, profile, and role assignment in one transaction.
/// Students get an approved role and an immediate session; admins get a
/// pending role and NO session -- they must wait for primary-admin approval
/// before they can sign in.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<Response> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    validate_signup_role(&input.role)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    if input.username.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Username must not be empty".into(),
        )));
    }

    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let approval_status = if input.role == ROLE_ADMIN {
        APPROVAL_PENDING
    } else {
        APPROVAL_APPROVED
    };

    let create = CreateUser {
        email: input.email,
        password_hash: hashed,
    };
    let user = UserRepo::register(
        &state.pool,
        &create,
        input.username.trim(),
        &input.role,
        approval_status,
    )
    .await?;

    tracing::info!(
        user_id = user.id,
        role = %input.role,
        approval_status,
        "Account registered"
    );

    if input.role == ROLE_ADMIN {
        // No tokens: the account exists but cannot be used until approved.
        let response = PendingApprovalResponse {
            approval_status: APPROVAL_PENDING.to_string(),
            message: "Admin approval pending. Please wait for the primary admin to approve \
                      your account."
                .to_string(),
        };
        return Ok((StatusCode::CREATED, Json(response)).into_response());
    }

    let response = create_auth_response(
        &state,
        user.id,
        &user.email,
        ROLE_STUDENT,
        input.username.trim(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password, then pass the approval gate before
/// any tokens are issued.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    // 1. Find the account by email.
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    // 2. Check if the account is temporarily locked.
    if let Some(locked_until) = user.locked_until {
        if locked_until > Utc::now() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Account is temporarily locked. Try again later.".into(),
            )));
        }
    }

    // 3. Verify password.
    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        // On failure: increment counter, lock if threshold exceeded.
        UserRepo::increment_failed_login(&state.pool, user.id).await?;

        let new_count = user.failed_login_count + 1;
        if new_count >= MAX_FAILED_ATTEMPTS {
            let lock_until = Utc::now() + chrono::Duration::minutes(LOCK_DURATION_MINS);
            UserRepo::lock_account(&state.pool, user.id, lock_until).await?;
        }

        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    // 4. Approval gate: resolve the role assignment. Failing either check
    //    leaves the caller without a session -- the equivalent of the
    //    immediate forced sign-out.
    let (role, username) = resolve_authorized_role(&state, user.id).await?;

    // 5. On success: reset failed count, set last_login_at.
    UserRepo::record_successful_login(&state.pool, user.id).await?;

    // 6. Generate tokens and create a session.
    let response = create_auth_response(&state, user.id, &user.email, &role, &username).await?;

    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens. The
/// approval gate is re-checked so an admin rejected after login cannot
/// keep minting sessions.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    // 1. Hash the provided refresh token.
    let token_hash = hash_refresh_token(&input.refresh_token);

    // 2. Find a matching live session.
    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    // 3. Revoke the old session (token rotation).
    SessionRepo::revoke(&state.pool, session.id).await?;

    // 4. Find the account and re-run the approval gate.
    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let (role, username) = resolve_authorized_role(&state, user.id).await?;

    // 5. Generate new tokens and create a new session.
    let response = create_auth_response(&state, user.id, &user.email, &role, &username).await?;

    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated account. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/session
///
/// Read-only snapshot of the caller's identity, role, and username,
/// hydrated from the database. Authentication only proves identity here;
/// the role is re-read so a revoked approval shows up as `role: null`.
pub async fn session(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<SessionResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("User no longer exists".into()))
        })?;

    let assignment = RoleRepo::find_by_user_id(&state.pool, user.id).await?;
    let role = assignment
        .filter(|a| a.approval_status == APPROVAL_APPROVED)
        .map(|a| a.role);

    let username = ProfileRepo::username_for_user(&state.pool, user.id).await?;

    Ok(Json(SessionResponse {
        user: UserInfo::from(&user),
        role,
        username,
    }))
}

/// PUT /api/v1/auth/password
///
/// Change the caller's own password. Returns 204 No Content.
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.new_password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let updated = UserRepo::update_password(&state.pool, auth_user.user_id, &hashed).await?;
    if updated {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Run the approval gate for an authenticated account.
///
/// Returns the authorized role and username, or an `Unauthorized` error
/// when no role is assigned or a non-student role has not been approved.
async fn resolve_authorized_role(
    state: &AppState,
    user_id: DbId,
) -> AppResult<(String, String)> {
    let assignment = RoleRepo::find_by_user_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("No role assigned".into())))?;

    if assignment.role != ROLE_STUDENT && assignment.approval_status != APPROVAL_APPROVED {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Admin approval pending. Please wait for the primary admin to approve your account."
                .into(),
        )));
    }

    let username = ProfileRepo::username_for_user(&state.pool, user_id)
        .await?
        .unwrap_or_else(|| "Unknown".to_string());

    Ok((assignment.role, username))
}

/// Generate access + refresh tokens, persist a session row, and build the response.
async fn create_auth_response(
    state: &AppState,
    user_id: DbId,
    email: &str,
    role: &str,
    username: &str,
) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(user_id, role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    let session_input = dormhub_db::models::session::CreateSession {
        user_id,
        refresh_token_hash: refresh_hash,
        expires_at,
    };
    SessionRepo::create(&state.pool, &session_input).await?;

    let expires_in = state.config.jwt.access_token_expiry_mins * 60;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in,
        user: UserInfo {
            id: user_id,
            email: email.to_string(),
        },
        role: role.to_string(),
        username: username.to_string(),
    })
}
