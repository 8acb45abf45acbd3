//! Handlers for the `/students` resource (room registration + directory).

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use dormhub_core::error::CoreError;

use dormhub_db::models::student_detail::{StudentDetail, UpsertStudentDetail};
use dormhub_db::repositories::StudentDetailRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireStudent};
use crate::response::DataResponse;
use crate::state::AppState;

/// PUT /api/v1/students/me
///
/// Register or update the caller's room details (student only). Upsert
/// semantics: first call creates the row, later calls rewrite it.
pub async fn upsert_my_details(
    RequireStudent(student): RequireStudent,
    State(state): State<AppState>,
    Json(input): Json<UpsertStudentDetail>,
) -> AppResult<impl IntoResponse> {
    for (field, value) in [
        ("name", &input.name),
        ("roll_no", &input.roll_no),
        ("room_no", &input.room_no),
        ("email", &input.email),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Field '{field}' must not be empty"
            ))));
        }
    }

    let details = StudentDetailRepo::upsert(&state.pool, student.user_id, &input).await?;

    tracing::info!(
        user_id = student.user_id,
        room_no = %details.room_no,
        "Room details saved"
    );

    Ok(Json(DataResponse { data: details }))
}

/// GET /api/v1/students/me
///
/// The caller's own room registration, or 404 if none exists yet.
pub async fn get_my_details(
    RequireStudent(student): RequireStudent,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<StudentDetail>>> {
    let details = StudentDetailRepo::find_by_user_id(&state.pool, student.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "StudentDetail",
                id: student.user_id,
            })
        })?;
    Ok(Json(DataResponse { data: details }))
}

/// GET /api/v1/students
///
/// The student directory, ordered by room number (admin only).
pub async fn list_students(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<StudentDetail>>>> {
    let students = StudentDetailRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: students }))
}
