//! Handlers for the `/complaints` resource.
//!
//! The complaint lifecycle is `pending -> resolved` or `pending -> declined`;
//! both transitions are conditional updates on the current status, so two
//! concurrent decisions cannot both land on the same complaint.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use dormhub_core::complaint::validate_resolution_description;
use dormhub_core::error::CoreError;
use dormhub_core::types::DbId;

use dormhub_db::models::complaint::{Complaint, CreateComplaint, ResolveComplaint};
use dormhub_db::repositories::{ComplaintRepo, StudentDetailRepo};

use dormhub_events::bus::{
    EVENT_COMPLAINT_DECLINED, EVENT_COMPLAINT_FILED, EVENT_COMPLAINT_RESOLVED,
};
use dormhub_events::DomainEvent;

use dormhub_storage::path::evidence_path;
use dormhub_storage::{BUCKET_COMPLAINT_IMAGES, BUCKET_RESOLUTION_IMAGES};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireStudent};
use crate::response::DataResponse;
use crate::state::AppState;

/// An image part pulled out of a multipart request: original file name plus
/// its raw bytes.
struct ImageUpload {
    file_name: String,
    bytes: Vec<u8>,
}

/// Text fields + optional image parsed from a complaint-related multipart
/// request.
#[derive(Default)]
struct ComplaintForm {
    title: Option<String>,
    description: Option<String>,
    image: Option<ImageUpload>,
}

/// Read a multipart request into a [`ComplaintForm`].
///
/// Unknown field names are skipped rather than rejected so clients can
/// evolve ahead of the server.
async fn read_complaint_form(mut multipart: Multipart) -> AppResult<ComplaintForm> {
    let mut form = ComplaintForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart request: {e}")))?
    {
        match field.name() {
            Some("title") => {
                form.title = Some(field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Unreadable 'title' field: {e}"))
                })?);
            }
            Some("description") => {
                form.description = Some(field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Unreadable 'description' field: {e}"))
                })?);
            }
            Some("image") => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::BadRequest(format!("Unreadable 'image' field: {e}"))
                })?;
                // An empty file input is treated as "no image attached".
                if !bytes.is_empty() {
                    form.image = Some(ImageUpload {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/complaints
///
/// File a complaint (student only, multipart: `title`, `description`,
/// optional `image`).
///
/// Requires a room registration; the student's name and room number are
/// snapshotted onto the complaint at this moment. Filing is all-or-nothing:
/// if the evidence image fails to upload, no complaint row is created.
pub async fn file_complaint(
    RequireStudent(student): RequireStudent,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let form = read_complaint_form(multipart).await?;

    let title = form
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Core(CoreError::Validation("Title must not be empty".into())))?;
    let description = form
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation("Description must not be empty".into()))
        })?;

    // The room registration is the precondition for filing; its name and
    // room number get snapshotted onto the complaint.
    let details = StudentDetailRepo::find_by_user_id(&state.pool, student.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Precondition(
                "Please register your room details first".into(),
            ))
        })?;

    let complaint_image_url = match form.image {
        Some(upload) => Some(
            upload_evidence(&state, BUCKET_COMPLAINT_IMAGES, student.user_id, &upload).await?,
        ),
        None => None,
    };

    let create = CreateComplaint {
        user_id: student.user_id,
        student_name: details.name,
        room_no: details.room_no,
        title: title.to_string(),
        description: description.to_string(),
        complaint_image_url,
    };
    let complaint = ComplaintRepo::create(&state.pool, &create).await?;

    state.event_bus.publish(
        DomainEvent::new(EVENT_COMPLAINT_FILED)
            .with_entity(complaint.id)
            .with_actor(student.user_id)
            .with_payload(serde_json::json!({
                "room_no": complaint.room_no,
                "title": complaint.title,
            })),
    );

    tracing::info!(
        complaint_id = complaint.id,
        user_id = student.user_id,
        room_no = %complaint.room_no,
        "Complaint filed"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: complaint })))
}

/// GET /api/v1/complaints
///
/// List every complaint, newest first (admin only).
pub async fn list_complaints(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Complaint>>>> {
    let complaints = ComplaintRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: complaints }))
}

/// GET /api/v1/complaints/mine
///
/// List the caller's own complaints, newest first (student only).
pub async fn list_my_complaints(
    RequireStudent(student): RequireStudent,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Complaint>>>> {
    let complaints = ComplaintRepo::list_for_user(&state.pool, student.user_id).await?;
    Ok(Json(DataResponse { data: complaints }))
}

/// POST /api/v1/complaints/{id}/resolve
///
/// Resolve a pending complaint (admin only, multipart: `description`,
/// optional `image`).
///
/// The resolution image is best-effort: an upload failure is logged and the
/// resolution proceeds without an image rather than failing outright.
pub async fn resolve_complaint(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<StatusCode> {
    let form = read_complaint_form(multipart).await?;

    let description = form.description.unwrap_or_default();
    validate_resolution_description(&description)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let resolution_image_url = match form.image {
        Some(upload) => {
            match upload_evidence(&state, BUCKET_RESOLUTION_IMAGES, admin.user_id, &upload).await
            {
                Ok(url) => Some(url),
                Err(e) => {
                    tracing::warn!(
                        complaint_id = id,
                        error = %e,
                        "Resolution image upload failed, resolving without image"
                    );
                    None
                }
            }
        }
        None => None,
    };

    let resolve = ResolveComplaint {
        resolution_description: description.trim().to_string(),
        resolution_image_url,
        resolved_by: admin.user_id,
    };
    let transitioned = ComplaintRepo::resolve(&state.pool, id, &resolve).await?;
    ensure_decision_applied(&state, id, transitioned).await?;

    state.event_bus.publish(
        DomainEvent::new(EVENT_COMPLAINT_RESOLVED)
            .with_entity(id)
            .with_actor(admin.user_id),
    );

    tracing::info!(complaint_id = id, admin_id = admin.user_id, "Complaint resolved");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/complaints/{id}/decline
///
/// Decline a pending complaint (admin only). No resolution text required.
pub async fn decline_complaint(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let transitioned = ComplaintRepo::decline(&state.pool, id).await?;
    ensure_decision_applied(&state, id, transitioned).await?;

    state.event_bus.publish(
        DomainEvent::new(EVENT_COMPLAINT_DECLINED)
            .with_entity(id)
            .with_actor(admin.user_id),
    );

    tracing::info!(complaint_id = id, admin_id = admin.user_id, "Complaint declined");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Upload an evidence image and return its public URL.
async fn upload_evidence(
    state: &AppState,
    bucket: &str,
    owner_id: DbId,
    upload: &ImageUpload,
) -> AppResult<String> {
    let path = evidence_path(owner_id, chrono::Utc::now(), &upload.file_name);
    state
        .blob_store
        .upload(bucket, &path, upload.bytes.clone())
        .await?;
    Ok(state.blob_store.public_url(bucket, &path))
}

/// Explain a conditional status transition that affected zero rows: the
/// complaint either never existed (404) or has already reached a terminal
/// state (409).
async fn ensure_decision_applied(
    state: &AppState,
    id: DbId,
    transitioned: bool,
) -> AppResult<()> {
    if transitioned {
        return Ok(());
    }
    match ComplaintRepo::find_by_id(&state.pool, id).await? {
        None => Err(AppError::Core(CoreError::NotFound {
            entity: "Complaint",
            id,
        })),
        Some(existing) => Err(AppError::Core(CoreError::Conflict(format!(
            "Complaint is already {}",
            existing.status
        )))),
    }
}
