//! Handlers for the `/sos` resource (emergency alerts).
//!
//! Triggering an alert is deliberately NOT gated behind authentication --
//! a guest reporting an emergency must not be stopped by a login wall.
//! Only viewing the alert feed is restricted to admins.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use dormhub_core::alert::{validate_room_no, ANONYMOUS_TRIGGERED_BY};
use dormhub_core::error::CoreError;

use dormhub_db::models::sos_alert::{CreateSosAlert, SosAlert};
use dormhub_db::repositories::{ProfileRepo, SosAlertRepo};

use dormhub_events::bus::EVENT_SOS_TRIGGERED;
use dormhub_events::DomainEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::OptionalAuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /sos`.
#[derive(Debug, Deserialize)]
pub struct TriggerSosRequest {
    pub room_no: String,
}

/// POST /api/v1/sos
///
/// Record an emergency alert and push it to every connected admin feed.
/// Works with or without authentication; an unauthenticated trigger is
/// recorded as anonymous.
pub async fn trigger_sos(
    OptionalAuthUser(caller): OptionalAuthUser,
    State(state): State<AppState>,
    Json(input): Json<TriggerSosRequest>,
) -> AppResult<impl IntoResponse> {
    validate_room_no(&input.room_no)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let (triggered_by, triggered_by_name) = match &caller {
        Some(user) => {
            let username = ProfileRepo::username_for_user(&state.pool, user.user_id)
                .await?
                .unwrap_or_else(|| ANONYMOUS_TRIGGERED_BY.to_string());
            (Some(user.user_id), username)
        }
        None => (None, ANONYMOUS_TRIGGERED_BY.to_string()),
    };

    let create = CreateSosAlert {
        room_no: input.room_no.trim().to_string(),
        triggered_by,
        triggered_by_name,
        is_anonymous: caller.is_none(),
    };
    let alert = SosAlertRepo::create(&state.pool, &create).await?;

    // Fan the alert out to every connected admin feed.
    let mut event = DomainEvent::new(EVENT_SOS_TRIGGERED)
        .with_entity(alert.id)
        .with_payload(serde_json::to_value(&alert).unwrap_or_default());
    if let Some(user_id) = alert.triggered_by {
        event = event.with_actor(user_id);
    }
    state.event_bus.publish(event);

    tracing::warn!(
        alert_id = alert.id,
        room_no = %alert.room_no,
        is_anonymous = alert.is_anonymous,
        "SOS alert triggered"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: alert })))
}

/// GET /api/v1/sos
///
/// List every alert, newest first (admin only).
pub async fn list_alerts(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SosAlert>>>> {
    let alerts = SosAlertRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: alerts }))
}
