//! Attendance check-in via scanned QR codes.
//!
//! The check-in token inside the QR code is the credential: the endpoint is
//! public, and possession of a valid token checks the registrant in. A
//! second scan is reported as a conflict so gate staff notice duplicates.

use axum::Router;
use axum::extract::State;
use axum::routing::post;
use campline_postgres::query::RegistrationRepository;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::extract::{Db, Json};
use crate::handler::{ErrorKind, Result};
use crate::service::{RosterCache, ServiceState};

/// Tracing target for attendance operations.
const TRACING_TARGET: &str = "campline_server::handler::attendance";

/// Returns the router for attendance endpoints.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/attendance/check-in", post(check_in))
}

/// Request payload carrying the scanned token.
#[must_use]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckInRequest {
    /// Token decoded from the participant's QR code.
    token: Uuid,
}

/// Response for a successful check-in.
#[must_use]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckInResponse {
    /// ID of the registration.
    registration_id: Uuid,
    /// Event the registration belongs to.
    event_id: Uuid,
    /// Participant's full name, for the gate display.
    full_name: String,
    /// When the participant checked in.
    checked_in_at: Timestamp,
}

async fn check_in(
    State(roster_cache): State<RosterCache>,
    Db(mut conn): Db,
    Json(request): Json<CheckInRequest>,
) -> Result<Json<CheckInResponse>> {
    let registration = conn
        .find_registration_by_checkin_token(request.token)
        .await?
        .ok_or_else(|| {
            tracing::warn!(
                target: TRACING_TARGET,
                "check-in rejected: unknown token"
            );
            ErrorKind::NotFound
                .with_message("Unknown attendance code")
                .with_resource("registration")
        })?;

    if !registration.status.allows_check_in() {
        tracing::warn!(
            target: TRACING_TARGET,
            registration_id = %registration.id,
            status = %registration.status,
            "check-in rejected: registration cancelled"
        );
        return Err(ErrorKind::Conflict
            .with_message("Registration has been cancelled")
            .with_resource("registration"));
    }

    if let Some(checked_in_at) = registration.checked_in_at {
        tracing::warn!(
            target: TRACING_TARGET,
            registration_id = %registration.id,
            "check-in rejected: already checked in"
        );
        return Err(ErrorKind::Conflict
            .with_message("Participant is already checked in")
            .with_context(format!(
                "Checked in at {}",
                jiff::Timestamp::from(checked_in_at)
            ))
            .with_resource("registration"));
    }

    let registration = conn.mark_checked_in(registration.id).await?;
    roster_cache.invalidate(&registration.event_id).await;

    let checked_in_at = registration
        .checked_in_at
        .map(Into::into)
        .unwrap_or_else(Timestamp::now);

    tracing::info!(
        target: TRACING_TARGET,
        registration_id = %registration.id,
        event_id = %registration.event_id,
        "participant checked in"
    );

    Ok(Json(CheckInResponse {
        registration_id: registration.id,
        event_id: registration.event_id,
        full_name: registration.full_name,
        checked_in_at,
    }))
}
