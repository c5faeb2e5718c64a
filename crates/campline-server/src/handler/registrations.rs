//! Registration handlers: intake, roster reads and updates.
//!
//! The roster read is served through the per-event TTL cache; every mutation
//! here invalidates the affected event's entry so staff see their own writes
//! immediately.

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use campline_postgres::model::{
    NewAccountNotification, NewRegistration, Registration, UpdateRegistration,
};
use campline_postgres::query::{
    AccountRepository, EventRepository, NotificationRepository, RegistrationRepository,
    RoomRepository,
};
use campline_postgres::types::{Gender, RegistrationStatus};
use jiff::Timestamp;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::extract::{AuthSession, Capability, Db, Json, ValidateJson};
use crate::handler::{ErrorKind, Result};
use crate::service::{OccupancyCache, RosterCache, ServiceState};

/// Tracing target for registration operations.
const TRACING_TARGET: &str = "campline_server::handler::registrations";

/// Returns the router for registration endpoints.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route(
            "/events/{event_id}/registrations",
            get(roster).post(create),
        )
        .route("/registrations/{registration_id}", patch(update))
}

/// Registration details exposed to staff.
///
/// Includes the check-in token so the admin UI can render the QR code.
#[must_use]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegistrationProfile {
    /// ID of the registration.
    id: Uuid,
    /// Event the registration belongs to.
    event_id: Uuid,
    /// Participant's full name.
    full_name: String,
    /// Participant's gender.
    gender: Gender,
    /// Participant's date of birth.
    birth_date: Date,
    /// Guardian's email address.
    guardian_email: String,
    /// Guardian's phone number.
    guardian_phone: Option<String>,
    /// Lifecycle status.
    status: RegistrationStatus,
    /// Token encoded in the participant's QR code.
    checkin_token: Uuid,
    /// When the participant checked in at the gate.
    checked_in_at: Option<Timestamp>,
    /// When the registration was created.
    created_at: Timestamp,
}

impl From<Registration> for RegistrationProfile {
    fn from(registration: Registration) -> Self {
        Self {
            id: registration.id,
            event_id: registration.event_id,
            full_name: registration.full_name,
            gender: registration.gender,
            birth_date: registration.birth_date.into(),
            guardian_email: registration.guardian_email,
            guardian_phone: registration.guardian_phone,
            status: registration.status,
            checkin_token: registration.checkin_token,
            checked_in_at: registration.checked_in_at.map(Into::into),
            created_at: registration.created_at.into(),
        }
    }
}

async fn roster(
    auth: AuthSession,
    State(roster_cache): State<RosterCache>,
    Db(mut conn): Db,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Vec<RegistrationProfile>>> {
    auth.require(Capability::ReadRegistrations)?;

    conn.find_event_by_id(event_id)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("event"))?;

    let registrations = match roster_cache.get(&event_id).await {
        Some(cached) => cached,
        None => {
            let loaded = conn.list_event_registrations(event_id).await?;
            roster_cache.insert(event_id, loaded.clone()).await;
            loaded
        }
    };

    Ok(Json(registrations.into_iter().map(Into::into).collect()))
}

/// Request payload for participant intake.
#[must_use]
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct CreateRegistrationRequest {
    /// Participant's full name.
    #[validate(length(min = 2, max = 120))]
    full_name: String,
    /// Participant's gender.
    gender: Gender,
    /// Participant's date of birth.
    birth_date: Date,
    /// Guardian's email address.
    #[validate(email)]
    guardian_email: String,
    /// Guardian's phone number.
    #[validate(length(max = 32))]
    guardian_phone: Option<String>,
}

async fn create(
    auth: AuthSession,
    State(roster_cache): State<RosterCache>,
    Db(mut conn): Db,
    Path(event_id): Path<Uuid>,
    ValidateJson(request): ValidateJson<CreateRegistrationRequest>,
) -> Result<(StatusCode, Json<RegistrationProfile>)> {
    auth.require(Capability::WriteRegistrations)?;

    let event = conn
        .find_event_by_id(event_id)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("event"))?;

    if !event.accepts_registrations() {
        return Err(ErrorKind::Conflict
            .with_message("Event is archived and no longer accepts registrations")
            .with_resource("event"));
    }

    let registration = conn
        .create_registration(NewRegistration {
            event_id,
            full_name: request.full_name,
            gender: request.gender,
            birth_date: request.birth_date.into(),
            guardian_email: request.guardian_email,
            guardian_phone: request.guardian_phone,
        })
        .await?;

    roster_cache.invalidate(&event_id).await;

    notify_admins_of_intake(&mut conn, &auth, &registration, &event.name).await;

    tracing::info!(
        target: TRACING_TARGET,
        registration_id = %registration.id,
        event_id = %event_id,
        created_by = %auth.account_id(),
        "registration created"
    );

    Ok((StatusCode::CREATED, Json(registration.into())))
}

/// Fans out an in-app notification to the other active admins.
///
/// Notification failures are logged and swallowed; intake must not fail
/// because a notification row could not be written.
async fn notify_admins_of_intake(
    conn: &mut campline_postgres::PgConn,
    auth: &AuthSession,
    registration: &Registration,
    event_name: &str,
) {
    let admin_ids = match conn.list_active_admin_ids().await {
        Ok(ids) => ids,
        Err(e) => {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                "failed to load admin accounts for intake notification"
            );
            return;
        }
    };

    let notifications: Vec<NewAccountNotification> = admin_ids
        .into_iter()
        .filter(|account_id| *account_id != auth.account_id())
        .map(|account_id| NewAccountNotification {
            account_id,
            title: "New registration".to_owned(),
            body: format!("{} registered for {}", registration.full_name, event_name),
        })
        .collect();

    if let Err(e) = conn.create_notifications(notifications).await {
        tracing::error!(
            target: TRACING_TARGET,
            error = %e,
            registration_id = %registration.id,
            "failed to create intake notifications"
        );
    }
}

/// Request payload for updating a registration.
#[must_use]
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct UpdateRegistrationRequest {
    /// Participant's full name.
    #[validate(length(min = 2, max = 120))]
    full_name: Option<String>,
    /// Guardian's email address.
    #[validate(email)]
    guardian_email: Option<String>,
    /// Guardian's phone number; an empty string clears it.
    #[validate(length(max = 32))]
    guardian_phone: Option<String>,
    /// Lifecycle status.
    status: Option<RegistrationStatus>,
}

async fn update(
    auth: AuthSession,
    State(roster_cache): State<RosterCache>,
    State(occupancy_cache): State<OccupancyCache>,
    Db(mut conn): Db,
    Path(registration_id): Path<Uuid>,
    ValidateJson(request): ValidateJson<UpdateRegistrationRequest>,
) -> Result<Json<RegistrationProfile>> {
    auth.require(Capability::WriteRegistrations)?;

    let existing = conn
        .find_registration_by_id(registration_id)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("registration"))?;

    let cancelling = request.status == Some(RegistrationStatus::Cancelled);

    let updated = conn
        .update_registration(
            registration_id,
            UpdateRegistration {
                full_name: request.full_name,
                guardian_email: request.guardian_email,
                guardian_phone: request.guardian_phone.map(Some),
                status: request.status,
                ..Default::default()
            },
        )
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("registration"))?;

    // A cancelled registrant must not keep holding a bed.
    if cancelling && conn.unassign_room(registration_id).await?.is_some() {
        tracing::info!(
            target: TRACING_TARGET,
            registration_id = %registration_id,
            "bed released on cancellation"
        );
    }

    roster_cache.invalidate(&existing.event_id).await;
    occupancy_cache.invalidate(&existing.event_id).await;

    tracing::info!(
        target: TRACING_TARGET,
        registration_id = %registration_id,
        event_id = %existing.event_id,
        updated_by = %auth.account_id(),
        "registration updated"
    );

    Ok(Json(updated.into()))
}
