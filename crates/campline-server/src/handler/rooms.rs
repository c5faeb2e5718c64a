//! Room handlers: occupancy reads, room creation and bed allocation.
//!
//! Occupancy is served through the per-event TTL cache. Every allocation
//! mutation invalidates the affected event's entry.

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use campline_postgres::model::NewRoom;
use campline_postgres::query::{
    AssignmentOutcome, EventRepository, RegistrationRepository, RoomOccupancy, RoomRepository,
};
use campline_postgres::types::{Gender, RegistrationStatus};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::extract::{AuthSession, Capability, Db, Json, ValidateJson};
use crate::handler::{Error, ErrorKind, Result};
use crate::service::{OccupancyCache, ServiceState};

/// Tracing target for room operations.
const TRACING_TARGET: &str = "campline_server::handler::rooms";

/// Returns the router for room and allocation endpoints.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/events/{event_id}/rooms", get(list).post(create))
        .route("/events/{event_id}/rooms/auto-allocate", post(auto_allocate))
        .route(
            "/registrations/{registration_id}/room",
            put(assign).delete(unassign),
        )
}

/// A registrant occupying a bed, as shown in the occupancy view.
#[must_use]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OccupantView {
    /// ID of the registration.
    registration_id: Uuid,
    /// Participant's full name.
    full_name: String,
    /// Lifecycle status.
    status: RegistrationStatus,
}

/// A room with its occupants.
#[must_use]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RoomView {
    /// ID of the room.
    id: Uuid,
    /// Room name.
    name: String,
    /// Occupancy restriction.
    gender: Gender,
    /// Number of beds.
    capacity: i32,
    /// Operator notes.
    notes: Option<String>,
    /// Number of free beds left.
    free_beds: i64,
    /// Current occupants.
    occupants: Vec<OccupantView>,
}

impl From<RoomOccupancy> for RoomView {
    fn from(occupancy: RoomOccupancy) -> Self {
        let free_beds = occupancy.free_beds();
        let RoomOccupancy { room, occupants } = occupancy;

        Self {
            id: room.id,
            name: room.name,
            gender: room.gender,
            capacity: room.capacity,
            notes: room.notes,
            free_beds,
            occupants: occupants
                .into_iter()
                .map(|registration| OccupantView {
                    registration_id: registration.id,
                    full_name: registration.full_name,
                    status: registration.status,
                })
                .collect(),
        }
    }
}

async fn list(
    auth: AuthSession,
    State(occupancy_cache): State<OccupancyCache>,
    Db(mut conn): Db,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Vec<RoomView>>> {
    auth.require(Capability::ReadRooms)?;

    conn.find_event_by_id(event_id)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("event"))?;

    let occupancies = match occupancy_cache.get(&event_id).await {
        Some(cached) => cached,
        None => {
            let loaded = conn.list_room_occupancies(event_id).await?;
            occupancy_cache.insert(event_id, loaded.clone()).await;
            loaded
        }
    };

    Ok(Json(occupancies.into_iter().map(Into::into).collect()))
}

/// Request payload for creating a room.
#[must_use]
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct CreateRoomRequest {
    /// Room name, unique within the event.
    #[validate(length(min = 1, max = 64))]
    name: String,
    /// Occupancy restriction.
    gender: Gender,
    /// Number of beds.
    #[validate(range(min = 1, max = 64))]
    capacity: i32,
    /// Operator notes.
    #[validate(length(max = 500))]
    notes: Option<String>,
}

async fn create(
    auth: AuthSession,
    State(occupancy_cache): State<OccupancyCache>,
    Db(mut conn): Db,
    Path(event_id): Path<Uuid>,
    ValidateJson(request): ValidateJson<CreateRoomRequest>,
) -> Result<(StatusCode, Json<RoomView>)> {
    auth.require(Capability::ManageRooms)?;

    conn.find_event_by_id(event_id)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("event"))?;

    let room = conn
        .create_room(NewRoom {
            event_id,
            name: request.name,
            gender: request.gender,
            capacity: request.capacity,
            notes: request.notes,
        })
        .await?;

    occupancy_cache.invalidate(&event_id).await;

    tracing::info!(
        target: TRACING_TARGET,
        room_id = %room.id,
        event_id = %event_id,
        capacity = room.capacity,
        created_by = %auth.account_id(),
        "room created"
    );

    Ok((
        StatusCode::CREATED,
        Json(RoomView::from(RoomOccupancy {
            room,
            occupants: Vec::new(),
        })),
    ))
}

/// Request payload for assigning a registrant to a room.
#[must_use]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssignRoomRequest {
    /// Room to place the registrant in.
    room_id: Uuid,
}

/// Response for a successful bed assignment.
#[must_use]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AssignmentView {
    /// ID of the assignment row.
    id: Uuid,
    /// Occupied room.
    room_id: Uuid,
    /// Occupying registration.
    registration_id: Uuid,
    /// When the bed was assigned.
    assigned_at: Timestamp,
}

async fn assign(
    auth: AuthSession,
    State(occupancy_cache): State<OccupancyCache>,
    Db(mut conn): Db,
    Path(registration_id): Path<Uuid>,
    Json(request): Json<AssignRoomRequest>,
) -> Result<Json<AssignmentView>> {
    auth.require(Capability::ManageRooms)?;

    let registration = conn
        .find_registration_by_id(registration_id)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("registration"))?;

    let outcome = conn.assign_room(registration_id, request.room_id).await?;

    let assignment = match outcome {
        AssignmentOutcome::Assigned(assignment) => assignment,
        other => return Err(assignment_conflict(other)),
    };

    occupancy_cache.invalidate(&registration.event_id).await;

    tracing::info!(
        target: TRACING_TARGET,
        registration_id = %registration_id,
        room_id = %assignment.room_id,
        assigned_by = %auth.account_id(),
        "bed assigned"
    );

    Ok(Json(AssignmentView {
        id: assignment.id,
        room_id: assignment.room_id,
        registration_id: assignment.registration_id,
        assigned_at: assignment.assigned_at.into(),
    }))
}

/// Maps non-success assignment outcomes to HTTP errors.
fn assignment_conflict(outcome: AssignmentOutcome) -> Error<'static> {
    match outcome {
        AssignmentOutcome::RoomNotFound => ErrorKind::NotFound.with_resource("room"),
        AssignmentOutcome::RegistrationNotFound => {
            ErrorKind::NotFound.with_resource("registration")
        }
        AssignmentOutcome::DifferentEvent => ErrorKind::Conflict
            .with_message("Room and registration belong to different events")
            .with_resource("room"),
        AssignmentOutcome::GenderMismatch => ErrorKind::Conflict
            .with_message("Room gender restriction does not match the registrant")
            .with_resource("room"),
        AssignmentOutcome::NotEligible => ErrorKind::Conflict
            .with_message("Only confirmed registrations can hold a bed")
            .with_resource("registration"),
        AssignmentOutcome::RoomFull => ErrorKind::Conflict
            .with_message("Every bed in the room is taken")
            .with_resource("room"),
        AssignmentOutcome::Assigned(_) => ErrorKind::InternalServerError.into_error(),
    }
    .into_static()
}

async fn unassign(
    auth: AuthSession,
    State(occupancy_cache): State<OccupancyCache>,
    Db(mut conn): Db,
    Path(registration_id): Path<Uuid>,
) -> Result<StatusCode> {
    auth.require(Capability::ManageRooms)?;

    let registration = conn
        .find_registration_by_id(registration_id)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("registration"))?;

    conn.unassign_room(registration_id)
        .await?
        .ok_or_else(|| ErrorKind::NotFound
            .with_message("Registrant does not hold a bed")
            .with_resource("room-assignment"))?;

    occupancy_cache.invalidate(&registration.event_id).await;

    tracing::info!(
        target: TRACING_TARGET,
        registration_id = %registration_id,
        removed_by = %auth.account_id(),
        "bed released"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// Result of a bulk auto-allocation pass.
#[must_use]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AllocationView {
    /// Registrants that received a bed.
    placed: usize,
    /// Eligible registrants left without a bed.
    unplaced: usize,
}

async fn auto_allocate(
    auth: AuthSession,
    State(occupancy_cache): State<OccupancyCache>,
    Db(mut conn): Db,
    Path(event_id): Path<Uuid>,
) -> Result<Json<AllocationView>> {
    auth.require(Capability::ManageRooms)?;

    conn.find_event_by_id(event_id)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("event"))?;

    let summary = conn.auto_allocate_rooms(event_id).await?;
    occupancy_cache.invalidate(&event_id).await;

    tracing::info!(
        target: TRACING_TARGET,
        event_id = %event_id,
        placed = summary.placed,
        unplaced = summary.unplaced,
        run_by = %auth.account_id(),
        "auto-allocation completed"
    );

    Ok(Json(AllocationView {
        placed: summary.placed,
        unplaced: summary.unplaced,
    }))
}
