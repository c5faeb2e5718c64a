//! Event handlers: listing and creation.

use axum::Router;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;
use campline_postgres::model::{Event, NewEvent};
use campline_postgres::query::EventRepository;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::extract::{AuthSession, Capability, Db, Json, ValidateJson};
use crate::handler::request::PaginationQuery;
use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for event operations.
const TRACING_TARGET: &str = "campline_server::handler::events";

/// Returns the router for event endpoints.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/events", get(list).post(create))
}

/// Event details exposed to staff.
#[must_use]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventProfile {
    /// ID of the event.
    id: Uuid,
    /// Display name of the event.
    name: String,
    /// When the event starts.
    starts_at: Timestamp,
    /// When the event ends.
    ends_at: Timestamp,
    /// Whether the event is archived.
    is_archived: bool,
    /// When the event was created.
    created_at: Timestamp,
}

impl From<Event> for EventProfile {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            name: event.name,
            starts_at: event.starts_at.into(),
            ends_at: event.ends_at.into(),
            is_archived: event.is_archived,
            created_at: event.created_at.into(),
        }
    }
}

async fn list(
    auth: AuthSession,
    Db(mut conn): Db,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<Vec<EventProfile>>> {
    auth.require(Capability::ReadEvents)?;

    let events = conn.list_events(pagination.into_pagination()).await?;
    Ok(Json(events.into_iter().map(Into::into).collect()))
}

/// Request payload for creating an event.
#[must_use]
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct CreateEventRequest {
    /// Display name of the event.
    #[validate(length(min = 2, max = 120))]
    name: String,
    /// When the event starts.
    starts_at: Timestamp,
    /// When the event ends.
    ends_at: Timestamp,
}

async fn create(
    auth: AuthSession,
    Db(mut conn): Db,
    ValidateJson(request): ValidateJson<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventProfile>)> {
    auth.require(Capability::ManageEvents)?;

    if request.ends_at < request.starts_at {
        return Err(ErrorKind::BadRequest
            .with_message("Event cannot end before it starts")
            .with_resource("event"));
    }

    let event = conn
        .create_event(NewEvent {
            name: request.name,
            starts_at: request.starts_at.into(),
            ends_at: request.ends_at.into(),
        })
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        event_id = %event.id,
        created_by = %auth.account_id(),
        "event created"
    );

    Ok((StatusCode::CREATED, Json(event.into())))
}
