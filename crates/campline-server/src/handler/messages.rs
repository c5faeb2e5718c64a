//! Outbound-message handlers: broadcast fan-out and the delivery log.
//!
//! A broadcast inserts one `queued` row per targeted registration in a
//! single batch; registrants whose contact data is missing for the chosen
//! channel are skipped and counted. Handing rows to a provider is a separate
//! process and out of scope here.

use axum::Router;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::get;
use campline_postgres::model::{NewOutboundMessage, OutboundMessage, Registration};
use campline_postgres::query::{EventRepository, MessageRepository, RegistrationRepository};
use campline_postgres::types::{MessageChannel, MessageStatus};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::extract::{AuthSession, Capability, Db, Json, ValidateJson};
use crate::handler::request::PaginationQuery;
use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for message operations.
const TRACING_TARGET: &str = "campline_server::handler::messages";

/// Returns the router for message endpoints.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/events/{event_id}/messages", get(list).post(broadcast))
}

/// Request payload for a broadcast to an event's registrants.
#[must_use]
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct BroadcastRequest {
    /// Delivery channel.
    channel: MessageChannel,
    /// Subject line; required for email.
    #[validate(length(min = 1, max = 200))]
    subject: Option<String>,
    /// Message body.
    #[validate(length(min = 1, max = 2000))]
    body: String,
    /// Restrict the audience to confirmed registrations.
    #[serde(default)]
    only_confirmed: bool,
}

/// Result of a broadcast fan-out.
#[must_use]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BroadcastResponse {
    /// Messages queued for delivery.
    queued: usize,
    /// Registrants skipped for missing contact data.
    skipped: usize,
}

/// Picks the channel-specific recipient address for a registrant.
fn recipient_for(channel: MessageChannel, registration: &Registration) -> Option<String> {
    match channel {
        MessageChannel::Email => Some(registration.guardian_email.clone()),
        MessageChannel::Sms => registration.guardian_phone.clone(),
        MessageChannel::InApp => Some(registration.id.to_string()),
    }
}

async fn broadcast(
    auth: AuthSession,
    Db(mut conn): Db,
    Path(event_id): Path<Uuid>,
    ValidateJson(request): ValidateJson<BroadcastRequest>,
) -> Result<(StatusCode, Json<BroadcastResponse>)> {
    auth.require(Capability::SendMessages)?;

    if request.channel == MessageChannel::Email && request.subject.is_none() {
        return Err(ErrorKind::BadRequest
            .with_message("Email broadcasts require a subject")
            .with_resource("message"));
    }

    conn.find_event_by_id(event_id)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("event"))?;

    let registrations = conn.list_event_registrations(event_id).await?;

    let mut skipped = 0usize;
    let mut new_messages = Vec::new();

    for registration in registrations
        .iter()
        .filter(|registration| registration.status.is_active())
        .filter(|registration| !request.only_confirmed || registration.can_hold_bed())
    {
        match recipient_for(request.channel, registration) {
            Some(recipient) => new_messages.push(NewOutboundMessage {
                event_id,
                registration_id: Some(registration.id),
                channel: request.channel,
                recipient,
                subject: request.subject.clone(),
                body: request.body.clone(),
            }),
            None => skipped += 1,
        }
    }

    let queued = conn.queue_messages(new_messages).await?;

    tracing::info!(
        target: TRACING_TARGET,
        event_id = %event_id,
        channel = %request.channel,
        queued = queued,
        skipped = skipped,
        sent_by = %auth.account_id(),
        "broadcast queued"
    );

    Ok((
        StatusCode::CREATED,
        Json(BroadcastResponse { queued, skipped }),
    ))
}

/// A row of the delivery log.
#[must_use]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MessageView {
    /// ID of the message.
    id: Uuid,
    /// Registration the message targets.
    registration_id: Option<Uuid>,
    /// Delivery channel.
    channel: MessageChannel,
    /// Channel-specific recipient address.
    recipient: String,
    /// Subject line.
    subject: Option<String>,
    /// Message body.
    body: String,
    /// Delivery status.
    status: MessageStatus,
    /// When the message was queued.
    created_at: Timestamp,
    /// When the message was handed to the provider.
    sent_at: Option<Timestamp>,
}

impl From<OutboundMessage> for MessageView {
    fn from(message: OutboundMessage) -> Self {
        Self {
            id: message.id,
            registration_id: message.registration_id,
            channel: message.channel,
            recipient: message.recipient,
            subject: message.subject,
            body: message.body,
            status: message.status,
            created_at: message.created_at.into(),
            sent_at: message.sent_at.map(Into::into),
        }
    }
}

async fn list(
    auth: AuthSession,
    Db(mut conn): Db,
    Path(event_id): Path<Uuid>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<Vec<MessageView>>> {
    auth.require(Capability::ReadMessages)?;

    conn.find_event_by_id(event_id)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("event"))?;

    let messages = conn
        .list_event_messages(event_id, pagination.into_pagination())
        .await?;

    Ok(Json(messages.into_iter().map(Into::into).collect()))
}
