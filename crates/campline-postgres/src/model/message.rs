//! Outbound message log model.
//!
//! Rows here are delivery records only; handing them to an email or SMS
//! provider happens out of process.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::outbound_messages;
use crate::types::{MessageChannel, MessageStatus};

/// A queued, sent or failed outbound message.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = outbound_messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OutboundMessage {
    /// Unique message identifier.
    pub id: Uuid,
    /// Event the broadcast belongs to.
    pub event_id: Uuid,
    /// Registration the message targets, if any.
    pub registration_id: Option<Uuid>,
    /// Delivery channel.
    pub channel: MessageChannel,
    /// Channel-specific recipient address.
    pub recipient: String,
    /// Subject line (email only).
    pub subject: Option<String>,
    /// Message body.
    pub body: String,
    /// Delivery status.
    pub status: MessageStatus,
    /// Timestamp when the message was queued.
    pub created_at: Timestamp,
    /// Timestamp when the message was handed to the provider.
    pub sent_at: Option<Timestamp>,
}

/// Data for queueing a new outbound message.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = outbound_messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewOutboundMessage {
    /// Event the broadcast belongs to.
    pub event_id: Uuid,
    /// Registration the message targets.
    pub registration_id: Option<Uuid>,
    /// Delivery channel.
    pub channel: MessageChannel,
    /// Channel-specific recipient address.
    pub recipient: String,
    /// Subject line (email only).
    pub subject: Option<String>,
    /// Message body.
    pub body: String,
}

impl OutboundMessage {
    /// Returns whether the message is still waiting for delivery.
    pub fn is_queued(&self) -> bool {
        matches!(self.status, MessageStatus::Queued)
    }
}
