//! Delivery status for outbound messages.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Delivery state of an outbound message record.
///
/// Corresponds to the `MESSAGE_STATUS` PostgreSQL enum.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::MessageStatus"]
pub enum MessageStatus {
    /// Recorded, waiting for a delivery worker.
    #[db_rename = "queued"]
    #[serde(rename = "queued")]
    #[strum(serialize = "queued")]
    #[default]
    Queued,

    /// Handed off to the delivery provider.
    #[db_rename = "sent"]
    #[serde(rename = "sent")]
    #[strum(serialize = "sent")]
    Sent,

    /// Delivery failed permanently.
    #[db_rename = "failed"]
    #[serde(rename = "failed")]
    #[strum(serialize = "failed")]
    Failed,
}
