//! Delivery channel for outbound messages.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Channel an outbound message is addressed to.
///
/// Corresponds to the `MESSAGE_CHANNEL` PostgreSQL enum. Actual delivery is
/// handled out of process; this service only records the queue.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::MessageChannel"]
pub enum MessageChannel {
    #[db_rename = "email"]
    #[serde(rename = "email")]
    #[strum(serialize = "email")]
    Email,

    #[db_rename = "sms"]
    #[serde(rename = "sms")]
    #[strum(serialize = "sms")]
    Sms,

    #[db_rename = "in_app"]
    #[serde(rename = "in_app")]
    #[strum(serialize = "in_app")]
    InApp,
}
