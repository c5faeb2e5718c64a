//! In-app notification model for staff accounts.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::account_notifications;

/// An in-app notification addressed to an account.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = account_notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AccountNotification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// Account receiving the notification.
    pub account_id: Uuid,
    /// Notification title.
    pub title: String,
    /// Notification body.
    pub body: String,
    /// Whether the notification has been read.
    pub is_read: bool,
    /// Timestamp when the notification was read.
    pub read_at: Option<Timestamp>,
    /// Notification creation timestamp.
    pub created_at: Timestamp,
}

/// Data for creating a new account notification.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = account_notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewAccountNotification {
    /// Account receiving the notification.
    pub account_id: Uuid,
    /// Notification title.
    pub title: String,
    /// Notification body.
    pub body: String,
}

impl AccountNotification {
    /// Returns whether this notification is unread.
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }
}
