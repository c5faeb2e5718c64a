//! Event model for program sessions that registrations belong to.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::events;

/// A program event (camp session, retreat, day program).
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Event {
    /// Unique event identifier.
    pub id: Uuid,
    /// Display name of the event.
    pub name: String,
    /// When the event starts.
    pub starts_at: Timestamp,
    /// When the event ends.
    pub ends_at: Timestamp,
    /// Archived events no longer accept registrations.
    pub is_archived: bool,
    /// Timestamp when the event was created.
    pub created_at: Timestamp,
}

/// Data for creating a new event.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewEvent {
    /// Display name of the event.
    pub name: String,
    /// When the event starts.
    pub starts_at: Timestamp,
    /// When the event ends.
    pub ends_at: Timestamp,
}

impl Event {
    /// Returns whether the event still accepts new registrations.
    pub fn accepts_registrations(&self) -> bool {
        !self.is_archived
    }
}
