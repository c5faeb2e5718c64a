//! Room and bed-assignment models.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::{room_assignments, rooms};
use crate::types::Gender;

/// A room (cabin, dorm) belonging to an event, with a fixed bed capacity.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = rooms)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Room {
    /// Unique room identifier.
    pub id: Uuid,
    /// Event the room belongs to.
    pub event_id: Uuid,
    /// Room name, unique within its event.
    pub name: String,
    /// Occupancy restriction; only matching registrants get a bed here.
    pub gender: Gender,
    /// Number of beds.
    pub capacity: i32,
    /// Free-form operator notes.
    pub notes: Option<String>,
    /// Timestamp when the room was created.
    pub created_at: Timestamp,
}

/// Data for creating a new room.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = rooms)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewRoom {
    /// Event the room belongs to.
    pub event_id: Uuid,
    /// Room name.
    pub name: String,
    /// Occupancy restriction.
    pub gender: Gender,
    /// Number of beds.
    pub capacity: i32,
    /// Operator notes.
    pub notes: Option<String>,
}

/// A registrant occupying a bed in a room.
///
/// `registration_id` is unique: a registrant holds at most one bed.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = room_assignments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RoomAssignment {
    /// Unique assignment identifier.
    pub id: Uuid,
    /// Occupied room.
    pub room_id: Uuid,
    /// Occupying registration.
    pub registration_id: Uuid,
    /// Timestamp when the bed was assigned.
    pub assigned_at: Timestamp,
}

/// Data for creating a new room assignment.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = room_assignments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewRoomAssignment {
    /// Room to occupy.
    pub room_id: Uuid,
    /// Occupying registration.
    pub registration_id: Uuid,
}
