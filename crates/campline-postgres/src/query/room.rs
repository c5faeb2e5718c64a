//! Room repository: occupancy reads and bed allocation.
//!
//! Allocation is bounded join-row bookkeeping: every mutation runs inside a
//! single transaction that re-checks the gender restriction and free capacity
//! before touching `room_assignments`.

use std::collections::HashMap;
use std::future::Future;

use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::model::{NewRoom, NewRoomAssignment, Registration, Room, RoomAssignment};
use crate::types::RegistrationStatus;
use crate::{PgConnection, PgError, PgResult, schema};

/// A room together with its current occupants.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomOccupancy {
    /// The room.
    pub room: Room,
    /// Registrations currently holding a bed in the room.
    pub occupants: Vec<Registration>,
}

impl RoomOccupancy {
    /// Returns the number of free beds left in the room.
    pub fn free_beds(&self) -> i64 {
        i64::from(self.room.capacity) - self.occupants.len() as i64
    }
}

/// Outcome of a single bed-assignment attempt.
///
/// Conflicts are data, not errors: the handler decides the HTTP mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignmentOutcome {
    /// The registrant now holds a bed in the requested room.
    Assigned(RoomAssignment),
    /// The requested room does not exist.
    RoomNotFound,
    /// The registration does not exist.
    RegistrationNotFound,
    /// Room and registration belong to different events.
    DifferentEvent,
    /// The registrant's gender does not match the room restriction.
    GenderMismatch,
    /// The registration status does not allow holding a bed.
    NotEligible,
    /// Every bed in the room is taken.
    RoomFull,
}

/// Result of a bulk auto-allocation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationSummary {
    /// Registrants that received a bed.
    pub placed: usize,
    /// Eligible registrants left without a bed.
    pub unplaced: usize,
}

/// Repository for room and bed-assignment database operations.
pub trait RoomRepository {
    /// Creates a new room.
    fn create_room(&mut self, new_room: NewRoom) -> impl Future<Output = PgResult<Room>> + Send;

    /// Finds a room by its unique identifier.
    fn find_room_by_id(
        &mut self,
        room_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Room>>> + Send;

    /// Returns every room of an event with its occupants, ordered by name.
    fn list_room_occupancies(
        &mut self,
        event_id: Uuid,
    ) -> impl Future<Output = PgResult<Vec<RoomOccupancy>>> + Send;

    /// Assigns a registrant to a room, replacing any prior assignment.
    ///
    /// Runs in a single transaction: verifies both rows exist, that they
    /// belong to the same event, that the gender restriction matches, that
    /// the registration is eligible and that a bed is free, then deletes the
    /// old join row and inserts the new one.
    fn assign_room(
        &mut self,
        registration_id: Uuid,
        room_id: Uuid,
    ) -> impl Future<Output = PgResult<AssignmentOutcome>> + Send;

    /// Removes a registrant's bed assignment, if any.
    fn unassign_room(
        &mut self,
        registration_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<RoomAssignment>>> + Send;

    /// Places every unassigned confirmed registrant of the event into the
    /// first gender-matching room with a free bed, in room-name order.
    ///
    /// One transaction; registrants that cannot be placed are counted, not
    /// failed.
    fn auto_allocate_rooms(
        &mut self,
        event_id: Uuid,
    ) -> impl Future<Output = PgResult<AllocationSummary>> + Send;
}

impl RoomRepository for PgConnection {
    async fn create_room(&mut self, mut new_room: NewRoom) -> PgResult<Room> {
        use schema::rooms;

        new_room.name = new_room.name.trim().to_owned();

        diesel::insert_into(rooms::table)
            .values(&new_room)
            .returning(Room::as_returning())
            .get_result(self)
            .await
            .map_err(Into::into)
    }

    async fn find_room_by_id(&mut self, room_id: Uuid) -> PgResult<Option<Room>> {
        use schema::rooms::{self, dsl};

        rooms::table
            .filter(dsl::id.eq(room_id))
            .select(Room::as_select())
            .first(self)
            .await
            .optional()
            .map_err(Into::into)
    }

    async fn list_room_occupancies(&mut self, event_id: Uuid) -> PgResult<Vec<RoomOccupancy>> {
        use schema::{registrations, room_assignments, rooms};

        let event_rooms: Vec<Room> = rooms::table
            .filter(rooms::event_id.eq(event_id))
            .order(rooms::name.asc())
            .select(Room::as_select())
            .load(self)
            .await?;

        let occupants: Vec<(RoomAssignment, Registration)> = room_assignments::table
            .inner_join(rooms::table)
            .inner_join(registrations::table)
            .filter(rooms::event_id.eq(event_id))
            .select((RoomAssignment::as_select(), Registration::as_select()))
            .load(self)
            .await?;

        let mut by_room: HashMap<Uuid, Vec<Registration>> = HashMap::new();
        for (assignment, registration) in occupants {
            by_room
                .entry(assignment.room_id)
                .or_default()
                .push(registration);
        }

        Ok(event_rooms
            .into_iter()
            .map(|room| {
                let occupants = by_room.remove(&room.id).unwrap_or_default();
                RoomOccupancy { room, occupants }
            })
            .collect())
    }

    async fn assign_room(
        &mut self,
        registration_id: Uuid,
        room_id: Uuid,
    ) -> PgResult<AssignmentOutcome> {
        use schema::{registrations, room_assignments, rooms};

        self.transaction::<AssignmentOutcome, PgError, _>(|conn| {
            async move {
                let room = rooms::table
                    .filter(rooms::id.eq(room_id))
                    .select(Room::as_select())
                    .first(conn)
                    .await
                    .optional()?;

                let Some(room) = room else {
                    return Ok(AssignmentOutcome::RoomNotFound);
                };

                let registration = registrations::table
                    .filter(registrations::id.eq(registration_id))
                    .select(Registration::as_select())
                    .first(conn)
                    .await
                    .optional()?;

                let Some(registration) = registration else {
                    return Ok(AssignmentOutcome::RegistrationNotFound);
                };

                if registration.event_id != room.event_id {
                    return Ok(AssignmentOutcome::DifferentEvent);
                }
                if !registration.can_hold_bed() {
                    return Ok(AssignmentOutcome::NotEligible);
                }
                if registration.gender != room.gender {
                    return Ok(AssignmentOutcome::GenderMismatch);
                }

                // Beds taken by anyone other than this registrant.
                let occupied: i64 = room_assignments::table
                    .filter(room_assignments::room_id.eq(room.id))
                    .filter(room_assignments::registration_id.ne(registration.id))
                    .count()
                    .get_result(conn)
                    .await?;

                if occupied >= i64::from(room.capacity) {
                    return Ok(AssignmentOutcome::RoomFull);
                }

                diesel::delete(
                    room_assignments::table
                        .filter(room_assignments::registration_id.eq(registration.id)),
                )
                .execute(conn)
                .await?;

                let assignment = diesel::insert_into(room_assignments::table)
                    .values(NewRoomAssignment {
                        room_id: room.id,
                        registration_id: registration.id,
                    })
                    .returning(RoomAssignment::as_returning())
                    .get_result(conn)
                    .await?;

                Ok(AssignmentOutcome::Assigned(assignment))
            }
            .scope_boxed()
        })
        .await
    }

    async fn unassign_room(&mut self, registration_id: Uuid) -> PgResult<Option<RoomAssignment>> {
        use schema::room_assignments::{self, dsl};

        diesel::delete(room_assignments::table.filter(dsl::registration_id.eq(registration_id)))
            .returning(RoomAssignment::as_returning())
            .get_result(self)
            .await
            .optional()
            .map_err(Into::into)
    }

    async fn auto_allocate_rooms(&mut self, event_id: Uuid) -> PgResult<AllocationSummary> {
        use schema::{registrations, room_assignments, rooms};

        self.transaction::<AllocationSummary, PgError, _>(|conn| {
            async move {
                let event_rooms: Vec<Room> = rooms::table
                    .filter(rooms::event_id.eq(event_id))
                    .order(rooms::name.asc())
                    .select(Room::as_select())
                    .load(conn)
                    .await?;

                let occupied: Vec<(Uuid, i64)> = room_assignments::table
                    .inner_join(rooms::table)
                    .filter(rooms::event_id.eq(event_id))
                    .group_by(room_assignments::room_id)
                    .select((room_assignments::room_id, count_star()))
                    .load(conn)
                    .await?;
                let occupied: HashMap<Uuid, i64> = occupied.into_iter().collect();

                // Confirmed registrants without a bed, oldest first.
                let unassigned: Vec<Registration> = registrations::table
                    .left_join(room_assignments::table)
                    .filter(registrations::event_id.eq(event_id))
                    .filter(registrations::status.eq(RegistrationStatus::Confirmed))
                    .filter(room_assignments::id.is_null())
                    .order(registrations::created_at.asc())
                    .select(Registration::as_select())
                    .load(conn)
                    .await?;

                let mut free_beds: HashMap<Uuid, i64> = event_rooms
                    .iter()
                    .map(|room| {
                        let taken = occupied.get(&room.id).copied().unwrap_or(0);
                        (room.id, i64::from(room.capacity) - taken)
                    })
                    .collect();

                let mut new_assignments = Vec::new();
                let mut unplaced = 0usize;

                for registration in &unassigned {
                    let slot = event_rooms.iter().find(|room| {
                        room.gender == registration.gender
                            && free_beds.get(&room.id).copied().unwrap_or(0) > 0
                    });

                    match slot {
                        Some(room) => {
                            *free_beds.entry(room.id).or_insert(0) -= 1;
                            new_assignments.push(NewRoomAssignment {
                                room_id: room.id,
                                registration_id: registration.id,
                            });
                        }
                        None => unplaced += 1,
                    }
                }

                let placed = new_assignments.len();
                if !new_assignments.is_empty() {
                    diesel::insert_into(room_assignments::table)
                        .values(&new_assignments)
                        .execute(conn)
                        .await?;
                }

                Ok(AllocationSummary { placed, unplaced })
            }
            .scope_boxed()
        })
        .await
    }
}
