//! Registration model for participant intake and attendance.
//!
//! Every registration carries a unique check-in token; the token is what the
//! participant's QR code encodes, so possession of it is the attendance
//! credential.

use diesel::prelude::*;
use jiff_diesel::{Date, Timestamp};
use uuid::Uuid;

use crate::schema::registrations;
use crate::types::{Gender, RegistrationStatus};

/// A participant's registration for an event.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = registrations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Registration {
    /// Unique registration identifier.
    pub id: Uuid,
    /// Event the registration belongs to.
    pub event_id: Uuid,
    /// Participant's full name.
    pub full_name: String,
    /// Participant's gender, used for room placement.
    pub gender: Gender,
    /// Participant's date of birth.
    pub birth_date: Date,
    /// Guardian's email address.
    pub guardian_email: String,
    /// Guardian's phone number, if provided.
    pub guardian_phone: Option<String>,
    /// Lifecycle status.
    pub status: RegistrationStatus,
    /// Token encoded in the participant's QR code.
    pub checkin_token: Uuid,
    /// Timestamp of gate check-in, once scanned.
    pub checked_in_at: Option<Timestamp>,
    /// Timestamp when the registration was created.
    pub created_at: Timestamp,
    /// Timestamp when the registration was last updated.
    pub updated_at: Timestamp,
}

/// Data for creating a new registration.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = registrations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewRegistration {
    /// Event the registration belongs to.
    pub event_id: Uuid,
    /// Participant's full name.
    pub full_name: String,
    /// Participant's gender.
    pub gender: Gender,
    /// Participant's date of birth.
    pub birth_date: Date,
    /// Guardian's email address.
    pub guardian_email: String,
    /// Guardian's phone number.
    pub guardian_phone: Option<String>,
}

/// Data for updating a registration.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = registrations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateRegistration {
    /// Participant's full name.
    pub full_name: Option<String>,
    /// Guardian's email address.
    pub guardian_email: Option<String>,
    /// Guardian's phone number. `Some(None)` clears the number.
    pub guardian_phone: Option<Option<String>>,
    /// Lifecycle status.
    pub status: Option<RegistrationStatus>,
    /// Gate check-in timestamp.
    pub checked_in_at: Option<Timestamp>,
}

impl Registration {
    /// Returns whether the participant has checked in at the gate.
    pub fn is_checked_in(&self) -> bool {
        self.checked_in_at.is_some()
    }

    /// Returns whether this registration may check in at the gate.
    pub fn can_check_in(&self) -> bool {
        self.status.allows_check_in() && !self.is_checked_in()
    }

    /// Returns whether this registration is eligible for a bed.
    pub fn can_hold_bed(&self) -> bool {
        self.status.allows_room_assignment()
    }
}
