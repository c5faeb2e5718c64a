//! Registration lifecycle status.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Lifecycle state of an event registration.
///
/// Corresponds to the `REGISTRATION_STATUS` PostgreSQL enum.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::RegistrationStatus"]
pub enum RegistrationStatus {
    /// Submitted but not yet reviewed.
    #[db_rename = "pending"]
    #[serde(rename = "pending")]
    #[strum(serialize = "pending")]
    #[default]
    Pending,

    /// Reviewed and holding a place.
    #[db_rename = "confirmed"]
    #[serde(rename = "confirmed")]
    #[strum(serialize = "confirmed")]
    Confirmed,

    /// Withdrawn; keeps the row for audit purposes.
    #[db_rename = "cancelled"]
    #[serde(rename = "cancelled")]
    #[strum(serialize = "cancelled")]
    Cancelled,

    /// Waiting for a place to free up.
    #[db_rename = "waitlisted"]
    #[serde(rename = "waitlisted")]
    #[strum(serialize = "waitlisted")]
    Waitlisted,
}

impl RegistrationStatus {
    /// Returns whether the registration still holds or may hold a place.
    #[inline]
    pub const fn is_active(self) -> bool {
        !matches!(self, RegistrationStatus::Cancelled)
    }

    /// Returns whether a registrant in this state may check in at the gate.
    #[inline]
    pub const fn allows_check_in(self) -> bool {
        self.is_active()
    }

    /// Returns whether a registrant in this state is eligible for a bed.
    #[inline]
    pub const fn allows_room_assignment(self) -> bool {
        matches!(self, RegistrationStatus::Confirmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_registrations_cannot_check_in() {
        assert!(!RegistrationStatus::Cancelled.allows_check_in());
        assert!(RegistrationStatus::Pending.allows_check_in());
        assert!(RegistrationStatus::Confirmed.allows_check_in());
        assert!(RegistrationStatus::Waitlisted.allows_check_in());
    }

    #[test]
    fn only_confirmed_registrations_get_beds() {
        use strum::IntoEnumIterator;

        let eligible: Vec<_> = RegistrationStatus::iter()
            .filter(|status| status.allows_room_assignment())
            .collect();
        assert_eq!(eligible, vec![RegistrationStatus::Confirmed]);
    }
}
