//! The permission gate: tagged capabilities and set-membership checks.
//!
//! Every handler authorizes through exactly one abstraction: it names a
//! [`Capability`] and asks the request's [`PermissionSet`] whether the
//! account's role carries it. There are no per-route role allow-lists.
//!
//! Capability names are dot-separated `resource.action` pairs. That spelling
//! is authoritative; colon-separated names do not parse.

use std::collections::HashSet;

use strum::{Display, EnumIter, EnumString};

/// Granular capabilities for authorization checks.
///
/// The canonical name of each variant matches a row in the `permissions`
/// table; the role-to-permission mapping itself lives in the database and is
/// loaded once per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Display, EnumIter, EnumString)]
pub enum Capability {
    /// Can list accounts.
    #[strum(serialize = "accounts.read")]
    ReadAccounts,
    /// Can toggle account active flags.
    #[strum(serialize = "accounts.manage")]
    ManageAccounts,

    /// Can list events.
    #[strum(serialize = "events.read")]
    ReadEvents,
    /// Can create events.
    #[strum(serialize = "events.manage")]
    ManageEvents,

    /// Can read event rosters.
    #[strum(serialize = "registrations.read")]
    ReadRegistrations,
    /// Can create and update registrations.
    #[strum(serialize = "registrations.write")]
    WriteRegistrations,

    /// Can view rooms and occupancy.
    #[strum(serialize = "rooms.read")]
    ReadRooms,
    /// Can create rooms and move registrants between beds.
    #[strum(serialize = "rooms.manage")]
    ManageRooms,

    /// Can read own notifications.
    #[strum(serialize = "notifications.read")]
    ReadNotifications,

    /// Can read the outbound message log.
    #[strum(serialize = "messages.read")]
    ReadMessages,
    /// Can queue broadcast messages.
    #[strum(serialize = "messages.send")]
    SendMessages,
}

impl Capability {
    /// Returns the canonical dot-separated name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ReadAccounts => "accounts.read",
            Self::ManageAccounts => "accounts.manage",
            Self::ReadEvents => "events.read",
            Self::ManageEvents => "events.manage",
            Self::ReadRegistrations => "registrations.read",
            Self::WriteRegistrations => "registrations.write",
            Self::ReadRooms => "rooms.read",
            Self::ManageRooms => "rooms.manage",
            Self::ReadNotifications => "notifications.read",
            Self::ReadMessages => "messages.read",
            Self::SendMessages => "messages.send",
        }
    }

    /// Returns the resource half of the capability name.
    #[must_use]
    pub fn resource(self) -> &'static str {
        self.name().split_once('.').map_or("", |(resource, _)| resource)
    }

    /// Returns true if this capability never modifies anything.
    #[must_use]
    pub const fn is_read_only(self) -> bool {
        matches!(
            self,
            Self::ReadAccounts
                | Self::ReadEvents
                | Self::ReadRegistrations
                | Self::ReadRooms
                | Self::ReadNotifications
                | Self::ReadMessages
        )
    }
}

/// The set of permission names attached to an account's role.
///
/// A pure membership predicate: no database access, no side effects. An
/// account with no role gets [`PermissionSet::empty`], which denies
/// everything; that is the "missing role means no permissions" contract,
/// never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    names: HashSet<String>,
}

impl PermissionSet {
    /// Builds a set from permission names loaded at the data layer.
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        Self {
            names: names.into_iter().collect(),
        }
    }

    /// Returns the empty set (no role, no permissions).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns whether the set carries the given capability.
    #[must_use]
    pub fn allows(&self, capability: Capability) -> bool {
        self.names.contains(capability.name())
    }

    /// Returns whether the set carries a raw permission name.
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Returns whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns the permission names, sorted for stable output.
    #[must_use]
    pub fn sorted_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.names.iter().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for capability in Capability::iter() {
            let parsed = Capability::from_str(capability.name()).unwrap();
            assert_eq!(parsed, capability);
            assert_eq!(capability.to_string(), capability.name());
        }
    }

    #[test]
    fn colon_separated_names_do_not_parse() {
        assert!(Capability::from_str("notifications:read").is_err());
        assert!(Capability::from_str("users:read").is_err());
    }

    #[test]
    fn every_name_is_dot_separated() {
        for capability in Capability::iter() {
            let name = capability.name();
            assert!(name.contains('.'), "{name} is not dot-separated");
            assert!(!name.contains(':'), "{name} uses the legacy separator");
        }
    }

    #[test]
    fn membership_is_exact() {
        let set = PermissionSet::new(vec![
            "registrations.read".to_owned(),
            "rooms.read".to_owned(),
        ]);

        assert!(set.allows(Capability::ReadRegistrations));
        assert!(set.allows(Capability::ReadRooms));
        assert!(!set.allows(Capability::WriteRegistrations));
        assert!(!set.allows(Capability::ManageRooms));
    }

    #[test]
    fn empty_set_denies_everything() {
        let set = PermissionSet::empty();
        assert!(set.is_empty());
        for capability in Capability::iter() {
            assert!(!set.allows(capability));
        }
    }

    #[test]
    fn unknown_names_are_carried_but_grant_nothing() {
        let set = PermissionSet::new(vec!["legacy:permission".to_owned()]);
        assert!(!set.is_empty());
        for capability in Capability::iter() {
            assert!(!set.allows(capability));
        }
        assert!(set.contains_name("legacy:permission"));
    }

    #[test]
    fn resource_accessor() {
        assert_eq!(Capability::ReadRegistrations.resource(), "registrations");
        assert_eq!(Capability::SendMessages.resource(), "messages");
    }

    #[test]
    fn read_only_classification() {
        assert!(Capability::ReadRooms.is_read_only());
        assert!(!Capability::ManageRooms.is_read_only());
        assert!(!Capability::SendMessages.is_read_only());
    }
}
