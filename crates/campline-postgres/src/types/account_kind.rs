//! Account kind enumeration separating staff admins from regular users.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Namespace an authenticating account belongs to.
///
/// This corresponds to the `ACCOUNT_KIND` PostgreSQL enum and to the `type`
/// claim carried by session tokens. The kind only selects which credential
/// namespace a token refers to; it grants no permissions by itself.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::AccountKind"]
pub enum AccountKind {
    /// Administrative staff account.
    #[db_rename = "admin"]
    #[serde(rename = "admin")]
    #[strum(serialize = "admin")]
    Admin,

    /// Regular user account.
    #[db_rename = "user"]
    #[serde(rename = "user")]
    #[strum(serialize = "user")]
    #[default]
    User,
}

impl AccountKind {
    /// Returns whether this is the administrative namespace.
    #[inline]
    pub const fn is_admin(self) -> bool {
        matches!(self, AccountKind::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_wire_names() {
        assert_eq!(serde_json::to_string(&AccountKind::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&AccountKind::User).unwrap(), "\"user\"");
    }

    #[test]
    fn round_trips_through_serde() {
        let kind: AccountKind = serde_json::from_str("\"admin\"").unwrap();
        assert!(kind.is_admin());
    }
}
