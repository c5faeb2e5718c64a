//! Account model for authentication and account lifecycle operations.
//!
//! Accounts are provisioned administratively and never hard-deleted; the only
//! observed mutations are the last-login stamp and the active flag.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::accounts;
use crate::types::AccountKind;

/// An admin or user record capable of authenticating.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Account {
    /// Unique account identifier.
    pub id: Uuid,
    /// Credential namespace (`admin` or `user`).
    pub kind: AccountKind,
    /// Primary email for authentication (unique, stored lowercased).
    pub email_address: String,
    /// Argon2id password hash in PHC string format.
    pub password_hash: String,
    /// Human-readable name for UI and communications.
    pub display_name: String,
    /// Whether the account may authenticate.
    pub is_active: bool,
    /// Role granting this account its permissions, if any.
    pub role_id: Option<Uuid>,
    /// Timestamp of the most recent successful login.
    pub last_login_at: Option<Timestamp>,
    /// Timestamp when the account was created.
    pub created_at: Timestamp,
    /// Timestamp when the account was last updated.
    pub updated_at: Timestamp,
}

/// Data for updating an account.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateAccount {
    /// Human-readable name.
    pub display_name: Option<String>,
    /// Whether the account may authenticate.
    pub is_active: Option<bool>,
    /// Role granting permissions.
    pub role_id: Option<Option<Uuid>>,
    /// Most recent successful login.
    pub last_login_at: Option<Timestamp>,
}

impl Account {
    /// Returns whether the account is allowed to authenticate.
    pub fn can_login(&self) -> bool {
        self.is_active
    }

    /// Returns whether the account has a role attached.
    pub fn has_role(&self) -> bool {
        self.role_id.is_some()
    }

    /// Returns whether the account belongs to the administrative namespace.
    pub fn is_admin_kind(&self) -> bool {
        self.kind.is_admin()
    }
}
