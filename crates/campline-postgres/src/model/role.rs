//! Role and permission models. Both are static reference data seeded by
//! migrations.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::{permissions, roles};

/// Named bundle of permissions assigned to an account.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = roles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Role {
    /// Unique role identifier.
    pub id: Uuid,
    /// Unique role name (e.g. "coordinator").
    pub name: String,
    /// System roles cannot be edited or removed by operators.
    pub is_system: bool,
    /// Timestamp when the role was created.
    pub created_at: Timestamp,
}

/// Atomic named capability (e.g. `registrations.read`).
///
/// Names are dot-separated `resource.action` pairs; this is the single
/// authoritative spelling.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = permissions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Permission {
    /// Unique permission identifier.
    pub id: Uuid,
    /// Unique dot-separated capability name.
    pub name: String,
    /// Resource the capability applies to.
    pub resource: String,
    /// Action the capability allows.
    pub action: String,
}
