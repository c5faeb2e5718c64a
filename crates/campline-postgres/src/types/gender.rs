//! Gender enumeration used for registrants and room restrictions.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Gender of a registrant, also used as a room occupancy restriction.
///
/// Corresponds to the `GENDER` PostgreSQL enum. Room allocation only places a
/// registrant into a room whose gender matches theirs.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::Gender"]
pub enum Gender {
    #[db_rename = "female"]
    #[serde(rename = "female")]
    #[strum(serialize = "female")]
    Female,

    #[db_rename = "male"]
    #[serde(rename = "male")]
    #[strum(serialize = "male")]
    Male,
}
