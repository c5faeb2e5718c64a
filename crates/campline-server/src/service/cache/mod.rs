//! Process-wide caches with explicit lifecycles.
//!
//! All caches are created once in [`ServiceState`] and invalidated by the
//! mutating routes that touch the cached domain.
//!
//! [`ServiceState`]: crate::service::ServiceState

mod health;
mod ttl_cache;

use campline_postgres::model::Registration;
use campline_postgres::query::RoomOccupancy;
pub use health::HealthCache;
pub use ttl_cache::TtlCache;
use uuid::Uuid;

/// Per-event registration roster cache.
pub type RosterCache = TtlCache<Uuid, Vec<Registration>>;

/// Per-event room occupancy cache.
pub type OccupancyCache = TtlCache<Uuid, Vec<RoomOccupancy>>;
