//! Application state and dependency injection.

use campline_postgres::PgClient;

use crate::service::{
    HealthCache, OccupancyCache, PasswordHasher, Result, RosterCache, ServiceConfig, SessionKeys,
    TtlCache,
};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection). Created once at
/// process start; the caches it carries live for the life of the process and
/// are invalidated by mutating routes.
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    pg_client: PgClient,

    password_hasher: PasswordHasher,
    session_keys: SessionKeys,
    roster_cache: RosterCache,
    occupancy_cache: OccupancyCache,
    health_cache: HealthCache,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Connects to the database, applies migrations and builds the security
    /// services and caches.
    pub async fn from_config(config: &ServiceConfig) -> Result<Self> {
        let service_state = Self {
            pg_client: config.connect_postgres().await?,

            password_hasher: config.password_hasher(),
            session_keys: config.session_keys(),
            roster_cache: TtlCache::new(config.cache_ttl()),
            occupancy_cache: TtlCache::new(config.cache_ttl()),
            health_cache: HealthCache::new(),
        };

        Ok(service_state)
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+ $(,)?) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(pg_client: PgClient);

impl_di!(password_hasher: PasswordHasher);
impl_di!(session_keys: SessionKeys);
impl_di!(roster_cache: RosterCache);
impl_di!(occupancy_cache: OccupancyCache);
impl_di!(health_cache: HealthCache);
