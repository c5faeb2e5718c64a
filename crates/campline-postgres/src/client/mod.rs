//! Database client, configuration and connection pooling.

mod pg_client;
mod pg_config;

pub use pg_client::{PgClient, PgPoolStatus};
pub use pg_config::PgConfig;

/// Connection pool type used by the [`PgClient`].
pub type ConnectionPool = diesel_async::pooled_connection::deadpool::Pool<crate::PgConnection>;

/// A pooled database connection.
///
/// Dereferences to [`PgConnection`], so all repository traits implemented on
/// the raw connection are callable on it directly.
///
/// [`PgConnection`]: crate::PgConnection
pub type PgConn = diesel_async::pooled_connection::deadpool::Object<crate::PgConnection>;
