//! High-level database client over a deadpool connection pool.

use std::sync::Arc;
use std::time::Duration;

use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::deadpool::Pool;
use diesel_migrations::MigrationHarness;

use crate::{
    ConnectionPool, MIGRATIONS, PgConfig, PgConn, PgConnection, PgError, PgResult,
    TRACING_TARGET_CONNECTION, TRACING_TARGET_MIGRATION,
};

/// Connection pool status information.
#[derive(Debug, Clone)]
pub struct PgPoolStatus {
    /// Maximum number of connections in the pool
    pub max_size: usize,
    /// Current number of connections in the pool
    pub size: usize,
    /// Number of available connections
    pub available: usize,
    /// Number of requests waiting for connections
    pub waiting: usize,
}

impl PgPoolStatus {
    /// Returns the utilization percentage of the pool (0.0 to 1.0).
    #[inline]
    pub fn utilization(&self) -> f64 {
        if self.max_size == 0 {
            0.0
        } else {
            (self.size - self.available) as f64 / self.max_size as f64
        }
    }

    /// Returns whether the pool is under pressure (high utilization or waiting requests).
    #[inline]
    pub fn is_under_pressure(&self) -> bool {
        self.waiting > 0 || self.utilization() > 0.8
    }
}

/// High-level database client that manages connections and migrations.
///
/// This struct provides the main interface for database operations,
/// encapsulating connection pool management, configuration, and migration
/// handling. Cloning is cheap and all clones share the same pool.
#[derive(Clone)]
pub struct PgClient {
    inner: Arc<PgClientInner>,
}

/// Inner data for PgClient
struct PgClientInner {
    pool: ConnectionPool,
    config: PgConfig,
}

impl PgClient {
    /// Creates a new database client with the provided configuration.
    ///
    /// This will establish a connection pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool configuration is invalid.
    #[tracing::instrument(
        skip(config),
        target = TRACING_TARGET_CONNECTION,
        fields(database_url = %config.database_url_masked())
    )]
    pub fn new(config: PgConfig) -> PgResult<Self> {
        tracing::info!(target: TRACING_TARGET_CONNECTION, "Initializing database client");

        let manager =
            AsyncDieselConnectionManager::<PgConnection>::new(config.postgres_url.clone());

        let pool = Pool::builder(manager)
            .max_size(config.postgres_max_connections as usize)
            .wait_timeout(Some(config.connection_timeout()))
            .create_timeout(Some(config.connection_timeout()))
            .recycle_timeout(Some(config.idle_timeout()))
            .runtime(deadpool::Runtime::Tokio1)
            .build()
            .map_err(|e| {
                tracing::error!(
                    target: TRACING_TARGET_CONNECTION,
                    error = %e,
                    "Failed to create connection pool"
                );
                PgError::Unexpected(format!("Failed to build connection pool: {}", e).into())
            })?;

        Ok(Self {
            inner: Arc::new(PgClientInner { pool, config }),
        })
    }

    /// Gets a connection from the pool.
    ///
    /// Returns a [`PgConn`] that dereferences to the raw connection, so all
    /// repository traits are callable on it. This method will wait up to the
    /// configured timeout for an available connection.
    ///
    /// # Errors
    ///
    /// Returns an error if no connection is available within the timeout period.
    #[tracing::instrument(skip(self), target = TRACING_TARGET_CONNECTION)]
    pub async fn get_connection(&self) -> PgResult<PgConn> {
        let start = std::time::Instant::now();
        let conn = self.inner.pool.get().await.map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET_CONNECTION,
                error = %e,
                elapsed = ?start.elapsed(),
                "Failed to acquire connection from pool"
            );
            PgError::from(e)
        })?;

        let elapsed = start.elapsed();
        if elapsed > Duration::from_millis(100) {
            tracing::warn!(
                target: TRACING_TARGET_CONNECTION,
                elapsed = ?elapsed,
                "Connection acquisition took longer than expected"
            );
        }

        Ok(conn)
    }

    /// Applies all pending migrations embedded in this crate.
    ///
    /// Runs on a dedicated blocking thread because the migration harness is
    /// synchronous.
    ///
    /// # Errors
    ///
    /// Returns an error if a migration fails to apply or the dedicated
    /// connection cannot be established.
    pub async fn run_pending_migrations(&self) -> PgResult<()> {
        let database_url = self.inner.config.postgres_url.clone();

        let applied = tokio::task::spawn_blocking(move || {
            use diesel::Connection;

            let mut conn =
                AsyncConnectionWrapper::<PgConnection>::establish(&database_url)
                    .map_err(PgError::from)?;

            conn.run_pending_migrations(MIGRATIONS)
                .map(|versions| versions.len())
                .map_err(PgError::Migration)
        })
        .await
        .map_err(|e| PgError::Unexpected(format!("Migration task panicked: {e}").into()))??;

        tracing::info!(
            target: TRACING_TARGET_MIGRATION,
            applied_migrations = applied,
            "Database migrations are up to date"
        );

        Ok(())
    }

    /// Returns the current status of the connection pool.
    #[must_use]
    pub fn pool_status(&self) -> PgPoolStatus {
        let status = self.inner.pool.status();
        PgPoolStatus {
            max_size: status.max_size,
            size: status.size,
            available: status.available,
            waiting: status.waiting,
        }
    }

    /// Returns the client configuration.
    #[must_use]
    pub fn config(&self) -> &PgConfig {
        &self.inner.config
    }
}

impl std::fmt::Debug for PgClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgClient")
            .field("database_url", &self.inner.config.database_url_masked())
            .field("max_connections", &self.inner.config.postgres_max_connections)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_status_utilization() {
        let status = PgPoolStatus {
            max_size: 10,
            size: 8,
            available: 3,
            waiting: 0,
        };
        assert!((status.utilization() - 0.5).abs() < f64::EPSILON);
        assert!(!status.is_under_pressure());
    }

    #[test]
    fn pool_status_pressure_on_waiters() {
        let status = PgPoolStatus {
            max_size: 10,
            size: 10,
            available: 0,
            waiting: 2,
        };
        assert!(status.is_under_pressure());
    }

    #[test]
    fn empty_pool_has_zero_utilization() {
        let status = PgPoolStatus {
            max_size: 0,
            size: 0,
            available: 0,
            waiting: 0,
        };
        assert_eq!(status.utilization(), 0.0);
    }
}
