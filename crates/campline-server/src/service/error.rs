//! Service-level error type for startup and wiring failures.

use campline_postgres::PgError;

/// Errors raised while building or connecting application services.
#[derive(Debug, thiserror::Error)]
#[must_use = "service errors should be handled appropriately"]
pub enum ServiceError {
    /// Invalid or incomplete configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or migration failure.
    #[error("database error: {0}")]
    Database(#[from] PgError),
}

impl ServiceError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Specialized [`Result`] type for service operations.
pub type Result<T, E = ServiceError> = std::result::Result<T, E>;
