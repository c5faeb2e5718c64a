//! Conversion from data-layer errors to HTTP errors.
//!
//! Unexpected database failures are logged here and surfaced as a generic 500
//! without leaking internal detail to the client.

use campline_postgres::PgError;
use campline_postgres::error::DieselError;

use super::{Error, ErrorKind};

/// Tracing target for database error conversion.
const TRACING_TARGET: &str = "campline_server::handler::pg_error";

impl From<PgError> for Error<'static> {
    fn from(error: PgError) -> Self {
        if error.is_unique_violation() {
            let constraint = error.constraint().unwrap_or("unknown").to_owned();
            tracing::debug!(
                target: TRACING_TARGET,
                constraint = %constraint,
                "unique constraint violation"
            );

            return ErrorKind::Conflict
                .with_message("A record with these values already exists")
                .with_context(format!("Constraint: {constraint}"));
        }

        if matches!(error, PgError::Query(DieselError::NotFound)) {
            return ErrorKind::NotFound.into_error();
        }

        tracing::error!(
            target: TRACING_TARGET,
            error = %error,
            transient = error.is_transient(),
            "database operation failed"
        );

        ErrorKind::InternalServerError
            .with_message("A database error occurred")
            .into_static()
    }
}
