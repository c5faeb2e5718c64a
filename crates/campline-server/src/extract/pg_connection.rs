//! PostgreSQL connection extractor for request handlers.
//!
//! This module provides the [`Db`] extractor that acquires a database
//! connection from the pool for use in request handlers.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use campline_postgres::{PgClient, PgConn};
use derive_more::{Deref, DerefMut};

use crate::handler::{Error, ErrorKind};

/// Extractor that provides a database connection from the pool.
///
/// The wrapped [`PgConn`] dereferences to the raw connection, so all
/// repository traits are callable on it.
///
/// # Example
///
/// ```rust,ignore
/// use campline_server::extract::Db;
///
/// async fn list_events(Db(mut conn): Db) {
///     // Use conn with repository traits
/// }
/// ```
#[derive(Deref, DerefMut)]
pub struct Db(pub PgConn);

impl<S> FromRequestParts<S> for Db
where
    PgClient: FromRef<S>,
    S: Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pg_client = PgClient::from_ref(state);
        let conn = pg_client.get_connection().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to acquire database connection");
            ErrorKind::InternalServerError
                .with_message("Database connection unavailable")
                .into_static()
        })?;

        Ok(Db(conn))
    }
}
