//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! Route modules own their request/response payloads; authorization happens
//! inside each handler through [`AuthSession::require`], so there is exactly
//! one capability-check path for the whole API.
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler
//! [`AuthSession::require`]: crate::extract::AuthSession::require

mod accounts;
mod attendance;
mod authentication;
mod error;
mod events;
mod messages;
mod monitors;
mod notifications;
mod registrations;
mod request;
mod response;
mod rooms;

use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::request::PaginationQuery;
pub use crate::handler::response::ErrorResponse;
use crate::service::ServiceState;

#[inline]
async fn fallback() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with every route mounted.
///
/// Public routes (login, logout, check-in, health) authenticate nothing;
/// everything else extracts an [`AuthSession`] and gates on a capability.
///
/// [`AuthSession`]: crate::extract::AuthSession
pub fn routes(state: ServiceState) -> Router {
    Router::new()
        .merge(authentication::routes())
        .merge(accounts::routes())
        .merge(events::routes())
        .merge(registrations::routes())
        .merge(rooms::routes())
        .merge(attendance::routes())
        .merge(notifications::routes())
        .merge(messages::routes())
        .merge(monitors::routes())
        .fallback(fallback)
        .with_state(state)
}
