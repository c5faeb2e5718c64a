//! Authentication and authorization extractors.
//!
//! The flow has three pieces, used in order by every authenticated request:
//!
//! 1. [`SessionClaims`] — the stateless token codec (HS256 over a shared
//!    secret). Verification fails closed.
//! 2. [`AuthSession`] — the request authenticator: cookie, codec, then an
//!    eager account/role/permission load against current database state.
//! 3. [`Capability`] / [`PermissionSet`] — the single permission gate every
//!    handler calls via [`AuthSession::require`].

mod auth_session;
mod capability;
mod session_claims;
mod session_cookie;

pub use auth_session::AuthSession;
pub use capability::{Capability, PermissionSet};
pub use session_claims::SessionClaims;
pub use session_cookie::{SESSION_COOKIE_NAME, removal_cookie, session_cookie};

/// Tracing target for authentication operations.
pub(crate) const TRACING_TARGET_AUTHENTICATION: &str = "campline_server::authentication";

/// Tracing target for authorization operations.
pub(crate) const TRACING_TARGET_AUTHORIZATION: &str = "campline_server::authorization";
