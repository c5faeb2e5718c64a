//! Request extractors for handlers.

mod auth;
mod pg_connection;
mod reject;

pub use auth::{
    AuthSession, Capability, PermissionSet, SESSION_COOKIE_NAME, SessionClaims, removal_cookie,
    session_cookie,
};
pub use pg_connection::Db;
pub use reject::{Json, ValidateJson};
