//! HTTP server lifecycle: startup, serving and graceful shutdown.

mod error;
mod http_server;
mod shutdown;

pub use error::{Result, ServerError};
pub use http_server::serve_http;
pub use shutdown::shutdown_signal;

/// Tracing target for server startup operations.
pub(crate) const TRACING_TARGET_STARTUP: &str = "campline_cli::server::startup";

/// Tracing target for server shutdown operations.
pub(crate) const TRACING_TARGET_SHUTDOWN: &str = "campline_cli::server::shutdown";
