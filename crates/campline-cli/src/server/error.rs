//! Server lifecycle error types.

use std::io;

/// Errors raised while starting or running the HTTP server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Server configuration failed validation.
    #[error("invalid server configuration: {0}")]
    InvalidConfig(String),

    /// The listener could not bind to the requested address.
    #[error("failed to bind to {address}: {source}")]
    BindError {
        /// Address the bind was attempted on.
        address: String,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The server terminated with a runtime I/O error.
    #[error("server runtime error: {0}")]
    Runtime(#[from] io::Error),
}

/// Specialized [`Result`] type for server lifecycle operations.
pub type Result<T, E = ServerError> = std::result::Result<T, E>;
