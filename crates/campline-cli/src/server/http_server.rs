//! HTTP server startup and lifecycle management.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

use super::{Result, ServerError, TRACING_TARGET_SHUTDOWN, TRACING_TARGET_STARTUP};
use crate::config::ServerConfig;
use crate::server::shutdown_signal;

/// Starts an HTTP server with graceful shutdown.
///
/// This function validates the configuration, binds to the specified address,
/// and starts serving requests with support for graceful shutdown.
///
/// # Errors
///
/// Returns an error if:
/// - Server configuration is invalid
/// - Cannot bind to the specified address/port
/// - Server encounters a fatal error during operation
pub async fn serve_http(app: Router, server_config: ServerConfig) -> Result<()> {
    // Validate configuration before starting
    if let Err(validation_error) = server_config.validate() {
        tracing::error!(
            target: TRACING_TARGET_STARTUP,
            error = validation_error.to_string(),
            "Invalid server configuration"
        );

        return Err(ServerError::InvalidConfig(validation_error.to_string()));
    }

    let server_addr = server_config.server_addr();

    // Bind to the address with error handling
    let listener = match TcpListener::bind(server_addr).await {
        Ok(listener) => {
            tracing::info!(
                target: TRACING_TARGET_STARTUP,
                addr = server_addr.to_string(),
                "Successfully bound to address"
            );

            listener
        }
        Err(listener_err) => {
            tracing::error!(
                target: TRACING_TARGET_STARTUP,
                addr = server_addr.to_string(),
                error = listener_err.to_string(),
                "Failed to bind to address"
            );

            return Err(ServerError::BindError {
                address: server_addr.to_string(),
                source: listener_err,
            });
        }
    };

    tracing::info!(
        target: TRACING_TARGET_STARTUP,
        addr = %server_addr,
        "Server is ready and listening for connections"
    );

    if server_config.binds_to_all_interfaces() {
        tracing::warn!(
            target: TRACING_TARGET_STARTUP,
            "Server is bound to all interfaces. Ensure firewall rules are properly configured."
        );
    }

    let shutdown = shutdown_signal(server_config.shutdown_timeout());
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await
    .map_err(|err| {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %err,
            "Server encountered an error"
        );
        ServerError::Runtime(err)
    })?;

    tracing::info!(target: TRACING_TARGET_SHUTDOWN, "Server shut down gracefully");
    Ok(())
}
