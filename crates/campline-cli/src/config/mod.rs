//! Command-line and environment configuration.

mod server;
mod service;

use clap::Parser;
pub use server::{ServerConfig, log_server_config};
pub use service::ServiceArgs;

/// Command-line arguments for the campline server.
#[derive(Debug, Parser)]
#[command(name = "campline", version, about = "Campline registration server")]
pub struct Cli {
    /// HTTP server configuration.
    #[command(flatten)]
    pub server: ServerConfig,

    /// Application service configuration.
    #[command(flatten)]
    pub service: ServiceArgs,
}
