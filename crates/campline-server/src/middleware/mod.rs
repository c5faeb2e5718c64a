//! Router middleware layers.
//!
//! Layers are exposed as small extension traits so the binary can compose
//! them explicitly; order matters and is documented at the call site.

use std::time::Duration;

use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Observability layers: HTTP request/response tracing spans.
pub trait RouterObservabilityExt {
    /// Wraps the router with a tracing layer.
    #[must_use]
    fn with_observability(self) -> Self;
}

impl RouterObservabilityExt for Router {
    fn with_observability(self) -> Self {
        self.layer(TraceLayer::new_for_http())
    }
}

/// Recovery layers: request timeouts.
pub trait RouterRecoveryExt {
    /// Terminates requests that exceed the timeout with a 408.
    #[must_use]
    fn with_timeout(self, timeout: Duration) -> Self;
}

impl RouterRecoveryExt for Router {
    fn with_timeout(self, timeout: Duration) -> Self {
        self.layer(TimeoutLayer::new(timeout))
    }
}
