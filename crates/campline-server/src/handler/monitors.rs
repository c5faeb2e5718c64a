//! Health monitoring endpoint.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use campline_postgres::PgClient;
use serde::Serialize;

use crate::extract::Json;
use crate::service::{HealthCache, ServiceState};

/// Returns the router for monitoring endpoints.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/health", get(health))
}

/// Health status payload.
#[must_use]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    /// Overall status: `ok` or `unavailable`.
    status: &'static str,
}

async fn health(
    State(health_cache): State<HealthCache>,
    State(pg_client): State<PgClient>,
) -> (StatusCode, Json<HealthResponse>) {
    if health_cache.is_healthy(&pg_client).await {
        (StatusCode::OK, Json(HealthResponse { status: "ok" }))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unavailable",
            }),
        )
    }
}
