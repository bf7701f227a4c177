//! Health check endpoint handlers.

use axum::Json;
use serde::Serialize;

/// Simple status response for the liveness check.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// Liveness check endpoint.
///
/// GET /health/live
pub async fn live() -> Json<StatusResponse> {
    Json(StatusResponse { status: "ok" })
}
