use axum::{http::StatusCode, Json};
use serde::Serialize;

/// Liveness payload for the public health surface.
#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// The store is in-process memory, so readiness has nothing further to probe.
pub async fn readiness_check() -> StatusCode {
    StatusCode::OK
}
