use std::sync::Arc;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{debug, info};

use crate::security::BearerTokenValidator;
use crate::utils::error::ApiError;

/// Authentication gate.
///
/// Public paths bypass the check entirely; everything else needs a bearer
/// credential from the configured set or the request short-circuits with
/// 401 before reaching the registry.
pub async fn auth_middleware(request: Request, next: Next) -> Result<Response, ApiError> {
    let validator = request
        .extensions()
        .get::<Arc<BearerTokenValidator>>()
        .ok_or_else(|| ApiError::InternalError("Token validator not configured".to_string()))?
        .clone();

    let path = request.uri().path();
    if validator.is_public(path) {
        debug!("Public path {}, skipping auth", path);
        return Ok(next.run(request).await);
    }

    validator.validate(request.headers())?;
    Ok(next.run(request).await)
}

/// Access logger. Records method and path, delegates, then records the
/// resulting status and returns the response unchanged.
pub async fn access_log_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    info!("{} {}", method, path);

    let response = next.run(request).await;

    info!("{} {} {}", method, path, response.status().as_u16());
    response
}
