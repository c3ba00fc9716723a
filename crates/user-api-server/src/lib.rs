pub mod config;
pub mod handlers;
pub mod models;
pub mod registry;
pub mod security;
pub mod utils;
pub mod validation;

#[cfg(test)]
mod test;

use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Router};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use registry::UserRegistry;
use security::BearerTokenValidator;

/// Compose the full service: all routes wrapped by the request pipeline.
pub fn build_router(
    registry: Arc<UserRegistry>,
    validator: Arc<BearerTokenValidator>,
) -> Router {
    let routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/health/ready", get(handlers::health::readiness_check))
        .route("/api-docs", get(handlers::docs::api_docs))
        .route(
            "/api/users",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route(
            "/api/users/{id}",
            get(handlers::users::get_user)
                .put(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        );

    with_request_pipeline(routes, registry, validator)
}

/// Wrap routes in the ordered middleware chain. Outermost to innermost:
/// error boundary, authentication gate, access logger, dispatch.
pub fn with_request_pipeline(
    routes: Router,
    registry: Arc<UserRegistry>,
    validator: Arc<BearerTokenValidator>,
) -> Router {
    // Layers apply bottom-up: the last one added runs first.
    routes
        .layer(middleware::from_fn(
            security::middleware::access_log_middleware,
        ))
        .layer(middleware::from_fn(security::middleware::auth_middleware))
        .layer(Extension(registry))
        .layer(Extension(validator))
        .layer(CatchPanicLayer::custom(utils::error::handle_panic))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
