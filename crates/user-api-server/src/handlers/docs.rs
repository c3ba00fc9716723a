//! Public documentation surface: a static index of the exposed routes.

use axum::Json;
use serde_json::{json, Value};

/// GET /api-docs
pub async fn api_docs() -> Json<Value> {
    Json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "authentication": "Bearer token required for /api routes",
        "routes": {
            "GET /api/users": "List all users",
            "GET /api/users/{id}": "Fetch a single user",
            "POST /api/users": "Create a user from {name, email}",
            "PUT /api/users/{id}": "Replace a user's name and email",
            "DELETE /api/users/{id}": "Delete a user",
        },
    }))
}
