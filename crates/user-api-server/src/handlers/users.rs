//! User CRUD handlers: the dispatch stage of the request pipeline.

use std::sync::Arc;

use axum::{
    extract::Path,
    http::{header, HeaderName, StatusCode},
    Extension, Json,
};

use crate::models::{CreateUserRequest, UpdateUserRequest, User};
use crate::registry::UserRegistry;
use crate::utils::error::ApiError;

/// GET /api/users
pub async fn list_users(Extension(registry): Extension<Arc<UserRegistry>>) -> Json<Vec<User>> {
    Json(registry.list())
}

/// GET /api/users/{id}
pub async fn get_user(
    Extension(registry): Extension<Arc<UserRegistry>>,
    Path(id): Path<u64>,
) -> Result<Json<User>, ApiError> {
    let user = registry.get(id)?;
    Ok(Json(user))
}

/// POST /api/users
pub async fn create_user(
    Extension(registry): Extension<Arc<UserRegistry>>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<User>), ApiError> {
    let user = registry.create(&payload.name, &payload.email)?;
    let location = format!("/api/users/{}", user.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(user),
    ))
}

/// PUT /api/users/{id}
pub async fn update_user(
    Extension(registry): Extension<Arc<UserRegistry>>,
    Path(id): Path<u64>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    let user = registry.update(id, &payload.name, &payload.email)?;
    Ok(Json(user))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    Extension(registry): Extension<Arc<UserRegistry>>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    registry.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
