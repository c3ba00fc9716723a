//! User record and request payloads.

use serde::{Deserialize, Serialize};

/// A stored user record. `id` is assigned by the registry and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
}

/// Payload for `POST /api/users`.
///
/// Missing fields deserialize to empty strings so they fail payload
/// validation instead of being rejected by the JSON extractor.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Payload for `PUT /api/users/{id}`. Full replacement of `name` and `email`.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}
