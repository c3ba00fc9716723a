use std::collections::HashSet;

use axum::http::{header, HeaderMap};
use tracing::warn;

use crate::utils::error::ApiError;

const BEARER_PREFIX: &str = "Bearer ";

/// Checks bearer credentials against the configured token set and decides
/// which paths bypass the authentication gate.
#[derive(Debug, Clone)]
pub struct BearerTokenValidator {
    tokens: HashSet<String>,
    public_paths: Vec<String>,
}

impl BearerTokenValidator {
    pub fn new(tokens: Vec<String>, public_paths: Vec<String>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
            public_paths,
        }
    }

    /// Paths served without a credential: an exact match or anything
    /// nested under a configured prefix.
    pub fn is_public(&self, path: &str) -> bool {
        self.public_paths
            .iter()
            .any(|p| path == p || path.starts_with(&format!("{}/", p)))
    }

    /// Check the `Authorization` header against the configured token set.
    pub fn validate(&self, headers: &HeaderMap) -> Result<(), ApiError> {
        let header = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header.".to_string()))?;

        let token = header
            .strip_prefix(BEARER_PREFIX)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization header.".to_string()))?;

        if !self.tokens.contains(token) {
            warn!("Rejected unknown bearer token");
            return Err(ApiError::Unauthorized(
                "Invalid or unknown token.".to_string(),
            ));
        }

        Ok(())
    }
}
