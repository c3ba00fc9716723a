//! Stateless payload validation.

use crate::registry::RegistryError;

/// Check that `name` and `email` are non-empty after trimming.
///
/// Pure function: no shared state, no side effects.
pub fn validate_user_payload(name: &str, email: &str) -> Result<(), RegistryError> {
    if name.trim().is_empty() {
        return Err(RegistryError::ValidationError(
            "Name must not be empty.".to_string(),
        ));
    }
    if email.trim().is_empty() {
        return Err(RegistryError::ValidationError(
            "Email must not be empty.".to_string(),
        ));
    }
    Ok(())
}
