use std::collections::HashMap;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::debug;

use super::ids::IdGenerator;
use crate::models::User;
use crate::validation::validate_user_payload;

/// Expected registry outcomes. Anything else escaping the registry is a
/// fault for the pipeline's error boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("User not found: {0}")]
    UserNotFound(u64),

    #[error("Email already in use: {0}")]
    EmailAlreadyExists(String),

    #[error("{0}")]
    ValidationError(String),
}

/// In-memory user registry.
///
/// Sole owner of the backing map and the id counter; callers only ever
/// receive clones of stored records. Every check-then-write (uniqueness
/// scan plus insert or replace) runs under one write guard, so racing
/// mutations serialize and at most one create per email can win.
pub struct UserRegistry {
    users: RwLock<HashMap<u64, User>>,
    ids: IdGenerator,
    enforce_unique_email: bool,
}

impl UserRegistry {
    /// Registry with email uniqueness enforced (the strict default).
    pub fn new() -> Self {
        Self::with_unique_email(true)
    }

    pub fn with_unique_email(enforce_unique_email: bool) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            ids: IdGenerator::new(),
            enforce_unique_email,
        }
    }

    /// Snapshot of all records, ordered by id.
    pub fn list(&self) -> Vec<User> {
        let users = self.users.read();
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_unstable_by_key(|u| u.id);
        all
    }

    pub fn get(&self, id: u64) -> Result<User, RegistryError> {
        self.users
            .read()
            .get(&id)
            .cloned()
            .ok_or(RegistryError::UserNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }

    /// Validate, check uniqueness and insert under one write guard.
    ///
    /// The id is drawn only after the uniqueness scan passes, so a
    /// rejected create consumes no identifier.
    pub fn create(&self, name: &str, email: &str) -> Result<User, RegistryError> {
        validate_user_payload(name, email)?;
        let name = name.trim();
        let email = email.trim();

        let mut users = self.users.write();
        if self.enforce_unique_email {
            if let Some(existing) = find_by_email(&users, email, None) {
                return Err(RegistryError::EmailAlreadyExists(existing.email.clone()));
            }
        }

        let user = User {
            id: self.ids.next_id(),
            name: name.to_string(),
            email: email.to_string(),
        };
        users.insert(user.id, user.clone());
        debug!("Created user {} ({})", user.id, user.email);
        Ok(user)
    }

    /// Replace `name` and `email` of an existing record, keeping its id.
    /// The record's own stored email never counts as a conflict.
    pub fn update(&self, id: u64, name: &str, email: &str) -> Result<User, RegistryError> {
        validate_user_payload(name, email)?;
        let name = name.trim();
        let email = email.trim();

        let mut users = self.users.write();
        if !users.contains_key(&id) {
            return Err(RegistryError::UserNotFound(id));
        }
        if self.enforce_unique_email {
            if let Some(existing) = find_by_email(&users, email, Some(id)) {
                return Err(RegistryError::EmailAlreadyExists(existing.email.clone()));
            }
        }

        let user = users.get_mut(&id).ok_or(RegistryError::UserNotFound(id))?;
        user.name = name.to_string();
        user.email = email.to_string();
        let updated = user.clone();
        debug!("Updated user {} ({})", updated.id, updated.email);
        Ok(updated)
    }

    /// Remove a record. The id counter is untouched, so ids are never reused.
    pub fn delete(&self, id: u64) -> Result<(), RegistryError> {
        let mut users = self.users.write();
        match users.remove(&id) {
            Some(user) => {
                debug!("Deleted user {} ({})", user.id, user.email);
                Ok(())
            }
            None => Err(RegistryError::UserNotFound(id)),
        }
    }
}

impl Default for UserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Case-insensitive scan over stored emails. `exclude` skips the record
/// being updated so a self-match is not a conflict.
fn find_by_email<'a>(
    users: &'a HashMap<u64, User>,
    email: &str,
    exclude: Option<u64>,
) -> Option<&'a User> {
    let needle = email.to_lowercase();
    users
        .values()
        .filter(|u| exclude != Some(u.id))
        .find(|u| u.email.to_lowercase() == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_create_assigns_sequential_ids() {
        let reg = UserRegistry::new();
        let a = reg.create("Ada", "ada@example.com").unwrap();
        let b = reg.create("Grace", "grace@example.com").unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[test]
    fn test_create_trims_fields() {
        let reg = UserRegistry::new();
        let user = reg.create("  Ada  ", " ada@example.com ").unwrap();
        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@example.com");
    }

    #[test]
    fn test_duplicate_email_is_rejected_case_insensitively() {
        let reg = UserRegistry::new();
        reg.create("Ada", "ada@example.com").unwrap();
        let err = reg.create("Grace", "ADA@EXAMPLE.COM").unwrap_err();
        assert!(matches!(err, RegistryError::EmailAlreadyExists(_)));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_uniqueness_policy_can_be_disabled() {
        let reg = UserRegistry::with_unique_email(false);
        reg.create("Ada", "ada@example.com").unwrap();
        reg.create("Grace", "ADA@EXAMPLE.COM").unwrap();
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_get_is_idempotent() {
        let reg = UserRegistry::new();
        let user = reg.create("Ada", "ada@example.com").unwrap();
        assert_eq!(reg.get(user.id).unwrap(), reg.get(user.id).unwrap());
    }

    #[test]
    fn test_get_missing_user() {
        let reg = UserRegistry::new();
        assert_eq!(reg.get(42), Err(RegistryError::UserNotFound(42)));
    }

    #[test]
    fn test_update_replaces_fields_and_keeps_id() {
        let reg = UserRegistry::new();
        let user = reg.create("Ada", "ada@example.com").unwrap();
        let updated = reg
            .update(user.id, "Ada Lovelace", "lovelace@example.com")
            .unwrap();
        assert_eq!(updated.id, user.id);
        assert_eq!(updated.name, "Ada Lovelace");
        assert_eq!(reg.get(user.id).unwrap(), updated);
    }

    #[test]
    fn test_update_missing_user() {
        let reg = UserRegistry::new();
        let err = reg.update(42, "Ada", "ada@example.com").unwrap_err();
        assert_eq!(err, RegistryError::UserNotFound(42));
    }

    #[test]
    fn test_update_validates_payload_before_lookup() {
        let reg = UserRegistry::new();
        let err = reg.update(42, "", "ada@example.com").unwrap_err();
        assert!(matches!(err, RegistryError::ValidationError(_)));
    }

    #[test]
    fn test_update_allows_keeping_own_email() {
        let reg = UserRegistry::new();
        let user = reg.create("Ada", "ada@example.com").unwrap();
        let updated = reg.update(user.id, "Ada L", "ADA@example.com").unwrap();
        assert_eq!(updated.email, "ADA@example.com");
    }

    #[test]
    fn test_update_rejects_email_of_another_user() {
        let reg = UserRegistry::new();
        reg.create("Ada", "ada@example.com").unwrap();
        let other = reg.create("Grace", "grace@example.com").unwrap();
        let err = reg
            .update(other.id, "Grace", "Ada@Example.Com")
            .unwrap_err();
        assert!(matches!(err, RegistryError::EmailAlreadyExists(_)));
        assert_eq!(reg.get(other.id).unwrap().email, "grace@example.com");
    }

    #[test]
    fn test_delete_then_get_returns_not_found() {
        let reg = UserRegistry::new();
        let user = reg.create("Ada", "ada@example.com").unwrap();
        reg.delete(user.id).unwrap();
        assert_eq!(reg.get(user.id), Err(RegistryError::UserNotFound(user.id)));
        assert_eq!(reg.delete(user.id), Err(RegistryError::UserNotFound(user.id)));
    }

    #[test]
    fn test_deleted_ids_are_never_reused() {
        let reg = UserRegistry::new();
        let first = reg.create("A", "a@x.com").unwrap();
        assert_eq!(first.id, 1);
        assert!(reg.create("B", "A@X.COM").is_err());
        assert_eq!(reg.get(1).unwrap().name, "A");
        reg.delete(1).unwrap();
        assert_eq!(reg.get(1), Err(RegistryError::UserNotFound(1)));
        let next = reg.create("C", "c@x.com").unwrap();
        assert_eq!(next.id, 2);
    }

    #[test]
    fn test_list_is_sorted_by_id() {
        let reg = UserRegistry::new();
        for i in 0..5 {
            reg.create(&format!("user-{}", i), &format!("user-{}@example.com", i))
                .unwrap();
        }
        let ids: Vec<u64> = reg.list().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_concurrent_creates_produce_distinct_ids() {
        let reg = Arc::new(UserRegistry::new());
        let mut handles = Vec::new();

        for t in 0..8 {
            let reg = reg.clone();
            handles.push(std::thread::spawn(move || {
                for i in 0..50 {
                    reg.create(
                        &format!("user-{}-{}", t, i),
                        &format!("user-{}-{}@example.com", t, i),
                    )
                    .unwrap();
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }

        let all = reg.list();
        assert_eq!(all.len(), 400);
        let mut ids: Vec<u64> = all.iter().map(|u| u.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 400, "ids must be pairwise distinct");
    }

    #[test]
    fn test_concurrent_same_email_creates_admit_one_winner() {
        let reg = Arc::new(UserRegistry::new());
        let mut handles = Vec::new();

        for t in 0..8 {
            let reg = reg.clone();
            handles.push(std::thread::spawn(move || {
                reg.create(&format!("racer-{}", t), "shared@example.com")
                    .is_ok()
            }));
        }

        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(wins, 1, "exactly one racing create may win");
        assert_eq!(reg.len(), 1);
    }
}
