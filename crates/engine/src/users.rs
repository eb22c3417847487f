//! In-memory user collection and credential checks.
//!
//! Raw passwords never reach the store; callers derive a bcrypt hash first
//! (see [`hash_password`]) and insert that. Usernames are compared after
//! trimming, emails after trimming and lowercasing.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::{EngineError, ResultEngine};

/// Fixed bcrypt work factor for stored password hashes.
pub const BCRYPT_COST: u32 = 10;

/// A registered account.
#[derive(Clone, Debug, PartialEq)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Owns the user collection and assigns ids.
///
/// Ids grow monotonically starting at 1 and are never reused.
#[derive(Debug, Default)]
pub struct UserStore {
    users: HashMap<u64, User>,
    next_id: u64,
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            users: HashMap::new(),
            next_id: 1,
        }
    }

    /// Inserts a new user with an already-derived password hash.
    ///
    /// `username` and `email` must already be normalized (see
    /// [`normalize_username`] and [`normalize_email`]). Fails when either
    /// field collides with an existing record.
    pub fn insert(
        &mut self,
        username: String,
        email: String,
        password_hash: String,
    ) -> ResultEngine<User> {
        if self.contains_identity(&username, &email) {
            return Err(EngineError::DuplicateIdentity);
        }

        let now = Utc::now();
        let user = User {
            id: self.next_id,
            username,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        };
        self.next_id += 1;
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    /// Returns `true` when a record matches the normalized username or email.
    pub fn contains_identity(&self, username: &str, email: &str) -> bool {
        self.users
            .values()
            .any(|user| user.username == username || user.email == email)
    }

    /// Looks up a user by email, normalizing the input first.
    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        let email = normalize_email(email);
        self.users.values().find(|user| user.email == email)
    }

    pub fn find_by_id(&self, id: u64) -> Option<&User> {
        self.users.get(&id)
    }
}

/// Canonical username form: surrounding whitespace stripped.
pub fn normalize_username(username: &str) -> &str {
    username.trim()
}

/// Canonical email form: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Derives the stored hash for a raw password.
///
/// Runs a full bcrypt round at [`BCRYPT_COST`]; call it from a blocking
/// context, not from the async executor.
pub fn hash_password(raw: &str) -> ResultEngine<String> {
    Ok(bcrypt::hash(raw, BCRYPT_COST)?)
}

/// Checks a raw password against a stored hash. Blocking, like
/// [`hash_password`].
pub fn verify_password(raw: &str, hash: &str) -> ResultEngine<bool> {
    Ok(bcrypt::verify(raw, hash)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_user() -> UserStore {
        let mut store = UserStore::new();
        store
            .insert(
                "alice".to_string(),
                "alice@example.com".to_string(),
                "$hash".to_string(),
            )
            .unwrap();
        store
    }

    #[test]
    fn insert_assigns_increasing_ids() {
        let mut store = store_with_user();
        let bob = store
            .insert(
                "bob".to_string(),
                "bob@example.com".to_string(),
                "$hash".to_string(),
            )
            .unwrap();
        assert_eq!(bob.id, 2);
    }

    #[test]
    fn duplicate_username_is_rejected() {
        let mut store = store_with_user();
        let err = store
            .insert(
                "alice".to_string(),
                "other@example.com".to_string(),
                "$hash".to_string(),
            )
            .unwrap_err();
        assert_eq!(err, EngineError::DuplicateIdentity);
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let mut store = store_with_user();
        let err = store
            .insert(
                "someone-else".to_string(),
                "alice@example.com".to_string(),
                "$hash".to_string(),
            )
            .unwrap_err();
        assert_eq!(err, EngineError::DuplicateIdentity);
    }

    #[test]
    fn email_lookup_normalizes() {
        let store = store_with_user();
        assert!(store.find_by_email("  Alice@Example.COM ").is_some());
        assert!(store.find_by_email("missing@example.com").is_none());
    }

    #[test]
    fn password_roundtrip() {
        let hash = hash_password("hunter2").unwrap();
        assert_ne!(hash, "hunter2");
        assert!(verify_password("hunter2", &hash).unwrap());
        assert!(!verify_password("hunter3", &hash).unwrap());
    }
}
