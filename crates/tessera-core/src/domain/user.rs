//! User entity.

use crate::UserId;
use serde::{Deserialize, Serialize};

/// User record owned by the persistent store.
///
/// `id` is `None` until the record has been saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier.
    pub id: Option<UserId>,

    /// Display name.
    pub name: String,

    /// E-mail address.
    pub email: String,
}

impl User {
    /// Creates an unsaved user.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
        }
    }

    /// Returns a copy of this user carrying the given id.
    #[must_use]
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    /// Returns true if the user has been persisted.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_unsaved() {
        let user = User::new("Alice", "alice@example.com");
        assert!(user.id.is_none());
        assert!(!user.is_persisted());
        assert_eq!(user.name, "Alice");
        assert_eq!(user.email, "alice@example.com");
    }

    #[test]
    fn test_with_id() {
        let user = User::new("Bob", "bob@example.com").with_id(UserId(9));
        assert_eq!(user.id, Some(UserId(9)));
        assert!(user.is_persisted());
    }
}
