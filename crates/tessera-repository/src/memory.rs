//! In-memory user repository.
//!
//! Used when the database is disabled and as a test double for the
//! service layer.

use crate::traits::UserRepository;
use async_trait::async_trait;
use parking_lot::Mutex;
use shaku::Component;
use std::collections::BTreeMap;
use tessera_core::{TesseraError, TesseraResult, User, UserId};

/// Contents of an [`InMemoryUserRepository`].
#[derive(Debug)]
pub struct Store {
    users: BTreeMap<UserId, User>,
    /// Next candidate for an assigned id; `None` once `i64::MAX` is taken.
    next_id: Option<i64>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            next_id: Some(1),
        }
    }
}

impl Store {
    fn allocate(&mut self) -> TesseraResult<UserId> {
        let exhausted = || TesseraError::Database("User id space exhausted".to_string());

        let mut candidate = self.next_id.ok_or_else(exhausted)?;
        while self.users.contains_key(&UserId(candidate)) {
            candidate = candidate.checked_add(1).ok_or_else(exhausted)?;
        }
        self.next_id = candidate.checked_add(1);
        Ok(UserId(candidate))
    }

    fn insert(&mut self, user: User) -> TesseraResult<User> {
        // Id 0 requests a generated id, matching MySQL AUTO_INCREMENT.
        let id = match user.id {
            Some(id) if id.into_inner() != 0 => {
                if let Some(next) = self.next_id {
                    if id.into_inner() >= next {
                        self.next_id = id.into_inner().checked_add(1);
                    }
                }
                id
            }
            _ => self.allocate()?,
        };
        let user = user.with_id(id);
        self.users.insert(id, user.clone());
        Ok(user)
    }
}

/// User repository backed by an ordered map.
///
/// Ids are assigned from a monotonically increasing sequence and are never
/// reused after a delete. Assignment skips ids already taken by explicit
/// saves.
#[derive(Debug, Default, Component)]
#[shaku(interface = UserRepository)]
pub struct InMemoryUserRepository {
    #[shaku(default)]
    store: Mutex<Store>,
}

impl InMemoryUserRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository seeded with users.
    ///
    /// Users without an id are assigned one. Seeds that cannot be assigned
    /// an id are skipped.
    #[must_use]
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let repo = Self::new();
        {
            let mut store = repo.store.lock();
            for user in users {
                let _ = store.insert(user);
            }
        }
        repo
    }

    /// Returns the number of stored users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.lock().users.len()
    }

    /// Returns true if no users are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.lock().users.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> TesseraResult<Option<User>> {
        Ok(self.store.lock().users.get(&id).cloned())
    }

    async fn find_all(&self) -> TesseraResult<Vec<User>> {
        Ok(self.store.lock().users.values().cloned().collect())
    }

    async fn save(&self, user: &User) -> TesseraResult<User> {
        self.store.lock().insert(user.clone())
    }

    async fn exists_by_id(&self, id: UserId) -> TesseraResult<bool> {
        Ok(self.store.lock().users.contains_key(&id))
    }

    async fn delete_by_id(&self, id: UserId) -> TesseraResult<bool> {
        Ok(self.store.lock().users.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user(name: &str) -> User {
        User::new(name, format!("{}@example.com", name.to_lowercase()))
    }

    #[tokio::test]
    async fn test_save_assigns_sequential_ids() {
        let repo = InMemoryUserRepository::new();

        let first = repo.save(&create_test_user("Alice")).await.unwrap();
        let second = repo.save(&create_test_user("Bob")).await.unwrap();

        assert_eq!(first.id, Some(UserId(1)));
        assert_eq!(second.id, Some(UserId(2)));
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn test_save_with_id_overwrites() {
        let repo = InMemoryUserRepository::with_users(vec![create_test_user("Alice")]);

        let updated = User::new("Alicia", "alicia@example.com").with_id(UserId(1));
        repo.save(&updated).await.unwrap();

        let found = repo.find_by_id(UserId(1)).await.unwrap().unwrap();
        assert_eq!(found.name, "Alicia");
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_explicit_id_advances_sequence() {
        let repo = InMemoryUserRepository::new();
        repo.save(&create_test_user("Alice").with_id(UserId(10)))
            .await
            .unwrap();

        let next = repo.save(&create_test_user("Bob")).await.unwrap();
        assert_eq!(next.id, Some(UserId(11)));
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let repo = InMemoryUserRepository::new();
        assert!(repo.find_by_id(UserId(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_all_ordered_by_id() {
        let repo = InMemoryUserRepository::with_users(vec![
            create_test_user("Carol").with_id(UserId(3)),
            create_test_user("Alice").with_id(UserId(1)),
            create_test_user("Bob").with_id(UserId(2)),
        ]);

        let names: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
    }

    #[tokio::test]
    async fn test_exists_and_delete() {
        let repo = InMemoryUserRepository::with_users(vec![create_test_user("Alice")]);

        assert!(repo.exists_by_id(UserId(1)).await.unwrap());
        assert!(repo.delete_by_id(UserId(1)).await.unwrap());
        assert!(!repo.exists_by_id(UserId(1)).await.unwrap());
        assert!(!repo.delete_by_id(UserId(1)).await.unwrap());
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let repo = InMemoryUserRepository::with_users(vec![create_test_user("Alice")]);
        repo.delete_by_id(UserId(1)).await.unwrap();

        let next = repo.save(&create_test_user("Bob")).await.unwrap();
        assert_eq!(next.id, Some(UserId(2)));
    }

    #[tokio::test]
    async fn test_max_explicit_id_does_not_overflow() {
        let repo = InMemoryUserRepository::new();
        repo.save(&create_test_user("Max").with_id(UserId(i64::MAX)))
            .await
            .unwrap();

        let result = repo.save(&create_test_user("Bob")).await;
        assert!(matches!(result, Err(TesseraError::Database(_))));

        let max = repo.find_by_id(UserId(i64::MAX)).await.unwrap().unwrap();
        assert_eq!(max.name, "Max");
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_assignment_skips_taken_ids() {
        let repo = InMemoryUserRepository::new();
        repo.save(&create_test_user("Alice")).await.unwrap();
        // Explicit ids below the sequence do not advance it.
        repo.save(&create_test_user("Carol").with_id(UserId(-5)))
            .await
            .unwrap();

        let mut store = repo.store.lock();
        store.users.insert(
            UserId(2),
            create_test_user("Bob").with_id(UserId(2)),
        );
        assert_eq!(store.allocate().unwrap(), UserId(3));
    }

    #[tokio::test]
    async fn test_zero_id_is_assigned() {
        let repo = InMemoryUserRepository::with_users(vec![create_test_user("Alice")]);

        let saved = repo
            .save(&create_test_user("Bob").with_id(UserId(0)))
            .await
            .unwrap();

        assert_eq!(saved.id, Some(UserId(2)));
        assert!(!repo.exists_by_id(UserId(0)).await.unwrap());
    }
}
