//! Repository trait definitions.

use async_trait::async_trait;
use tessera_core::{Interface, TesseraResult, User, UserId};

/// Persistent store for users.
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> TesseraResult<Option<User>>;

    /// Finds all users, ordered by ID.
    async fn find_all(&self) -> TesseraResult<Vec<User>>;

    /// Saves a user.
    ///
    /// A user without an ID is inserted and receives a store-assigned ID.
    /// A user with an ID replaces the stored record, or is inserted with
    /// that ID if none exists. Returns the stored record.
    async fn save(&self, user: &User) -> TesseraResult<User>;

    /// Checks if a user exists by ID.
    async fn exists_by_id(&self, id: UserId) -> TesseraResult<bool>;

    /// Deletes a user by ID.
    ///
    /// Returns `true` if a record was removed.
    async fn delete_by_id(&self, id: UserId) -> TesseraResult<bool>;
}
