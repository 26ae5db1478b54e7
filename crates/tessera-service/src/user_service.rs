//! User service trait definition.

use crate::dto::UserDto;
use async_trait::async_trait;
use tessera_core::{Interface, TesseraResult, UserId};

/// User service trait.
#[async_trait]
pub trait UserService: Interface + Send + Sync {
    /// Gets a user by ID, serving repeat lookups from the cache.
    async fn get_user(&self, id: UserId) -> TesseraResult<UserDto>;

    /// Lists all users ordered by id.
    async fn list_users(&self) -> TesseraResult<Vec<UserDto>>;

    /// Creates a user. A supplied id overwrites the existing record.
    async fn create_user(&self, dto: UserDto) -> TesseraResult<UserDto>;

    /// Replaces the name and email of an existing user.
    async fn update_user(&self, id: UserId, dto: UserDto) -> TesseraResult<UserDto>;

    /// Deletes a user.
    async fn delete_user(&self, id: UserId) -> TesseraResult<()>;
}
