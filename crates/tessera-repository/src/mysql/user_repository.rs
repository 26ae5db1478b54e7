//! MySQL user repository implementation.

use crate::{traits::UserRepository, DatabasePoolInterface};
use async_trait::async_trait;
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tessera_core::{TesseraResult, User, UserId};
use tracing::debug;

/// MySQL user repository implementation.
#[derive(Clone, Component)]
#[shaku(interface = UserRepository)]
pub struct MySqlUserRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlUserRepository {
    /// Creates a new MySQL user repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: Some(UserId(row.id)),
            name: row.name,
            email: row.email,
        }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: UserId) -> TesseraResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>("SELECT id, name, email FROM users WHERE id = ?")
            .bind(id.into_inner())
            .fetch_optional(self.pool.inner()?)
            .await?;

        Ok(row.map(User::from))
    }

    async fn find_all(&self) -> TesseraResult<Vec<User>> {
        debug!("Finding all users");

        let rows = sqlx::query_as::<_, UserRow>("SELECT id, name, email FROM users ORDER BY id")
            .fetch_all(self.pool.inner()?)
            .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn save(&self, user: &User) -> TesseraResult<User> {
        match user.id {
            None => {
                debug!("Inserting new user: {}", user.email);

                let result = sqlx::query("INSERT INTO users (name, email) VALUES (?, ?)")
                    .bind(&user.name)
                    .bind(&user.email)
                    .execute(self.pool.inner()?)
                    .await?;

                // AUTO_INCREMENT ids are positive and fit in a signed BIGINT
                let id = UserId(i64::try_from(result.last_insert_id()).unwrap_or(i64::MAX));
                Ok(user.clone().with_id(id))
            }
            Some(id) => {
                debug!("Upserting user: {}", id);

                let result = sqlx::query(
                    r#"
                    INSERT INTO users (id, name, email) VALUES (?, ?, ?)
                    ON DUPLICATE KEY UPDATE name = VALUES(name), email = VALUES(email)
                    "#,
                )
                .bind(id.into_inner())
                .bind(&user.name)
                .bind(&user.email)
                .execute(self.pool.inner()?)
                .await?;

                // An explicit id of 0 still makes MySQL generate one
                let stored = if id.into_inner() == 0 {
                    UserId(i64::try_from(result.last_insert_id()).unwrap_or(i64::MAX))
                } else {
                    id
                };
                Ok(user.clone().with_id(stored))
            }
        }
    }

    async fn exists_by_id(&self, id: UserId) -> TesseraResult<bool> {
        let result: Option<i64> = sqlx::query_scalar("SELECT 1 FROM users WHERE id = ? LIMIT 1")
            .bind(id.into_inner())
            .fetch_optional(self.pool.inner()?)
            .await?;

        Ok(result.is_some())
    }

    async fn delete_by_id(&self, id: UserId) -> TesseraResult<bool> {
        debug!("Deleting user: {}", id);

        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.into_inner())
            .execute(self.pool.inner()?)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl std::fmt::Debug for MySqlUserRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlUserRepository").finish_non_exhaustive()
    }
}
