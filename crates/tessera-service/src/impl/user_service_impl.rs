//! User service implementation.

use crate::cache::{cache_keys, CacheExt, CacheInterface};
use crate::dto::UserDto;
use crate::messaging::{MessageService, USER_UPDATED};
use crate::metrics::{record_store_read, CacheMetrics, NotificationMetrics};
use crate::user_service::UserService;
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tessera_config::AppConfig;
use tessera_core::{TesseraError, TesseraResult, User, UserId, ValidateExt};
use tessera_repository::UserRepository;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Tunables of the user service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserServiceSettings {
    /// Delay applied before every cache-miss store read.
    pub simulated_latency: Duration,
    /// Expiry of single-user cache entries.
    pub user_ttl: Duration,
    /// Expiry of the aggregate list entry; `None` keeps it until evicted.
    pub list_ttl: Option<Duration>,
}

impl Default for UserServiceSettings {
    fn default() -> Self {
        Self {
            simulated_latency: Duration::from_secs(3),
            user_ttl: Duration::from_secs(30 * 60),
            list_ttl: None,
        }
    }
}

impl UserServiceSettings {
    /// Builds settings from the application configuration.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            simulated_latency: config.service.simulated_latency(),
            user_ttl: config.cache.user_ttl(),
            list_ttl: config.cache.list_ttl(),
        }
    }
}

/// User service coordinating the store, the cache and the notification sink.
#[derive(Component)]
#[shaku(interface = UserService)]
pub struct UserServiceImpl {
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    #[shaku(inject)]
    messages: Arc<dyn MessageService>,
    settings: UserServiceSettings,
}

impl UserServiceImplParameters {
    /// Component parameters carrying `settings`.
    #[must_use]
    pub fn from_settings(settings: UserServiceSettings) -> Self {
        Self { settings }
    }
}

impl UserServiceImpl {
    /// Creates a new user service.
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        cache: Arc<dyn CacheInterface>,
        messages: Arc<dyn MessageService>,
        settings: UserServiceSettings,
    ) -> Self {
        Self {
            user_repository,
            cache,
            messages,
            settings,
        }
    }

    /// Returns the active settings.
    #[must_use]
    pub const fn settings(&self) -> &UserServiceSettings {
        &self.settings
    }

    async fn simulate_latency(&self) {
        if !self.settings.simulated_latency.is_zero() {
            tokio::time::sleep(self.settings.simulated_latency).await;
        }
    }

    /// Stores a value, logging instead of failing when the cache is unavailable.
    async fn cache_put<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) {
        if let Err(e) = self.cache.set(key, value, ttl).await {
            CacheMetrics::error("set");
            warn!(key, error = %e, "Failed to populate cache");
        }
    }

    /// Evicts every entry of both user cache groups.
    async fn evict_user_caches(&self) {
        for group in [cache_keys::USERS_CACHE, cache_keys::ALL_USERS_CACHE] {
            match self.cache.evict_all(group).await {
                Ok(count) => {
                    CacheMetrics::evicted(group, count);
                    debug!(group, count, "Evicted cache group");
                }
                Err(e) => {
                    CacheMetrics::error("evict");
                    warn!(group, error = %e, "Failed to evict cache group");
                }
            }
        }
    }

    /// Publishes a notification without failing the caller.
    async fn notify(&self, message: &str) {
        match self.messages.send(message).await {
            Ok(()) => NotificationMetrics::sent(),
            Err(e) => {
                NotificationMetrics::failed();
                warn!(message, error = %e, "Failed to send notification");
            }
        }
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn get_user(&self, id: UserId) -> TesseraResult<UserDto> {
        debug!("Getting user: {}", id);

        let cache_key = cache_keys::user_by_id(id);

        if let Some(cached) = self.cache.get::<UserDto>(&cache_key).await? {
            CacheMetrics::hit(cache_keys::USERS_CACHE);
            debug!("Cache hit for user: {}", id);
            return Ok(cached);
        }
        CacheMetrics::miss(cache_keys::USERS_CACHE);

        let started = Instant::now();
        self.simulate_latency().await;
        let user = self.user_repository.find_by_id(id).await?;
        record_store_read("find_by_id", started.elapsed());

        let user = user.ok_or_else(|| TesseraError::not_found("User", id))?;
        let dto = UserDto::from(user);

        self.cache_put(&cache_key, &dto, Some(self.settings.user_ttl))
            .await;

        Ok(dto)
    }

    async fn list_users(&self) -> TesseraResult<Vec<UserDto>> {
        debug!("Listing users");

        let cache_key = cache_keys::all_users();

        if let Some(cached) = self.cache.get::<Vec<UserDto>>(&cache_key).await? {
            CacheMetrics::hit(cache_keys::ALL_USERS_CACHE);
            debug!("Cache hit for user list ({} users)", cached.len());
            return Ok(cached);
        }
        CacheMetrics::miss(cache_keys::ALL_USERS_CACHE);

        let started = Instant::now();
        self.simulate_latency().await;
        let users = self.user_repository.find_all().await?;
        record_store_read("find_all", started.elapsed());

        let dtos: Vec<UserDto> = users.into_iter().map(UserDto::from).collect();

        self.cache_put(&cache_key, &dtos, self.settings.list_ttl)
            .await;

        Ok(dtos)
    }

    async fn create_user(&self, dto: UserDto) -> TesseraResult<UserDto> {
        debug!("Creating user: {}", dto.email);

        dto.validate_request()?;

        let user = User::from(dto);
        let saved = self.user_repository.save(&user).await?;

        self.evict_user_caches().await;

        info!(
            "User created: {}",
            saved.id.map_or_else(|| "-".to_string(), |id| id.to_string())
        );
        Ok(UserDto::from(saved))
    }

    async fn update_user(&self, id: UserId, dto: UserDto) -> TesseraResult<UserDto> {
        debug!("Updating user: {}", id);

        dto.validate_request()?;

        let mut user = self
            .user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| TesseraError::not_found("User", id))?;

        user.name = dto.name;
        user.email = dto.email;

        let updated = self.user_repository.save(&user).await?;

        self.notify(USER_UPDATED).await;
        self.evict_user_caches().await;

        info!("User updated: {}", id);
        Ok(UserDto::from(updated))
    }

    async fn delete_user(&self, id: UserId) -> TesseraResult<()> {
        debug!("Deleting user: {}", id);

        if !self.user_repository.exists_by_id(id).await? {
            return Err(TesseraError::not_found("User", id));
        }

        self.user_repository.delete_by_id(id).await?;

        self.evict_user_caches().await;

        info!("User deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for UserServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceImpl")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
