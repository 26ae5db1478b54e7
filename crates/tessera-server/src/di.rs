//! Dependency injection module using Shaku.
//!
//! Two module definitions cover the deployment shapes:
//! - `MonolithicModule`: MySQL store, Redis cache and Redis notifications,
//!   with in-process replacements for whichever backend is disabled
//! - `InMemoryModule`: every collaborator in process, for local runs with no
//!   external services

use shaku::{module, HasComponent};
use std::sync::Arc;
use tessera_config::AppConfig;
use tessera_core::{HealthCheck, TesseraResult};
use tessera_repository::{
    DatabaseHealthCheck, DatabasePool, DatabasePoolInterface, InMemoryUserRepository,
    MySqlUserRepository, UserRepository,
};
use tessera_service::{
    create_redis_pool, CacheHealthCheck, CacheInterface, InMemoryCacheService,
    InMemoryMessageService, MessageService, RedisCacheService, RedisMessageService, UserService,
    UserServiceImpl, UserServiceImplParameters, UserServiceSettings,
};
use tracing::{info, warn};

// ============================================================================
// Shaku Module Definitions
// ============================================================================

// Production module. Components listed here are the defaults; `build_monolithic_module`
// overrides the store and cache with in-process ones when their backend is disabled.
// A default-built RedisMessageService drops every message.
module! {
    pub MonolithicModule {
        components = [
            DatabasePool,
            MySqlUserRepository,
            RedisCacheService,
            RedisMessageService,
            UserServiceImpl,
        ],
        providers = [],
    }
}

// Fully in-process module.
module! {
    pub InMemoryModule {
        components = [
            InMemoryUserRepository,
            InMemoryCacheService,
            InMemoryMessageService,
            UserServiceImpl,
        ],
        providers = [],
    }
}

// ============================================================================
// Module Builders
// ============================================================================

/// Builds the module matching the configuration.
///
/// With both the database and Redis disabled the in-memory module is used.
pub async fn build_module(config: &AppConfig) -> TesseraResult<Arc<dyn ServiceResolver>> {
    if !config.database.enabled && !config.redis.enabled {
        info!("No external services enabled, using in-memory module");
        return Ok(build_in_memory_module(config));
    }
    let module: Arc<dyn ServiceResolver> = build_monolithic_module(config).await?;
    Ok(module)
}

/// Builds the production module, connecting to MySQL and Redis when enabled.
pub async fn build_monolithic_module(config: &AppConfig) -> TesseraResult<Arc<MonolithicModule>> {
    let mut builder = MonolithicModule::builder().with_component_parameters::<UserServiceImpl>(
        UserServiceImplParameters::from_settings(UserServiceSettings::from_config(config)),
    );

    if config.database.enabled {
        let pool = DatabasePool::connect(&config.database).await?;
        if config.database.run_migrations {
            pool.run_migrations().await?;
        }
        builder = builder.with_component_override::<dyn DatabasePoolInterface>(Box::new(pool));
    } else {
        warn!("Database disabled, using in-memory user store");
        builder = builder
            .with_component_override::<dyn UserRepository>(Box::new(InMemoryUserRepository::new()));
    }

    if config.redis.enabled {
        let pool = create_redis_pool(&config.redis).await?;
        builder = builder.with_component_override::<dyn CacheInterface>(Box::new(
            RedisCacheService::new(Arc::clone(&pool)),
        ));

        if config.messaging.enabled {
            info!("Publishing notifications to '{}'", config.messaging.channel);
            builder = builder.with_component_override::<dyn MessageService>(Box::new(
                RedisMessageService::new(pool, config.messaging.channel.clone()),
            ));
        }
    } else {
        warn!("Redis disabled, using in-process cache and dropping notifications");
        builder = builder
            .with_component_override::<dyn CacheInterface>(Box::new(InMemoryCacheService::new()));
    }

    Ok(Arc::new(builder.build()))
}

/// Builds the fully in-process module.
#[must_use]
pub fn build_in_memory_module(config: &AppConfig) -> Arc<InMemoryModule> {
    let module = InMemoryModule::builder()
        .with_component_parameters::<UserServiceImpl>(UserServiceImplParameters::from_settings(
            UserServiceSettings::from_config(config),
        ))
        .build();

    Arc::new(module)
}

// ============================================================================
// Module Resolution Helpers
// ============================================================================

/// Resolves the user service and its collaborators from any module.
pub trait ServiceResolver: Send + Sync {
    /// Resolves the user service.
    fn user_service(&self) -> Arc<dyn UserService>;

    /// Resolves the user repository.
    fn user_repository(&self) -> Arc<dyn UserRepository>;

    /// Resolves the cache.
    fn cache(&self) -> Arc<dyn CacheInterface>;

    /// Resolves the notification sink.
    fn messages(&self) -> Arc<dyn MessageService>;

    /// Resolves the database pool, if the module has one.
    fn database_pool(&self) -> Option<Arc<dyn DatabasePoolInterface>>;

    /// Returns the dependencies checked by the readiness endpoint.
    fn health_checks(&self) -> Vec<Arc<dyn HealthCheck>> {
        let mut checks: Vec<Arc<dyn HealthCheck>> = Vec::new();
        if let Some(pool) = self.database_pool().filter(|pool| pool.is_configured()) {
            checks.push(Arc::new(DatabaseHealthCheck::new(pool)));
        }
        checks.push(Arc::new(CacheHealthCheck::new(self.cache())));
        checks
    }
}

impl ServiceResolver for MonolithicModule {
    fn user_service(&self) -> Arc<dyn UserService> {
        self.resolve()
    }

    fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.resolve()
    }

    fn cache(&self) -> Arc<dyn CacheInterface> {
        self.resolve()
    }

    fn messages(&self) -> Arc<dyn MessageService> {
        self.resolve()
    }

    fn database_pool(&self) -> Option<Arc<dyn DatabasePoolInterface>> {
        Some(self.resolve())
    }
}

impl ServiceResolver for InMemoryModule {
    fn user_service(&self) -> Arc<dyn UserService> {
        self.resolve()
    }

    fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.resolve()
    }

    fn cache(&self) -> Arc<dyn CacheInterface> {
        self.resolve()
    }

    fn messages(&self) -> Arc<dyn MessageService> {
        self.resolve()
    }

    fn database_pool(&self) -> Option<Arc<dyn DatabasePoolInterface>> {
        None
    }
}

/// Releases pooled connections held by the module.
pub async fn shutdown(module: &dyn ServiceResolver) {
    if let Some(pool) = module.database_pool() {
        pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tessera_core::{HealthStatus, UserId};
    use tessera_service::UserDto;

    fn local_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.database.enabled = false;
        config.redis.enabled = false;
        config.messaging.enabled = false;
        config.service.simulated_latency_ms = 0;
        config
    }

    struct SharedMessages(Arc<InMemoryMessageService>);

    #[async_trait]
    impl MessageService for SharedMessages {
        async fn send(&self, message: &str) -> TesseraResult<()> {
            self.0.send(message).await
        }
    }

    #[tokio::test]
    async fn test_in_memory_module_round_trip() {
        let module = build_in_memory_module(&local_config());
        let service = module.user_service();

        let created = service
            .create_user(UserDto::new("Alice", "alice@example.com"))
            .await
            .unwrap();
        assert_eq!(created.id, Some(UserId(1)));
        assert_eq!(service.get_user(UserId(1)).await.unwrap(), created);

        let stored = module.user_repository().find_by_id(UserId(1)).await.unwrap();
        assert_eq!(stored.map(|u| u.name), Some("Alice".to_string()));
        assert!(module.cache().is_enabled());
        assert!(module.database_pool().is_none());
    }

    #[tokio::test]
    async fn test_in_memory_module_shares_components() {
        let module = build_in_memory_module(&local_config());

        module
            .user_repository()
            .save(&tessera_core::User::new("Bob", "bob@example.com"))
            .await
            .unwrap();

        let users = module.user_service().list_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert!(module.cache().exists("allUsers::SimpleKey []").await.unwrap());
    }

    #[tokio::test]
    async fn test_message_override_receives_single_update_notification() {
        let messages = Arc::new(InMemoryMessageService::new());
        let module = InMemoryModule::builder()
            .with_component_parameters::<UserServiceImpl>(UserServiceImplParameters::from_settings(
                UserServiceSettings::from_config(&local_config()),
            ))
            .with_component_override::<dyn MessageService>(Box::new(SharedMessages(Arc::clone(
                &messages,
            ))))
            .build();

        let service = module.user_service();
        let created = service
            .create_user(UserDto::new("Alice", "alice@example.com"))
            .await
            .unwrap();
        service
            .update_user(created.id.unwrap(), UserDto::new("Alicia", "alicia@example.com"))
            .await
            .unwrap();

        assert_eq!(messages.messages(), vec!["user updated".to_string()]);
    }

    #[tokio::test]
    async fn test_build_module_without_backends_is_in_memory() {
        let module = build_module(&local_config()).await.unwrap();

        assert!(module.database_pool().is_none());
        let checks = module.health_checks();
        assert_eq!(checks.len(), 1);
        assert_eq!(checks[0].name(), "cache");
        assert_eq!(checks[0].check().await, HealthStatus::Healthy);
        shutdown(&*module).await;
    }

    #[tokio::test]
    async fn test_monolithic_module_falls_back_when_backends_disabled() {
        let module = build_monolithic_module(&local_config()).await.unwrap();

        let service = module.user_service();
        let created = service
            .create_user(UserDto::new("Alice", "alice@example.com"))
            .await
            .unwrap();
        assert_eq!(service.get_user(created.id.unwrap()).await.unwrap(), created);

        let pool = module.database_pool().unwrap();
        assert!(!pool.is_configured());
        assert!(module.messages().send("dropped").await.is_ok());

        let checks = module.health_checks();
        assert_eq!(checks.len(), 1);
        assert_eq!(checks[0].check().await, HealthStatus::Healthy);

        shutdown(&*module).await;
    }
}
