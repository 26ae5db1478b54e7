//! In-process cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use parking_lot::Mutex;
use shaku::Component;
use std::collections::HashMap;
use std::time::Duration;
use tessera_core::TesseraResult;
use tokio::time::Instant;
use tracing::debug;

/// A cached value with its optional deadline.
#[derive(Debug, Clone)]
pub struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// Cache held in process memory.
///
/// Expiry is evaluated lazily on access against the tokio clock, so paused
/// test time controls it.
#[derive(Debug, Default, Component)]
#[shaku(interface = CacheInterface)]
pub struct InMemoryCacheService {
    #[shaku(default)]
    entries: Mutex<HashMap<String, Entry>>,
}

impl InMemoryCacheService {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the live (non-expired) keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let now = Instant::now();
        let mut keys: Vec<String> = self
            .entries
            .lock()
            .iter()
            .filter(|(_, entry)| !entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }
}

/// Matches `key` against a glob pattern where `*` matches any run of
/// characters.
fn glob_match(pattern: &str, key: &str) -> bool {
    let mut parts = pattern.split('*');
    let Some(first) = parts.next() else {
        return key.is_empty();
    };
    let Some(mut rest) = key.strip_prefix(first) else {
        return false;
    };

    let parts: Vec<&str> = parts.collect();
    let Some((last, middle)) = parts.split_last() else {
        return rest.is_empty();
    };

    for part in middle {
        match rest.find(part) {
            Some(index) => rest = &rest[index + part.len()..],
            None => return false,
        }
    }
    rest.ends_with(last)
}

#[async_trait]
impl CacheInterface for InMemoryCacheService {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn ping(&self) -> TesseraResult<()> {
        Ok(())
    }

    async fn get_raw(&self, key: &str) -> TesseraResult<Option<String>> {
        let now = Instant::now();
        let mut entries = self.entries.lock();

        let value = match entries.get(key) {
            Some(entry) if entry.is_expired(now) => {
                entries.remove(key);
                None
            }
            Some(entry) => Some(entry.value.clone()),
            None => None,
        };

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }
        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Option<Duration>) -> TesseraResult<()> {
        let entry = Entry {
            value: value.to_string(),
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        };
        self.entries.lock().insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> TesseraResult<bool> {
        let now = Instant::now();
        Ok(self
            .entries
            .lock()
            .remove(key)
            .is_some_and(|entry| !entry.is_expired(now)))
    }

    async fn exists(&self, key: &str) -> TesseraResult<bool> {
        let now = Instant::now();
        Ok(self
            .entries
            .lock()
            .get(key)
            .is_some_and(|entry| !entry.is_expired(now)))
    }

    async fn delete_pattern(&self, pattern: &str) -> TesseraResult<u64> {
        let now = Instant::now();
        let mut deleted = 0;
        self.entries.lock().retain(|key, entry| {
            if glob_match(pattern, key) {
                if !entry.is_expired(now) {
                    deleted += 1;
                }
                false
            } else {
                true
            }
        });

        debug!("Deleted {} keys matching pattern '{}'", deleted, pattern);
        Ok(deleted)
    }
}
