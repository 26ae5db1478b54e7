//! Prometheus metrics for the user service.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use std::time::Duration;

/// Metric names for the user service.
pub mod names {
    /// Cache lookups answered from the cache.
    pub const CACHE_HITS_TOTAL: &str = "tessera_cache_hits_total";
    /// Cache lookups that fell through to the store.
    pub const CACHE_MISSES_TOTAL: &str = "tessera_cache_misses_total";
    /// Entries removed by group eviction.
    pub const CACHE_EVICTIONS_TOTAL: &str = "tessera_cache_evictions_total";
    /// Cache writes or evictions that failed and were skipped.
    pub const CACHE_ERRORS_TOTAL: &str = "tessera_cache_errors_total";

    /// Notifications published.
    pub const NOTIFICATIONS_SENT_TOTAL: &str = "tessera_notifications_sent_total";
    /// Notifications that failed to publish.
    pub const NOTIFICATIONS_FAILED_TOTAL: &str = "tessera_notifications_failed_total";

    /// Backing store read duration in seconds, including simulated latency.
    pub const STORE_READ_DURATION_SECONDS: &str = "tessera_store_read_duration_seconds";
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(names::CACHE_HITS_TOTAL, "Cache lookups served from the cache");
    describe_counter!(
        names::CACHE_MISSES_TOTAL,
        "Cache lookups that fell through to the backing store"
    );
    describe_counter!(
        names::CACHE_EVICTIONS_TOTAL,
        "Cache entries removed by group eviction"
    );
    describe_counter!(
        names::CACHE_ERRORS_TOTAL,
        "Cache writes or evictions that failed"
    );
    describe_counter!(names::NOTIFICATIONS_SENT_TOTAL, "Notifications published");
    describe_counter!(
        names::NOTIFICATIONS_FAILED_TOTAL,
        "Notifications that failed to publish"
    );
    describe_histogram!(
        names::STORE_READ_DURATION_SECONDS,
        "Backing store read duration in seconds"
    );
}

/// Cache metrics recorder.
#[derive(Clone, Copy, Debug)]
pub struct CacheMetrics;

impl CacheMetrics {
    /// Record a cache hit in `group`.
    pub fn hit(group: &'static str) {
        counter!(names::CACHE_HITS_TOTAL, "cache" => group).increment(1);
    }

    /// Record a cache miss in `group`.
    pub fn miss(group: &'static str) {
        counter!(names::CACHE_MISSES_TOTAL, "cache" => group).increment(1);
    }

    /// Record entries evicted from `group`.
    pub fn evicted(group: &'static str, count: u64) {
        counter!(names::CACHE_EVICTIONS_TOTAL, "cache" => group).increment(count);
    }

    /// Record a failed cache write or eviction.
    pub fn error(operation: &'static str) {
        counter!(names::CACHE_ERRORS_TOTAL, "operation" => operation).increment(1);
    }
}

/// Notification metrics recorder.
#[derive(Clone, Copy, Debug)]
pub struct NotificationMetrics;

impl NotificationMetrics {
    /// Record a published notification.
    pub fn sent() {
        counter!(names::NOTIFICATIONS_SENT_TOTAL).increment(1);
    }

    /// Record a failed notification.
    pub fn failed() {
        counter!(names::NOTIFICATIONS_FAILED_TOTAL).increment(1);
    }
}

/// Record how long a backing store read took.
pub fn record_store_read(operation: &'static str, duration: Duration) {
    histogram!(names::STORE_READ_DURATION_SECONDS, "operation" => operation)
        .record(duration.as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names_are_namespaced() {
        for name in [
            names::CACHE_HITS_TOTAL,
            names::CACHE_MISSES_TOTAL,
            names::CACHE_EVICTIONS_TOTAL,
            names::CACHE_ERRORS_TOTAL,
            names::NOTIFICATIONS_SENT_TOTAL,
            names::NOTIFICATIONS_FAILED_TOTAL,
            names::STORE_READ_DURATION_SECONDS,
        ] {
            assert!(name.starts_with("tessera_"));
        }
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        register_metrics();
        CacheMetrics::hit("users");
        CacheMetrics::miss("users");
        CacheMetrics::evicted("allUsers", 1);
        NotificationMetrics::sent();
        record_store_read("find_by_id", Duration::from_millis(5));
    }
}
