//! Cache configuration.

use std::hash::Hash;
use std::time::Duration;

use moka::sync::Cache;

/// Sizing and expiry for one Moka cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries per group.
    pub max_capacity: u64,

    /// Time-to-live for cache entries.
    /// After this duration, entries are automatically evicted.
    pub ttl: Option<Duration>,

    /// Time-to-idle for cache entries.
    /// Entries are evicted if not accessed within this duration.
    pub tti: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            ttl: Some(Duration::from_secs(3600)), // 1 hour
            tti: None,
        }
    }
}

impl CacheConfig {
    /// Create a new cache config with the given max capacity.
    pub fn with_capacity(max_capacity: u64) -> Self {
        Self {
            max_capacity,
            ..Default::default()
        }
    }

    /// Set time-to-live for cache entries.
    #[must_use]
    pub fn ttl(mut self, duration: Duration) -> Self {
        self.ttl = Some(duration);
        self
    }

    /// Set time-to-idle for cache entries.
    #[must_use]
    pub fn tti(mut self, duration: Duration) -> Self {
        self.tti = Some(duration);
        self
    }

    /// Disable TTL (entries never expire based on time).
    #[must_use]
    pub fn no_ttl(mut self) -> Self {
        self.ttl = None;
        self
    }

    /// Create config for session-like data.
    /// Medium capacity, TTI-based expiration.
    pub fn session_data() -> Self {
        Self {
            max_capacity: 20_000,
            ttl: Some(Duration::from_secs(1800)), // 30 minutes max
            tti: Some(Duration::from_secs(300)),  // 5 minutes idle
        }
    }

    /// Create config for parsed translation documents.
    /// One entry per language, short TTL so edited files are picked up.
    pub fn document_data() -> Self {
        Self {
            max_capacity: 256,
            ttl: Some(Duration::from_secs(60)),
            tti: None,
        }
    }

    /// Build a Moka cache with these limits.
    pub fn build<K, V>(&self) -> Cache<K, V>
    where
        K: Hash + Eq + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        let mut builder = Cache::builder().max_capacity(self.max_capacity);

        if let Some(ttl) = self.ttl {
            builder = builder.time_to_live(ttl);
        }

        if let Some(tti) = self.tti {
            builder = builder.time_to_idle(tti);
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = CacheConfig::with_capacity(50)
            .ttl(Duration::from_secs(10))
            .tti(Duration::from_secs(5));
        assert_eq!(config.max_capacity, 50);
        assert_eq!(config.ttl, Some(Duration::from_secs(10)));
        assert_eq!(config.tti, Some(Duration::from_secs(5)));
        assert_eq!(config.no_ttl().ttl, None);
    }

    #[test]
    fn test_session_data_is_bounded() {
        let config = CacheConfig::session_data();
        assert_eq!(config.max_capacity, 20_000);
        assert!(config.tti.is_some());
    }

    #[test]
    fn test_build_respects_capacity() {
        let cache: Cache<u32, u32> = CacheConfig::with_capacity(10).no_ttl().build();
        for i in 0..1_000 {
            cache.insert(i, i);
        }
        cache.run_pending_tasks();
        assert!(cache.entry_count() <= 10);
    }
}
