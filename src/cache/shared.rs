//! Shared cache tier - visible to every execution context.

use dashmap::DashMap;
use tracing::debug;

use super::{CacheConfig, GroupCache};
use crate::error::Result;

/// Group-namespaced string cache shared across contexts.
///
/// Implementations must be safe for concurrent get/set per key; callers
/// never lock around them. `Err` means the service is unavailable.
pub trait SharedCache: Send + Sync {
    fn get(&self, group: &str, key: &str) -> Result<Option<String>>;
    fn set(&self, group: &str, key: &str, value: &str) -> Result<()>;
}

/// In-process shared cache: one Moka cache per group.
pub struct MokaSharedCache {
    groups: DashMap<String, GroupCache>,
    config: CacheConfig,
}

impl MokaSharedCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            groups: DashMap::new(),
            config,
        }
    }

    /// Get a group, creating it on first use.
    fn group(&self, name: &str) -> GroupCache {
        if let Some(group) = self.groups.get(name) {
            return group.clone();
        }
        self.groups
            .entry(name.to_string())
            .or_insert_with(|| {
                debug!("Creating cache group: {}", name);
                GroupCache::new(name, &self.config)
            })
            .clone()
    }

    /// Names of every group created so far.
    pub fn group_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.groups.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        names
    }

    /// Entries in `group`, zero if it does not exist.
    pub fn entry_count(&self, group: &str) -> u64 {
        self.groups
            .get(group)
            .map(|cache| cache.entry_count())
            .unwrap_or(0)
    }
}

impl Default for MokaSharedCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl SharedCache for MokaSharedCache {
    fn get(&self, group: &str, key: &str) -> Result<Option<String>> {
        Ok(self.groups.get(group).and_then(|cache| cache.get(key)))
    }

    fn set(&self, group: &str, key: &str, value: &str) -> Result<()> {
        self.group(group).insert(key, value);
        Ok(())
    }
}

impl std::fmt::Debug for MokaSharedCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaSharedCache")
            .field("group_count", &self.groups.len())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_group() {
        let cache = MokaSharedCache::default();
        assert_eq!(cache.get("NOPE", "A.B").unwrap(), None);
        assert!(cache.group_names().is_empty());
    }

    #[test]
    fn test_set_then_get() {
        let cache = MokaSharedCache::default();
        cache.set("G_TRANSLATION_EN-US", "A.B", "value").unwrap();

        assert_eq!(cache.get("G_TRANSLATION_EN-US", "A.B").unwrap().as_deref(), Some("value"));
        assert_eq!(cache.get("G_TRANSLATION_DE-DE", "A.B").unwrap(), None);
        assert_eq!(cache.entry_count("G_TRANSLATION_EN-US"), 1);
        assert_eq!(cache.group_names(), vec!["G_TRANSLATION_EN-US".to_string()]);
    }

    #[test]
    fn test_groups_are_isolated() {
        let cache = MokaSharedCache::new(CacheConfig::with_capacity(10));
        cache.set("ONE", "K", "1").unwrap();
        cache.set("TWO", "K", "2").unwrap();

        assert_eq!(cache.get("ONE", "K").unwrap().as_deref(), Some("1"));
        assert_eq!(cache.get("TWO", "K").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_concurrent_writers() {
        let cache = std::sync::Arc::new(MokaSharedCache::default());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    for n in 0..50 {
                        cache.set("GROUP", &format!("K{}", n), &format!("{}", i)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.group_names().len(), 1);
        assert!(cache.get("GROUP", "K49").unwrap().is_some());
    }
}
