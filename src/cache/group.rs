//! One shared cache group, backed by Moka.

use std::sync::Arc;

use moka::sync::Cache;

use super::CacheConfig;

/// Normalized key -> template for one cache group.
///
/// Thread-safe and cheap to clone; clones share the same entries.
#[derive(Clone)]
pub struct GroupCache {
    inner: Cache<String, String>,
    name: Arc<str>,
}

impl GroupCache {
    pub fn new(name: impl Into<Arc<str>>, config: &CacheConfig) -> Self {
        Self {
            inner: config.build(),
            name: name.into(),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    pub fn insert(&self, key: &str, template: &str) {
        self.inner.insert(key.to_string(), template.to_string());
    }

    /// Approximate; pending writes may not be counted yet.
    pub fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }
}

impl std::fmt::Debug for GroupCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupCache")
            .field("name", &self.name)
            .field("entry_count", &self.inner.entry_count())
            .finish()
    }
}
