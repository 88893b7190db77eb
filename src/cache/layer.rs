//! Two-tier read-through cache in front of a translation source.
//!
//! Read order is local tier, then shared tier. A shared hit is promoted into
//! the local tier. `put` writes through to both. Writes are best-effort and
//! not atomic across tiers.

use std::sync::Arc;

use tracing::warn;

use super::{LocalCache, SharedCache};
use crate::i18n::{LanguageCode, TranslationKey};

/// Marker between the prefix and the language in a group name.
pub const TRANSLATION_MARKER: &str = "TRANSLATION_";

/// Shared cache group for `language`, e.g. `GLOSSA_TRANSLATION_EN-US`.
pub fn cache_group(prefix: &str, language: LanguageCode) -> String {
    format!(
        "{}{}{}",
        prefix,
        TRANSLATION_MARKER,
        language.code().to_ascii_uppercase()
    )
}

/// Hit/miss counters for one context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub local_hits: u64,
    pub shared_hits: u64,
    pub misses: u64,
}

/// Local tier plus an optional shared tier.
pub struct CacheLayer {
    local: LocalCache,
    shared: Option<Arc<dyn SharedCache>>,
    prefix: Arc<str>,
    stats: CacheStats,
}

impl CacheLayer {
    pub fn new(shared: Option<Arc<dyn SharedCache>>, prefix: impl Into<Arc<str>>) -> Self {
        Self {
            local: LocalCache::new(),
            shared,
            prefix: prefix.into(),
            stats: CacheStats::default(),
        }
    }

    /// Cached template, if either tier has it.
    ///
    /// A failing shared tier counts as a miss.
    pub fn get(&mut self, language: LanguageCode, key: &TranslationKey) -> Option<String> {
        if let Some(template) = self.local.get(language, key) {
            self.stats.local_hits += 1;
            return Some(template.to_string());
        }

        if let Some(shared) = &self.shared {
            let group = cache_group(&self.prefix, language);
            match shared.get(&group, key.as_str()) {
                Ok(Some(template)) => {
                    self.stats.shared_hits += 1;
                    self.local.insert(language, key, &template);
                    return Some(template);
                }
                Ok(None) => {}
                Err(e) => warn!("Shared cache read failed for {} in {}: {}", key, group, e),
            }
        }

        self.stats.misses += 1;
        None
    }

    /// Store a freshly fetched template in both tiers.
    pub fn put(&mut self, language: LanguageCode, key: &TranslationKey, template: &str) {
        self.local.insert(language, key, template);

        if let Some(shared) = &self.shared {
            let group = cache_group(&self.prefix, language);
            if let Err(e) = shared.set(&group, key.as_str(), template) {
                warn!("Shared cache write failed for {} in {}: {}", key, group, e);
            }
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Entries held by the local tier.
    pub fn local_len(&self) -> usize {
        self.local.len()
    }
}

impl std::fmt::Debug for CacheLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheLayer")
            .field("local_entries", &self.local.len())
            .field("shared", &self.shared.is_some())
            .field("prefix", &self.prefix)
            .field("stats", &self.stats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MokaSharedCache;
    use crate::error::{GlossaError, Result};

    struct DownCache;

    impl SharedCache for DownCache {
        fn get(&self, _group: &str, _key: &str) -> Result<Option<String>> {
            Err(GlossaError::CacheUnavailable("connection refused".to_string()))
        }

        fn set(&self, _group: &str, _key: &str, _value: &str) -> Result<()> {
            Err(GlossaError::CacheUnavailable("connection refused".to_string()))
        }
    }

    fn lang(code: &str) -> LanguageCode {
        LanguageCode::known(code).unwrap()
    }

    #[test]
    fn test_cache_group_name() {
        assert_eq!(cache_group("GLOSSA_", lang("en-US")), "GLOSSA_TRANSLATION_EN-US");
        assert_eq!(cache_group("", lang("Cy-az-AZ")), "TRANSLATION_CY-AZ-AZ");
    }

    #[test]
    fn test_put_writes_both_tiers() {
        let shared = Arc::new(MokaSharedCache::default());
        let mut layer = CacheLayer::new(Some(shared.clone()), "P_");
        let key = TranslationKey::new("a.b");

        layer.put(lang("en-US"), &key, "tmpl");

        assert_eq!(layer.local_len(), 1);
        assert_eq!(
            shared.get("P_TRANSLATION_EN-US", "A.B").unwrap().as_deref(),
            Some("tmpl")
        );
        assert_eq!(layer.get(lang("en-US"), &key).as_deref(), Some("tmpl"));
        assert_eq!(layer.stats().local_hits, 1);
    }

    #[test]
    fn test_shared_hit_is_promoted() {
        let shared = Arc::new(MokaSharedCache::default());
        shared.set("P_TRANSLATION_DE-DE", "A.B", "warm").unwrap();

        let mut layer = CacheLayer::new(Some(shared), "P_");
        let key = TranslationKey::new("a.b");

        assert_eq!(layer.get(lang("de-DE"), &key).as_deref(), Some("warm"));
        assert_eq!(layer.get(lang("de-DE"), &key).as_deref(), Some("warm"));
        assert_eq!(
            layer.stats(),
            CacheStats {
                local_hits: 1,
                shared_hits: 1,
                misses: 0
            }
        );
    }

    #[test]
    fn test_entries_scoped_by_language() {
        let mut layer = CacheLayer::new(None, "P_");
        let key = TranslationKey::new("a.b");
        layer.put(lang("en-US"), &key, "english");

        assert_eq!(layer.get(lang("de-DE"), &key), None);
        assert_eq!(layer.stats().misses, 1);
    }

    #[test]
    fn test_failing_shared_tier_degrades_to_miss() {
        let mut layer = CacheLayer::new(Some(Arc::new(DownCache)), "P_");
        let key = TranslationKey::new("a.b");

        assert_eq!(layer.get(lang("en-US"), &key), None);
        layer.put(lang("en-US"), &key, "still local");
        assert_eq!(layer.get(lang("en-US"), &key).as_deref(), Some("still local"));
    }
}
