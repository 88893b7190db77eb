//! Builds one `Translator` per execution context.

use std::sync::Arc;

use tracing::info;

use super::Translator;
use crate::cache::{CacheLayer, MokaSharedCache, SharedCache};
use crate::config::Config;
use crate::hook::NotificationHook;
use crate::i18n::{LanguageRegistry, LanguageResolver, PreferenceStore, RequestSignals};
use crate::source::{JsonSource, TranslationSource};

/// Process-wide collaborators shared by every context.
///
/// Cloning is cheap. Nothing here holds per-request state.
#[derive(Clone)]
pub struct TranslatorFactory {
    registry: Arc<LanguageRegistry>,
    source: Arc<dyn TranslationSource>,
    shared_cache: Option<Arc<dyn SharedCache>>,
    language_key: Arc<str>,
    cache_prefix: Arc<str>,
}

impl TranslatorFactory {
    /// Factory without a shared cache tier.
    pub fn new(registry: LanguageRegistry, source: Arc<dyn TranslationSource>) -> Self {
        Self {
            registry: Arc::new(registry),
            source,
            shared_cache: None,
            language_key: Arc::from("lang"),
            cache_prefix: Arc::from("GLOSSA_"),
        }
    }

    /// JSON source plus an in-process Moka shared cache, as configured.
    pub fn from_config(config: &Config, hook: Arc<dyn NotificationHook>) -> Self {
        let registry =
            LanguageRegistry::new(&config.supported_languages, &config.default_language);
        info!(
            "Supporting {} languages, default {}",
            registry.supported().len(),
            registry.default_language()
        );

        let source = JsonSource::new(&config.translation_dir, hook);
        let shared = MokaSharedCache::new(config.cache.clone());

        Self::new(registry, Arc::new(source))
            .with_shared_cache(Arc::new(shared))
            .with_language_key(&config.language_key)
            .with_cache_prefix(&config.cache_prefix)
    }

    #[must_use]
    pub fn with_shared_cache(mut self, cache: Arc<dyn SharedCache>) -> Self {
        self.shared_cache = Some(cache);
        self
    }

    #[must_use]
    pub fn with_language_key(mut self, key: &str) -> Self {
        self.language_key = Arc::from(key);
        self
    }

    #[must_use]
    pub fn with_cache_prefix(mut self, prefix: &str) -> Self {
        self.cache_prefix = Arc::from(prefix);
        self
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    pub fn language_key(&self) -> &str {
        &self.language_key
    }

    /// Start a new execution context.
    pub fn begin(
        &self,
        request: RequestSignals,
        cookies: Box<dyn PreferenceStore>,
        session: Box<dyn PreferenceStore>,
    ) -> Translator {
        let resolver = LanguageResolver::new(
            Arc::clone(&self.registry),
            self.language_key.as_ref(),
            request,
            cookies,
            session,
        );
        let cache = CacheLayer::new(self.shared_cache.clone(), Arc::clone(&self.cache_prefix));
        Translator::new(
            resolver,
            cache,
            Arc::clone(&self.source),
            Arc::clone(&self.registry),
        )
    }
}

impl std::fmt::Debug for TranslatorFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslatorFactory")
            .field("registry", &self.registry)
            .field("shared_cache", &self.shared_cache.is_some())
            .field("language_key", &self.language_key)
            .field("cache_prefix", &self.cache_prefix)
            .finish()
    }
}
