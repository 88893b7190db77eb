//! Per-context translation façade.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::{CacheLayer, CacheStats};
use crate::error::Result;
use crate::i18n::{
    LanguageCode, LanguageRegistry, LanguageResolver, TranslationContext, TranslationKey,
    interpolate,
};
use crate::source::TranslationSource;

/// Translates keys for one execution context.
///
/// Owns the resolved language and the local cache tier of that context.
/// Create one per request through `TranslatorFactory::begin`, drop it when
/// the request ends.
pub struct Translator {
    resolver: LanguageResolver,
    cache: CacheLayer,
    source: Arc<dyn TranslationSource>,
    registry: Arc<LanguageRegistry>,
}

impl Translator {
    pub fn new(
        resolver: LanguageResolver,
        cache: CacheLayer,
        source: Arc<dyn TranslationSource>,
        registry: Arc<LanguageRegistry>,
    ) -> Self {
        Self {
            resolver,
            cache,
            source,
            registry,
        }
    }

    /// Translate `key` in the effective language and interpolate `context`.
    ///
    /// Never fails: if the source cannot be read the normalized key is
    /// returned instead.
    pub fn translate(&mut self, key: &str, context: Option<&TranslationContext>) -> String {
        let key = TranslationKey::new(key);
        let language = self.resolver.resolve();

        let template = match self.cache.get(language, &key) {
            Some(template) => template,
            None => match self.source.fetch_template(language, &key) {
                Ok(template) => {
                    self.cache.put(language, &key, &template);
                    template
                }
                Err(e) => {
                    warn!("Translation source failed for {} ({}): {}", key, language, e);
                    return key.into_string();
                }
            },
        };

        match context {
            Some(context) => interpolate(&template, context),
            None => template,
        }
    }

    /// Effective language of this context.
    pub fn language(&mut self) -> LanguageCode {
        self.resolver.resolve()
    }

    /// Override the effective language.
    ///
    /// Fails only when `code` is not supported; the current language is then
    /// left unchanged.
    pub fn set_language(&mut self, code: &str) -> Result<LanguageCode> {
        self.resolver.set_language(code)
    }

    pub fn is_supported(&self, code: &str) -> bool {
        self.resolver.is_supported(code)
    }

    /// Languages the source has content for, limited to supported ones.
    pub fn languages(&self) -> Vec<LanguageCode> {
        match self.source.list_languages() {
            Ok(languages) => languages
                .into_iter()
                .filter(|language| self.registry.is_supported(language.code()))
                .collect(),
            Err(e) => {
                warn!("Could not list languages: {}", e);
                Vec::new()
            }
        }
    }

    /// Keys available in the effective language.
    pub fn keys(&mut self) -> Vec<TranslationKey> {
        let language = self.resolver.resolve();
        match self.source.keys(language) {
            Ok(keys) => {
                debug!("{} keys available for {}", keys.len(), language);
                keys
            }
            Err(e) => {
                warn!("Could not list keys for {}: {}", language, e);
                Vec::new()
            }
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("resolver", &self.resolver)
            .field("cache", &self.cache)
            .finish()
    }
}
