//! Translation service - the façade tying everything together.
//!
//! `translate` flow: normalize key -> resolve language -> local cache ->
//! shared cache -> source -> write back to both tiers -> interpolate.

mod factory;
mod translator;

pub use factory::TranslatorFactory;
pub use translator::Translator;

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::cache::{MokaSharedCache, SharedCache};
    use crate::error::{GlossaError, Result};
    use crate::i18n::{
        LanguageCode, LanguageRegistry, MemoryStore, RequestSignals, TranslationContext,
        TranslationKey,
    };
    use crate::source::{MemorySource, TranslationSource};

    /// Memory source that counts fetches and can be switched off.
    struct CountingSource {
        inner: MemorySource,
        fetches: AtomicUsize,
        broken: bool,
    }

    impl CountingSource {
        fn new(inner: MemorySource) -> Self {
            Self {
                inner,
                fetches: AtomicUsize::new(0),
                broken: false,
            }
        }

        fn broken() -> Self {
            Self {
                broken: true,
                ..Self::new(MemorySource::new())
            }
        }

        fn fetches(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }

        fn unavailable() -> GlossaError {
            GlossaError::SourceUnavailable {
                resource: "stub".to_string(),
                reason: "offline".to_string(),
            }
        }
    }

    impl TranslationSource for CountingSource {
        fn fetch_template(&self, language: LanguageCode, key: &TranslationKey) -> Result<String> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.broken {
                return Err(Self::unavailable());
            }
            self.inner.fetch_template(language, key)
        }

        fn list_languages(&self) -> Result<Vec<LanguageCode>> {
            if self.broken {
                return Err(Self::unavailable());
            }
            self.inner.list_languages()
        }

        fn keys(&self, language: LanguageCode) -> Result<Vec<TranslationKey>> {
            if self.broken {
                return Err(Self::unavailable());
            }
            self.inner.keys(language)
        }
    }

    /// Shared cache whose service is down.
    struct DownCache;

    impl SharedCache for DownCache {
        fn get(&self, _group: &str, _key: &str) -> Result<Option<String>> {
            Err(GlossaError::CacheUnavailable("timeout".to_string()))
        }

        fn set(&self, _group: &str, _key: &str, _value: &str) -> Result<()> {
            Err(GlossaError::CacheUnavailable("timeout".to_string()))
        }
    }

    fn lang(code: &str) -> LanguageCode {
        LanguageCode::known(code).unwrap()
    }

    fn source() -> MemorySource {
        MemorySource::new()
            .with_document(
                lang("en-US"),
                [
                    ("GREETING.HELLO", "Hi {user}"),
                    ("GREETING.NAMED", "Hello, {name}!"),
                ],
            )
            .with_document(lang("de-DE"), [("GREETING.HELLO", "Hallo {user}")])
    }

    fn registry() -> LanguageRegistry {
        LanguageRegistry::new(&["en-US", "de-DE", "fr-FR"], "en-US")
    }

    fn factory_with(source: Arc<CountingSource>) -> TranslatorFactory {
        TranslatorFactory::new(registry(), source)
            .with_shared_cache(Arc::new(MokaSharedCache::default()))
    }

    fn plain(factory: &TranslatorFactory) -> Translator {
        factory.begin(
            RequestSignals::default(),
            Box::new(MemoryStore::new()),
            Box::new(MemoryStore::new()),
        )
    }

    #[test]
    fn test_translate_normalizes_and_interpolates() {
        let factory = factory_with(Arc::new(CountingSource::new(source())));
        let mut translator = plain(&factory);

        let context = TranslationContext::new().with("user", "Sam");
        assert_eq!(translator.translate("greeting.hello", Some(&context)), "Hi Sam");
    }

    #[test]
    fn test_interpolation_contract() {
        let factory = factory_with(Arc::new(CountingSource::new(source())));
        let mut translator = plain(&factory);

        let ada = TranslationContext::new().with("name", "Ada");
        assert_eq!(translator.translate("greeting.named", Some(&ada)), "Hello, Ada!");
        assert_eq!(
            translator.translate("greeting.named", Some(&TranslationContext::new())),
            "Hello, {name}!"
        );
        assert_eq!(translator.translate("greeting.named", None), "Hello, {name}!");
    }

    #[test]
    fn test_missing_translation_returns_key() {
        let factory = factory_with(Arc::new(CountingSource::new(source())));
        let mut translator = plain(&factory);

        assert_eq!(translator.translate("UNKNOWN.KEY", None), "UNKNOWN.KEY");
        assert_eq!(translator.translate("unknown.key", None), "UNKNOWN.KEY");
    }

    #[test]
    fn test_at_most_one_fetch_per_entry() {
        let source = Arc::new(CountingSource::new(source()));
        let factory = factory_with(source.clone());
        let mut translator = plain(&factory);

        for _ in 0..5 {
            translator.translate("greeting.hello", None);
        }
        translator.translate("GREETING.HELLO", None);

        assert_eq!(source.fetches(), 1);
        let stats = translator.cache_stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.local_hits, 5);
    }

    #[test]
    fn test_shared_tier_serves_new_context() {
        let source = Arc::new(CountingSource::new(source()));
        let factory = factory_with(source.clone());

        plain(&factory).translate("greeting.hello", None);
        let mut second = plain(&factory);
        assert_eq!(second.translate("greeting.hello", None), "Hi {user}");

        assert_eq!(source.fetches(), 1);
        assert_eq!(second.cache_stats().shared_hits, 1);
    }

    #[test]
    fn test_local_tier_not_shared_between_contexts() {
        let source = Arc::new(CountingSource::new(source()));
        // No shared tier: each context has to fetch on its own.
        let factory = TranslatorFactory::new(registry(), source.clone());

        plain(&factory).translate("greeting.hello", None);
        plain(&factory).translate("greeting.hello", None);

        assert_eq!(source.fetches(), 2);
    }

    #[test]
    fn test_shared_cache_down_still_translates() {
        let source = Arc::new(CountingSource::new(source()));
        let factory = TranslatorFactory::new(registry(), source.clone())
            .with_shared_cache(Arc::new(DownCache));
        let mut translator = plain(&factory);

        let context = TranslationContext::new().with("user", "Sam");
        assert_eq!(translator.translate("greeting.hello", Some(&context)), "Hi Sam");
        assert_eq!(translator.translate("greeting.hello", Some(&context)), "Hi Sam");
        assert_eq!(source.fetches(), 1);
    }

    #[test]
    fn test_source_failure_degrades_to_key() {
        let source = Arc::new(CountingSource::broken());
        let factory = factory_with(source.clone());
        let mut translator = plain(&factory);

        let context = TranslationContext::new().with("user", "Sam");
        assert_eq!(translator.translate("greeting.hello", Some(&context)), "GREETING.HELLO");
        // Failures are not cached.
        translator.translate("greeting.hello", None);
        assert_eq!(source.fetches(), 2);

        assert!(translator.languages().is_empty());
        assert!(translator.keys().is_empty());
    }

    #[test]
    fn test_translate_never_panics_on_odd_input() {
        let factory = factory_with(Arc::new(CountingSource::new(source())));
        let mut translator = plain(&factory);
        let context = TranslationContext::new().with("", "empty").with("{", "brace");

        for key in ["", ".", "..", "ä.ö", "{user}", "{}", "{", "\0", "   "] {
            let out = translator.translate(key, Some(&context));
            assert_eq!(out, crate::i18n::normalize_key(key).replace("{}", "empty"));
        }
    }

    #[test]
    fn test_language_from_request_selects_document() {
        let factory = factory_with(Arc::new(CountingSource::new(source())));
        let mut translator = factory.begin(
            RequestSignals::new(Some("de-DE".to_string()), Some("fr-FR".to_string())),
            Box::new(MemoryStore::new()),
            Box::new(MemoryStore::new()),
        );

        let context = TranslationContext::new().with("user", "Sam");
        assert_eq!(translator.language().code(), "de-DE");
        assert_eq!(translator.translate("greeting.hello", Some(&context)), "Hallo Sam");
    }

    #[test]
    fn test_set_language_switches_templates() {
        let cookies = MemoryStore::with_value("lang", "fr-FR");
        let factory = factory_with(Arc::new(CountingSource::new(source())));
        let mut translator = factory.begin(
            RequestSignals::new(Some("en-US".to_string()), None),
            Box::new(cookies.clone()),
            Box::new(MemoryStore::new()),
        );

        assert_eq!(translator.translate("greeting.hello", None), "Hi {user}");
        translator.set_language("de-DE").unwrap();
        assert_eq!(translator.language().code(), "de-DE");
        assert_eq!(translator.translate("greeting.hello", None), "Hallo {user}");
        assert_eq!(cookies.value("lang").as_deref(), Some("de-DE"));
    }

    #[test]
    fn test_set_language_rejects_unsupported() {
        let factory = factory_with(Arc::new(CountingSource::new(source())));
        let mut translator = plain(&factory);
        let before = translator.language();

        assert!(translator.set_language("xx-INVALID").is_err());
        assert_eq!(translator.language(), before);
        assert!(!translator.is_supported("xx-INVALID"));
    }

    #[test]
    fn test_languages_limited_to_supported() {
        let source = source().with_document(lang("it-IT"), [("A.B", "x")]);
        let factory = factory_with(Arc::new(CountingSource::new(source)));
        let translator = plain(&factory);

        let codes: Vec<_> = translator.languages().iter().map(|l| l.code()).collect();
        assert_eq!(codes, vec!["de-DE", "en-US"]);
    }

    #[test]
    fn test_keys_for_effective_language() {
        let factory = factory_with(Arc::new(CountingSource::new(source())));
        let mut translator = plain(&factory);

        let keys: Vec<_> = translator.keys().into_iter().map(|k| k.into_string()).collect();
        assert_eq!(keys, vec!["GREETING.HELLO", "GREETING.NAMED"]);

        translator.set_language("de-DE").unwrap();
        assert_eq!(translator.keys().len(), 1);
    }
}
