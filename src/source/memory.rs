//! In-memory translation source.

use std::collections::HashMap;

use super::TranslationSource;
use crate::error::Result;
use crate::i18n::{LanguageCode, TranslationKey};

/// Templates held in memory, keyed by language and normalized key.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<LanguageCode, HashMap<TranslationKey, String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add entries for a language (builder pattern).
    #[must_use]
    pub fn with_document<K, V>(
        mut self,
        language: LanguageCode,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let document = self.documents.entry(language).or_default();
        for (key, template) in entries {
            document.insert(TranslationKey::new(key.as_ref()), template.into());
        }
        self
    }

    pub fn insert(&mut self, language: LanguageCode, key: &str, template: impl Into<String>) {
        self.documents
            .entry(language)
            .or_default()
            .insert(TranslationKey::new(key), template.into());
    }
}

impl TranslationSource for MemorySource {
    fn fetch_template(&self, language: LanguageCode, key: &TranslationKey) -> Result<String> {
        Ok(self
            .documents
            .get(&language)
            .and_then(|document| document.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string()))
    }

    fn list_languages(&self) -> Result<Vec<LanguageCode>> {
        let mut languages: Vec<_> = self.documents.keys().copied().collect();
        languages.sort();
        Ok(languages)
    }

    fn keys(&self, language: LanguageCode) -> Result<Vec<TranslationKey>> {
        let mut keys: Vec<_> = self
            .documents
            .get(&language)
            .map(|document| document.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        Ok(keys)
    }
}
