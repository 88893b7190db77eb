//! Process-local cache tier - owned by one execution context.

use std::collections::HashMap;

use crate::i18n::{LanguageCode, TranslationKey};

/// Templates already seen by this context. Never shared, dropped with it.
#[derive(Debug, Default)]
pub struct LocalCache {
    entries: HashMap<(LanguageCode, TranslationKey), String>,
}

impl LocalCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, language: LanguageCode, key: &TranslationKey) -> Option<&str> {
        self.entries
            .get(&(language, key.clone()))
            .map(String::as_str)
    }

    pub fn insert(&mut self, language: LanguageCode, key: &TranslationKey, template: &str) {
        self.entries
            .insert((language, key.clone()), template.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
