//! Translation key normalization.
//!
//! Keys look like `context.distinct-key` and are compared in uppercase form.
//! Case folding is ASCII-only so the result never depends on a locale.

use std::fmt;

/// Separator between the context and the distinct part of a key.
pub const KEY_DELIMITER: char = '.';

/// Canonicalize a raw key. Total and idempotent.
pub fn normalize_key(key: &str) -> String {
    key.to_ascii_uppercase()
}

/// A normalized translation key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TranslationKey(String);

impl TranslationKey {
    /// Normalize `raw` into a key.
    pub fn new(raw: &str) -> Self {
        Self(normalize_key(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Segment before the first delimiter, empty if there is none.
    pub fn context(&self) -> &str {
        self.0
            .split_once(KEY_DELIMITER)
            .map(|(context, _)| context)
            .unwrap_or("")
    }

    /// Everything after the first delimiter, or the whole key.
    pub fn distinct(&self) -> &str {
        self.0
            .split_once(KEY_DELIMITER)
            .map(|(_, distinct)| distinct)
            .unwrap_or(&self.0)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TranslationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TranslationKey {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl AsRef<str> for TranslationKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
