//! Translation sources - where raw templates come from.
//!
//! A source is picked at construction time and injected into the
//! translator. It is only consulted after both cache tiers miss.

mod json;
mod memory;

pub use json::JsonSource;
pub use memory::MemorySource;

use crate::error::Result;
use crate::i18n::{LanguageCode, TranslationKey};

/// Raw key -> template lookup for one storage backend.
pub trait TranslationSource: Send + Sync {
    /// Template for `key`, or the key itself when there is no entry.
    ///
    /// `Err` means the backend could not be read at all.
    fn fetch_template(&self, language: LanguageCode, key: &TranslationKey) -> Result<String>;

    /// Known languages the backend has content for.
    fn list_languages(&self) -> Result<Vec<LanguageCode>>;

    /// Every key available for `language`.
    fn keys(&self, language: LanguageCode) -> Result<Vec<TranslationKey>>;
}
