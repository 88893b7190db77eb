//! Internationalization (i18n) module.
//!
//! Handles key normalization, language codes, resolving the effective
//! language for a context and placeholder interpolation.

mod interpolate;
mod key;
mod language;
mod resolver;

pub use interpolate::{TranslationContext, interpolate};
pub use key::{KEY_DELIMITER, TranslationKey, normalize_key};
pub use language::{FALLBACK_LANGUAGE, KNOWN_LANGUAGES, LanguageCode, LanguageRegistry};
pub use resolver::{
    LanguageResolver, MemoryStore, PreferenceStore, RequestSignals, first_accept_language,
};
