//! Glossa - translation lookup with language negotiation and caching.
//!
//! Resolves a translation key for the language chosen by the current
//! request into an interpolated string, keeping lookups against the slow
//! backing store to a minimum.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `i18n` - Key normalization, language codes, language resolution, interpolation
//! - `source` - Translation sources (JSON files, in-memory)
//! - `cache` - Process-local and shared cache tiers (Moka)
//! - `hook` - Notifications about missing resources
//! - `service` - The per-context `Translator` and its factory
//! - `server` - HTTP surface (axum)
//!
//! ## Example
//!
//! ```rust,ignore
//! let factory = TranslatorFactory::from_config(&Config::from_env(), Arc::new(LogHook));
//! let mut translator = factory.begin(request, Box::new(cookies), Box::new(session));
//! let context = TranslationContext::new().with("user", "Sam");
//! let text = translator.translate("greeting.hello", Some(&context));
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod hook;
pub mod i18n;
pub mod server;
pub mod service;
pub mod source;

pub use error::{GlossaError, Result};
pub use i18n::{LanguageCode, TranslationContext, TranslationKey};
pub use service::{Translator, TranslatorFactory};
