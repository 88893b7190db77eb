//! Configuration module for Glossa.
//!
//! Loads configuration from environment variables. Every value is optional.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::cache::CacheConfig;
use crate::i18n::FALLBACK_LANGUAGE;

/// Log filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "glossa=info,tower_http=warn";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `<language>.json` documents.
    pub translation_dir: PathBuf,

    pub default_language: String,

    /// Supported subset of the known languages. Empty means all of them.
    pub supported_languages: Vec<String>,

    /// Request field, cookie and session name carrying the language.
    pub language_key: String,

    /// Prefix of every shared cache group name.
    pub cache_prefix: String,
    pub cache: CacheConfig,

    // HTTP
    pub bind_addr: SocketAddr,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translation_dir: PathBuf::from("translation/"),
            default_language: FALLBACK_LANGUAGE.to_string(),
            supported_languages: Vec::new(),
            language_key: "lang".to_string(),
            cache_prefix: "GLOSSA_".to_string(),
            cache: CacheConfig::default(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
        }
    }
}

impl Config {
    /// Load configuration from `.env` and environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Unparseable values are logged and replaced by their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let supported_languages = var("SUPPORTED_LANGUAGES")
            .map(|list| {
                list.split(',')
                    .map(|code| code.trim().to_string())
                    .filter(|code| !code.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let max_capacity = match var("CACHE_MAX_CAPACITY").map(|raw| raw.parse::<u64>()) {
            Some(Ok(capacity)) => capacity,
            Some(Err(e)) => {
                warn!("Invalid CACHE_MAX_CAPACITY ({}), using default", e);
                defaults.cache.max_capacity
            }
            None => defaults.cache.max_capacity,
        };

        let mut cache = CacheConfig::with_capacity(max_capacity);
        match var("CACHE_TTL_SECS").map(|raw| raw.parse::<u64>()) {
            Some(Ok(0)) => cache = cache.no_ttl(),
            Some(Ok(secs)) => cache = cache.ttl(Duration::from_secs(secs)),
            Some(Err(e)) => warn!("Invalid CACHE_TTL_SECS ({}), using default", e),
            None => {}
        }

        let bind_addr = match var("BIND_ADDR").map(|raw| raw.parse::<SocketAddr>()) {
            Some(Ok(addr)) => addr,
            Some(Err(e)) => {
                warn!("Invalid BIND_ADDR ({}), using {}", e, defaults.bind_addr);
                defaults.bind_addr
            }
            None => defaults.bind_addr,
        };

        Self {
            translation_dir: var("TRANSLATION_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.translation_dir),
            default_language: var("DEFAULT_LANGUAGE").unwrap_or(defaults.default_language),
            supported_languages,
            language_key: var("LANGUAGE_KEY").unwrap_or(defaults.language_key),
            cache_prefix: var("CACHE_PREFIX").unwrap_or(defaults.cache_prefix),
            cache,
            bind_addr,
        }
    }
}
