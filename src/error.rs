//! Error types shared by every collaborator boundary.
//!
//! Only `Translator::set_language` lets one of these reach the caller.
//! Everything else is collapsed into a degraded result by the translator.

use thiserror::Error;

/// Failures reported by language resolution, sources, caches and stores.
#[derive(Debug, Error)]
pub enum GlossaError {
    /// Requested language code is not in the supported set.
    #[error("unsupported language: {0:?}")]
    UnsupportedLanguage(String),

    /// Backing store could not be read.
    #[error("translation source unavailable ({resource}): {reason}")]
    SourceUnavailable { resource: String, reason: String },

    /// Backing document exists but is not a usable key/template map.
    #[error("invalid translation document ({resource}): {reason}")]
    InvalidDocument { resource: String, reason: String },

    /// Shared cache service rejected or failed an operation.
    #[error("shared cache unavailable: {0}")]
    CacheUnavailable(String),

    /// Cookie or session store refused a write.
    #[error("failed to persist language to {store}: {reason}")]
    PersistenceFailure { store: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, GlossaError>;
