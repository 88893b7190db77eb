//! Effective-language resolution.
//!
//! Precedence, first supported candidate wins:
//! 1. language already resolved (or overridden) in this context
//! 2. explicit request parameter
//! 3. cookie preference
//! 4. session preference
//! 5. first entry of the client's `Accept-Language`
//! 6. configured default

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::{LanguageCode, LanguageRegistry};
use crate::error::{GlossaError, Result};

/// Name/value store used to persist the language preference.
///
/// Implemented by the cookie-equivalent and session-equivalent stores.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, name: &str) -> Result<Option<String>>;
    fn set(&self, name: &str, value: &str) -> Result<()>;
}

/// In-memory preference store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with one value.
    pub fn with_value(name: &str, value: &str) -> Self {
        let store = Self::new();
        store.values.lock().insert(name.to_string(), value.to_string());
        store
    }

    pub fn value(&self, name: &str) -> Option<String> {
        self.values.lock().get(name).cloned()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, name: &str) -> Result<Option<String>> {
        Ok(self.value(name))
    }

    fn set(&self, name: &str, value: &str) -> Result<()> {
        self.values.lock().insert(name.to_string(), value.to_string());
        Ok(())
    }
}

/// Language signals carried by the current request.
#[derive(Debug, Clone, Default)]
pub struct RequestSignals {
    /// Explicit query/form field naming a language.
    pub parameter: Option<String>,
    /// Raw `Accept-Language` header value.
    pub accept_language: Option<String>,
}

impl RequestSignals {
    pub fn new(parameter: Option<String>, accept_language: Option<String>) -> Self {
        Self {
            parameter,
            accept_language,
        }
    }
}

/// First language tag of an `Accept-Language` value, without its `q` weight.
pub fn first_accept_language(header: &str) -> Option<&str> {
    let first = header.split(',').next()?;
    let tag = first.split(';').next().unwrap_or(first).trim();
    (!tag.is_empty()).then_some(tag)
}

/// Resolves and remembers the effective language of one execution context.
pub struct LanguageResolver {
    registry: Arc<LanguageRegistry>,
    language_key: String,
    request: RequestSignals,
    cookies: Box<dyn PreferenceStore>,
    session: Box<dyn PreferenceStore>,
    effective: Option<LanguageCode>,
}

impl LanguageResolver {
    pub fn new(
        registry: Arc<LanguageRegistry>,
        language_key: impl Into<String>,
        request: RequestSignals,
        cookies: Box<dyn PreferenceStore>,
        session: Box<dyn PreferenceStore>,
    ) -> Self {
        Self {
            registry,
            language_key: language_key.into(),
            request,
            cookies,
            session,
            effective: None,
        }
    }

    /// Effective language, resolved at most once per context.
    pub fn resolve(&mut self) -> LanguageCode {
        if let Some(language) = self.effective {
            return language;
        }
        let language = self.decide();
        self.effective = Some(language);
        language
    }

    /// Language if already resolved or overridden.
    pub fn effective(&self) -> Option<LanguageCode> {
        self.effective
    }

    pub fn is_supported(&self, code: &str) -> bool {
        self.registry.is_supported(code)
    }

    /// Override the effective language and persist it.
    ///
    /// Unsupported codes are rejected and leave the current state untouched.
    /// Store failures are logged and do not fail the call.
    pub fn set_language(&mut self, code: &str) -> Result<LanguageCode> {
        let Some(language) = self.registry.code(code) else {
            debug!("Rejected language override {:?}", code);
            return Err(GlossaError::UnsupportedLanguage(code.to_string()));
        };

        self.effective = Some(language);

        for (label, store) in [("cookie", &self.cookies), ("session", &self.session)] {
            if let Err(e) = store.set(&self.language_key, language.code()) {
                warn!("Could not persist language {} to {}: {}", language, label, e);
            }
        }

        Ok(language)
    }

    fn decide(&self) -> LanguageCode {
        let header = self
            .request
            .accept_language
            .as_deref()
            .and_then(first_accept_language)
            .map(str::to_string);

        let candidates = [
            ("request", Ok(self.request.parameter.clone())),
            ("cookie", self.cookies.get(&self.language_key)),
            ("session", self.session.get(&self.language_key)),
            ("header", Ok(header)),
        ];

        for (step, candidate) in candidates {
            match candidate {
                Ok(Some(raw)) => {
                    if let Some(language) = self.registry.code(&raw) {
                        debug!("Language {} resolved from {}", language, step);
                        return language;
                    }
                    debug!("Ignoring unsupported {} language {:?}", step, raw);
                }
                Ok(None) => {}
                Err(e) => debug!("Skipping {} language lookup: {}", step, e),
            }
        }

        let language = self.registry.default_language();
        debug!("Language {} resolved from default", language);
        language
    }
}

impl std::fmt::Debug for LanguageResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageResolver")
            .field("language_key", &self.language_key)
            .field("request", &self.request)
            .field("effective", &self.effective)
            .finish()
    }
}
