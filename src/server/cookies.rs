//! Cookie-backed preference store.

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use parking_lot::Mutex;

use crate::error::{GlossaError, Result};
use crate::i18n::PreferenceStore;

/// One year.
const COOKIE_MAX_AGE: u64 = 31_536_000;

/// Parse a `Cookie` header value into name/value pairs.
pub fn parse_cookie_header(header: &str) -> HashMap<String, String> {
    header
        .split(';')
        .filter_map(|pair| pair.split_once('='))
        .map(|(name, value)| (name.trim().to_string(), value.trim().trim_matches('"').to_string()))
        .filter(|(name, _)| !name.is_empty())
        .collect()
}

fn is_cookie_safe(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_graphic() && !matches!(c, ';' | ',' | '"' | '\\'))
}

#[derive(Debug, Default)]
struct JarState {
    values: HashMap<String, String>,
    pending: Vec<(String, String)>,
}

/// Request cookies plus the ones to send back.
///
/// Clones share state so the handler can read what the translator wrote.
#[derive(Debug, Clone, Default)]
pub struct CookieJar {
    state: Arc<Mutex<JarState>>,
}

impl CookieJar {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let values = headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(parse_cookie_header)
            .collect();

        Self {
            state: Arc::new(Mutex::new(JarState {
                values,
                pending: Vec::new(),
            })),
        }
    }

    pub fn value(&self, name: &str) -> Option<String> {
        self.state.lock().values.get(name).cloned()
    }

    /// `Set-Cookie` header values for every cookie written.
    pub fn set_cookie_headers(&self) -> Vec<String> {
        self.state
            .lock()
            .pending
            .iter()
            .map(|(name, value)| {
                format!(
                    "{}={}; Path=/; Max-Age={}; SameSite=Lax",
                    name, value, COOKIE_MAX_AGE
                )
            })
            .collect()
    }
}

impl PreferenceStore for CookieJar {
    fn get(&self, name: &str) -> Result<Option<String>> {
        Ok(self.value(name))
    }

    fn set(&self, name: &str, value: &str) -> Result<()> {
        if !is_cookie_safe(name) || !is_cookie_safe(value) {
            return Err(GlossaError::PersistenceFailure {
                store: "cookie",
                reason: format!("{:?}={:?} is not a valid cookie", name, value),
            });
        }

        let mut state = self.state.lock();
        state.values.insert(name.to_string(), value.to_string());
        state.pending.retain(|(pending, _)| pending != name);
        state.pending.push((name.to_string(), value.to_string()));
        Ok(())
    }
}
