//! In-memory session store keyed by the `session` cookie.
//!
//! Ids come from clients, so the store is a bounded Moka cache: idle
//! sessions expire and the least useful ones are evicted at capacity.

use std::collections::HashMap;

use moka::sync::Cache;

use crate::cache::CacheConfig;
use crate::error::{GlossaError, Result};
use crate::i18n::PreferenceStore;

/// Cookie carrying the session id.
pub const SESSION_COOKIE: &str = "session";

/// All sessions of the process.
///
/// Clones share the same sessions.
#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Cache<String, HashMap<String, String>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::with_config(&CacheConfig::session_data())
    }

    pub fn with_config(config: &CacheConfig) -> Self {
        Self {
            sessions: config.build(),
        }
    }

    /// Handle for one request. `id` is `None` when the client sent no session.
    pub fn open(&self, id: Option<String>) -> SessionHandle {
        SessionHandle {
            sessions: self.sessions.clone(),
            id,
        }
    }

    /// Live sessions, after pending evictions are applied.
    pub fn len(&self) -> u64 {
        self.sessions.run_pending_tasks();
        self.sessions.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("entry_count", &self.sessions.entry_count())
            .finish()
    }
}

/// Session-equivalent store for one request.
#[derive(Clone)]
pub struct SessionHandle {
    sessions: Cache<String, HashMap<String, String>>,
    id: Option<String>,
}

impl PreferenceStore for SessionHandle {
    fn get(&self, name: &str) -> Result<Option<String>> {
        let Some(id) = &self.id else {
            return Ok(None);
        };
        Ok(self
            .sessions
            .get(id)
            .and_then(|session| session.get(name).cloned()))
    }

    fn set(&self, name: &str, value: &str) -> Result<()> {
        let Some(id) = &self.id else {
            return Err(GlossaError::PersistenceFailure {
                store: "session",
                reason: "request carries no session".to_string(),
            });
        };
        let mut session = self.sessions.get(id).unwrap_or_default();
        session.insert(name.to_string(), value.to_string());
        self.sessions.insert(id.clone(), session);
        Ok(())
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle").field("id", &self.id).finish()
    }
}
