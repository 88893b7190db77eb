//! Fire-and-forget notifications about missing backing resources.

use serde_json::Value;
use tracing::warn;

/// Fired when a language document does not exist.
pub const TRANSLATION_FILE_MISSING: &str = "TRANSLATION_FILE_MISSING";

/// Receives named events with a JSON payload. Must not fail.
pub trait NotificationHook: Send + Sync {
    fn fire(&self, event: &str, payload: &Value);
}

/// Default hook: writes every event to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogHook;

impl NotificationHook for LogHook {
    fn fire(&self, event: &str, payload: &Value) {
        warn!("{}: {}", event, payload);
    }
}
