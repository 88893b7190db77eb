//! JSON-file translation source.
//!
//! One document per language, `<dir>/<code>.json`. Documents are objects of
//! key -> template; nested objects are flattened with the key delimiter, so
//! `{"greeting": {"hello": "Hi"}}` provides `GREETING.HELLO`.
//!
//! Parsed documents are kept in a short-lived Moka cache, so a burst of
//! misses for one language costs a single read of its file.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use moka::sync::Cache;
use parking_lot::Mutex;
use serde_json::{Map, Value, json};
use tracing::debug;

use super::TranslationSource;
use crate::cache::CacheConfig;
use crate::error::{GlossaError, Result};
use crate::hook::{NotificationHook, TRANSLATION_FILE_MISSING};
use crate::i18n::{KEY_DELIMITER, LanguageCode, TranslationKey, normalize_key};

type Document = Arc<HashMap<String, String>>;

/// Reads templates from a directory of JSON documents.
pub struct JsonSource {
    dir: PathBuf,
    hook: Arc<dyn NotificationHook>,
    documents: Cache<LanguageCode, Document>,
    /// Paths already reported as missing.
    reported: Mutex<HashSet<PathBuf>>,
}

impl JsonSource {
    pub fn new(dir: impl Into<PathBuf>, hook: Arc<dyn NotificationHook>) -> Self {
        Self::with_cache_config(dir, hook, &CacheConfig::document_data())
    }

    pub fn with_cache_config(
        dir: impl Into<PathBuf>,
        hook: Arc<dyn NotificationHook>,
        config: &CacheConfig,
    ) -> Self {
        Self {
            dir: dir.into(),
            hook,
            documents: config.build(),
            reported: Mutex::new(HashSet::new()),
        }
    }

    fn document_path(&self, language: LanguageCode) -> PathBuf {
        self.dir.join(format!("{}.json", language.code()))
    }

    /// Cached document for `language`. Failed loads are not cached.
    fn document(&self, language: LanguageCode) -> Result<Document> {
        if let Some(document) = self.documents.get(&language) {
            return Ok(document);
        }
        let document = Arc::new(self.load(language)?);
        self.documents.insert(language, Arc::clone(&document));
        Ok(document)
    }

    /// Read and flatten the document for `language`.
    ///
    /// A missing file is reported once and yields an empty document.
    fn load(&self, language: LanguageCode) -> Result<HashMap<String, String>> {
        let path = self.document_path(language);

        if !path.is_file() {
            self.report_missing(&path, language);
            return Ok(HashMap::new());
        }

        let raw = fs::read_to_string(&path).map_err(|e| GlossaError::SourceUnavailable {
            resource: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let value: Value = serde_json::from_str(&raw).map_err(|e| GlossaError::InvalidDocument {
            resource: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let Value::Object(object) = value else {
            return Err(GlossaError::InvalidDocument {
                resource: path.display().to_string(),
                reason: "top level is not an object".to_string(),
            });
        };

        let mut entries = HashMap::new();
        flatten("", &object, &mut entries);
        debug!("Loaded {} templates from {}", entries.len(), path.display());
        Ok(entries)
    }

    fn report_missing(&self, path: &Path, language: LanguageCode) {
        if !self.reported.lock().insert(path.to_path_buf()) {
            return;
        }
        self.hook.fire(
            TRANSLATION_FILE_MISSING,
            &json!({
                "path": path.display().to_string(),
                "language": language.code(),
                "at": chrono::Utc::now().to_rfc3339(),
            }),
        );
    }
}

fn flatten(prefix: &str, object: &Map<String, Value>, out: &mut HashMap<String, String>) {
    for (name, value) in object {
        let key = if prefix.is_empty() {
            normalize_key(name)
        } else {
            format!("{}{}{}", prefix, KEY_DELIMITER, normalize_key(name))
        };
        match value {
            Value::String(template) => {
                out.insert(key, template.clone());
            }
            Value::Object(nested) => flatten(&key, nested, out),
            _ => debug!("Skipping non-string template {}", key),
        }
    }
}

impl TranslationSource for JsonSource {
    fn fetch_template(&self, language: LanguageCode, key: &TranslationKey) -> Result<String> {
        let document = self.document(language)?;
        Ok(document
            .get(key.as_str())
            .cloned()
            .unwrap_or_else(|| key.to_string()))
    }

    fn list_languages(&self) -> Result<Vec<LanguageCode>> {
        let entries = fs::read_dir(&self.dir).map_err(|e| GlossaError::SourceUnavailable {
            resource: self.dir.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut languages: Vec<LanguageCode> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| {
                path.file_stem()
                    .and_then(|stem| stem.to_str())
                    .and_then(LanguageCode::known)
            })
            .collect();
        languages.sort();
        languages.dedup();
        Ok(languages)
    }

    fn keys(&self, language: LanguageCode) -> Result<Vec<TranslationKey>> {
        let mut keys: Vec<TranslationKey> = self
            .document(language)?
            .keys()
            .map(|key| TranslationKey::new(key))
            .collect();
        keys.sort();
        Ok(keys)
    }
}

impl std::fmt::Debug for JsonSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonSource")
            .field("dir", &self.dir)
            .field("cached_documents", &self.documents.entry_count())
            .field("reported_missing", &self.reported.lock().len())
            .finish()
    }
}
