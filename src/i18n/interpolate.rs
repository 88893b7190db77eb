//! Placeholder interpolation.
//!
//! Templates use `{name}` placeholders. Every placeholder whose name is in
//! the context is replaced; unknown placeholders stay verbatim. Substituted
//! values are never scanned again, so a value containing `{x}` is inserted
//! as-is.

use std::collections::HashMap;

/// Placeholder name -> replacement value. Used at interpolation time only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationContext {
    values: HashMap<String, String>,
}

impl TranslationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value (builder pattern).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl ToString) {
        self.values.insert(name.into(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for TranslationContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = Self::new();
        for (name, value) in iter {
            context.insert(name, value);
        }
        context
    }
}

/// Substitute `{name}` placeholders in `template` from `context`.
pub fn interpolate(template: &str, context: &TranslationContext) -> String {
    if context.is_empty() || !template.contains('{') {
        return template.to_string();
    }

    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        match after.find(|c: char| c == '{' || c == '}') {
            Some(close) if after[close..].starts_with('}') => {
                let name = &after[..close];
                match context.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            // Lone or nested brace: keep it and continue after it.
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
