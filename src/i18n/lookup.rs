//! Message lookup with base-language fallback.
//!
//! [`MessageLookup`] only asks implementors for a raw `resolve`; every derived
//! lookup (key fallback, formatting, padding, list splitting) is shared, so the
//! registry and the read-only [`LanguageView`] handed to listeners behave the
//! same way.

use crate::i18n::format::{format_template, FormatArg};
use crate::i18n::store::{canonical_key, KeyValueStore};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

static LIST_SPLIT_REGEX: OnceLock<Regex> = OnceLock::new();

fn list_split_regex() -> &'static Regex {
    LIST_SPLIT_REGEX.get_or_init(|| Regex::new(r"\s*,\s*").unwrap())
}

/// Read access to localized messages.
pub trait MessageLookup {
    /// Raw template for `key`, or `None` if no store has it.
    fn resolve(&self, key: &str) -> Option<&str>;

    /// Whether `key` is known to the base language.
    fn key_exists(&self, key: &str) -> bool;

    /// Like [`resolve`](Self::resolve), but falls back to the canonical key.
    fn resolve_or_key(&self, key: &str) -> String {
        self.resolve(key)
            .map(str::to_string)
            .unwrap_or_else(|| canonical_key(key))
    }

    /// Resolve `key` and substitute `args` into it.
    ///
    /// Returns the canonical key if the entry is missing or the arguments do
    /// not fit the template.
    fn format(&self, key: &str, args: &[FormatArg]) -> String {
        let Some(template) = self.resolve(key) else {
            return canonical_key(key);
        };
        match format_template(template, args) {
            Ok(formatted) => formatted,
            Err(e) => {
                debug!("Could not format '{}': {}", canonical_key(key), e);
                canonical_key(key)
            }
        }
    }

    /// The message surrounded by single spaces, or one space if it is empty.
    fn resolve_padded(&self, key: &str) -> String {
        let value = self.resolve_or_key(key);
        if value.is_empty() {
            " ".to_string()
        } else {
            format!(" {} ", value)
        }
    }

    /// The message split on commas. Never empty.
    fn resolve_list(&self, key: &str) -> Vec<String> {
        match self.resolve(key) {
            Some(value) => split_list(value),
            None => vec![canonical_key(key)],
        }
    }
}

/// Split a comma separated list, trimming every element.
///
/// Trailing empty elements are dropped; the result always has at least one
/// element.
pub fn split_list(value: &str) -> Vec<String> {
    let mut items: Vec<String> = list_split_regex()
        .split(value)
        .map(|item| item.trim().to_string())
        .collect();
    while items.len() > 1 && items.last().is_some_and(String::is_empty) {
        items.pop();
    }
    items
}

/// An immutable snapshot of the language state.
///
/// Listeners receive one of these; a view with no overlay answers purely from
/// the base language.
#[derive(Debug, Clone, Copy)]
pub struct LanguageView<'a> {
    base: &'a KeyValueStore,
    overlay: Option<&'a KeyValueStore>,
    language: &'a str,
}

impl<'a> LanguageView<'a> {
    pub fn base_only(base: &'a KeyValueStore, language: &'a str) -> Self {
        Self {
            base,
            overlay: None,
            language,
        }
    }

    pub fn with_overlay(
        base: &'a KeyValueStore,
        overlay: &'a KeyValueStore,
        language: &'a str,
    ) -> Self {
        Self {
            base,
            overlay: Some(overlay),
            language,
        }
    }

    /// Name of the language this view answers in.
    pub fn language(&self) -> &'a str {
        self.language
    }

    pub fn uses_overlay(&self) -> bool {
        self.overlay.is_some()
    }
}

impl MessageLookup for LanguageView<'_> {
    fn resolve(&self, key: &str) -> Option<&str> {
        let key = canonical_key(key);
        self.overlay
            .and_then(|overlay| overlay.get(&key))
            .or_else(|| self.base.get(&key))
    }

    fn key_exists(&self, key: &str) -> bool {
        self.base.contains_key(key)
    }
}
