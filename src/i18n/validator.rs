//! Translation completeness validation.
//!
//! Compares the key sets of the base language and a freshly loaded overlay to
//! find messages that were never translated and entries that do not exist in
//! the base language at all.

use crate::i18n::grammar::GENDERS_SECTION;
use crate::i18n::store::KeyValueStore;
use serde::Serialize;
use std::collections::BTreeSet;

/// Validation report for one overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Keys present in the base language but not in the overlay
    pub missing: BTreeSet<String>,

    /// Keys present in the overlay but unknown to the base language
    pub superfluous: BTreeSet<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_missing(&self) -> bool {
        !self.missing.is_empty()
    }

    pub fn has_superfluous(&self) -> bool {
        !self.superfluous.is_empty()
    }

    /// Check if the overlay matches the base key for key
    pub fn is_clean(&self) -> bool {
        !self.has_missing() && !self.has_superfluous()
    }
}

/// Validator for translation completeness.
pub struct TranslationValidator;

impl TranslationValidator {
    /// Diff the key sets of `base` and `overlay`.
    ///
    /// Keys under the grammatical gender section are exempt: they describe
    /// per-language grammar and legitimately differ between languages.
    pub fn validate(base: &KeyValueStore, overlay: &KeyValueStore) -> ValidationReport {
        let base_keys = base.key_set();
        let overlay_keys = overlay.key_set();

        ValidationReport {
            missing: Self::without_exempt(base_keys.difference(&overlay_keys).copied()),
            superfluous: Self::without_exempt(overlay_keys.difference(&base_keys).copied()),
        }
    }

    pub fn is_exempt(key: &str) -> bool {
        key.starts_with(GENDERS_SECTION)
    }

    fn without_exempt<'a>(keys: impl Iterator<Item = &'a str>) -> BTreeSet<String> {
        keys.filter(|key| !Self::is_exempt(key))
            .map(str::to_string)
            .collect()
    }
}
