//! Case-insensitive key/value storage for language entries.

use std::collections::{HashMap, HashSet};

/// Normalize a lookup key to its canonical (lowercase) form.
///
/// All stores hash and compare keys exclusively in this form.
pub fn canonical_key(key: &str) -> String {
    key.to_lowercase()
}

/// Mapping from canonical key to raw message template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValueStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a single entry, overwriting any previous value for the key.
    pub fn put(&mut self, key: &str, value: impl Into<String>) {
        self.entries.insert(canonical_key(key), value.into());
    }

    /// Merge entries into the store. Later entries for the same key win.
    pub fn put_all<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, value) in entries {
            self.put(key.as_ref(), value);
        }
    }

    /// Merge another store into this one, `other` taking precedence.
    pub fn merge(&mut self, other: KeyValueStore) {
        // Keys in `other` are already canonical
        self.entries.extend(other.entries);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&canonical_key(key)).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&canonical_key(key))
    }

    /// Remove an entry, returning its value if present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(&canonical_key(key))
    }

    /// The set of canonical keys.
    pub fn key_set(&self) -> HashSet<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for KeyValueStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = KeyValueStore::new();
        store.put_all(iter);
        store
    }
}
