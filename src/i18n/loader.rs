//! Language resource loading.
//!
//! Resources are located through [`ResourceProvider`]s and turned into flat
//! key/value maps by a [`LangParser`]. The registry only ever sees the
//! resulting [`LoadOutcome`], so a missing or broken file never takes the
//! whole registry down.

use crate::i18n::store::KeyValueStore;
use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Reserved metadata key carrying a resource's version.
pub const VERSION_KEY: &str = "version";

/// File extension of language resources.
pub const LANG_EXTENSION: &str = "lang";

/// Something that can hand out the raw text of a resource by relative path.
pub trait ResourceProvider: Send {
    /// Read the resource at `relative_path`.
    ///
    /// Returns `Ok(None)` if the resource does not exist.
    fn open(&self, relative_path: &str) -> Result<Option<String>>;

    /// Short human-readable description used in diagnostics.
    fn describe(&self) -> String;
}

/// Resources held in memory, e.g. compiled into the host binary.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    files: HashMap<String, String>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource at `relative_path`.
    pub fn with_file(
        mut self,
        relative_path: impl Into<String>,
        contents: impl Into<String>,
    ) -> Self {
        self.files.insert(relative_path.into(), contents.into());
        self
    }
}

impl ResourceProvider for MemoryProvider {
    fn open(&self, relative_path: &str) -> Result<Option<String>> {
        Ok(self.files.get(relative_path).cloned())
    }

    fn describe(&self) -> String {
        "bundled resources".to_string()
    }
}

/// Resources read from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    root: PathBuf,
}

impl DirectoryProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceProvider for DirectoryProvider {
    fn open(&self, relative_path: &str) -> Result<Option<String>> {
        let path = self.root.join(relative_path);
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// Turns the text of a resource into a flat key/value map.
pub trait LangParser: Send {
    fn parse(&self, name: &str, contents: &str) -> Result<HashMap<String, String>>;
}

/// Parses JSON resources, flattening nested objects with `.` separators.
///
/// `{"menu": {"title": "Main"}}` becomes `menu.title = Main`. Numbers and
/// booleans are stringified, arrays are joined with `, ` and nulls are
/// skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLangParser;

impl JsonLangParser {
    fn flatten(prefix: &str, value: &Value, out: &mut HashMap<String, String>) {
        let scalar = match value {
            Value::Object(map) => {
                for (key, child) in map {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{}.{}", prefix, key)
                    };
                    Self::flatten(&path, child, out);
                }
                return;
            }
            Value::Null => return,
            Value::String(s) => s.clone(),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
            other => other.to_string(),
        };
        out.insert(prefix.to_string(), scalar);
    }
}

impl LangParser for JsonLangParser {
    fn parse(&self, name: &str, contents: &str) -> Result<HashMap<String, String>> {
        let value: Value = serde_json::from_str(contents)
            .with_context(|| format!("Could not parse the language file '{}'", name))?;
        if !value.is_object() {
            bail!("The language file '{}' must contain an object at the top level", name);
        }
        let mut out = HashMap::new();
        Self::flatten("", &value, &mut out);
        Ok(out)
    }
}

/// A successfully loaded resource with its version marker extracted.
#[derive(Debug, Clone, Default)]
pub struct LoadedResource {
    pub entries: KeyValueStore,
    pub version: Option<String>,
}

/// Outcome of loading a single resource.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    Loaded(LoadedResource),
    NotFound,
    Failed(String),
}

/// Reads resources from providers and parses them.
pub struct FileLoader {
    parser: Box<dyn LangParser>,
}

impl FileLoader {
    pub fn new(parser: impl LangParser + 'static) -> Self {
        Self {
            parser: Box::new(parser),
        }
    }

    pub fn load(&self, provider: &dyn ResourceProvider, relative_path: &str) -> LoadOutcome {
        let contents = match provider.open(relative_path) {
            Ok(Some(contents)) => contents,
            Ok(None) => return LoadOutcome::NotFound,
            Err(e) => return LoadOutcome::Failed(format!("{:#}", e)),
        };

        match self.parser.parse(relative_path, &contents) {
            Ok(map) => {
                let mut entries: KeyValueStore = map.into_iter().collect();
                let version = entries.remove(VERSION_KEY);
                LoadOutcome::Loaded(LoadedResource { entries, version })
            }
            Err(e) => LoadOutcome::Failed(format!("{:#}", e)),
        }
    }
}

impl Default for FileLoader {
    fn default() -> Self {
        Self::new(JsonLangParser)
    }
}

impl fmt::Debug for FileLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileLoader").finish_non_exhaustive()
    }
}

/// An independently versioned provider of language resources.
///
/// `bundled` holds the resources shipped with the source. `overrides` are
/// consulted after it, in order, when loading an alternate language; their
/// entries replace bundled ones key by key.
pub struct ExtensionSource {
    name: String,
    language_dir: Option<String>,
    bundled: Box<dyn ResourceProvider>,
    overrides: Vec<Box<dyn ResourceProvider>>,
}

impl ExtensionSource {
    pub fn new(
        name: impl Into<String>,
        language_dir: impl Into<String>,
        bundled: impl ResourceProvider + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            language_dir: Some(language_dir.into()),
            bundled: Box::new(bundled),
            overrides: Vec::new(),
        }
    }

    /// A source that ships no language files at all.
    pub fn without_languages(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            language_dir: None,
            bundled: Box::new(MemoryProvider::new()),
            overrides: Vec::new(),
        }
    }

    /// Add an override provider (e.g. the source's data directory).
    pub fn with_override(mut self, provider: impl ResourceProvider + 'static) -> Self {
        self.overrides.push(Box::new(provider));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn language_dir(&self) -> Option<&str> {
        self.language_dir.as_deref()
    }

    /// Relative path of `language`'s resource, or `None` if the source has
    /// no language directory.
    pub fn resource_path(&self, language: &str) -> Option<String> {
        self.language_dir
            .as_ref()
            .map(|dir| format!("{}/{}.{}", dir, language, LANG_EXTENSION))
    }

    pub fn bundled(&self) -> &dyn ResourceProvider {
        self.bundled.as_ref()
    }

    /// Providers in merge order: bundled first, then each override.
    pub fn providers(&self) -> impl Iterator<Item = &dyn ResourceProvider> {
        std::iter::once(self.bundled.as_ref()).chain(self.overrides.iter().map(|p| p.as_ref()))
    }
}

impl fmt::Debug for ExtensionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionSource")
            .field("name", &self.name)
            .field("language_dir", &self.language_dir)
            .field("overrides", &self.overrides.len())
            .finish()
    }
}

impl fmt::Display for ExtensionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
