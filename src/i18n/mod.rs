//! Runtime localization registry.
//!
//! This module holds the base language every extension source ships, an
//! optional overlay of an alternate language, and the machinery around them:
//! lookups with fallback, change listeners, version skew detection and
//! translation completeness checks.
//!
//! # Architecture
//!
//! - `store`: Case-insensitive key/value storage
//! - `loader`: Resource providers, parsers and extension sources
//! - `version`: Language file versions and per-source base version tracking
//! - `listeners`: Prioritized language change observers
//! - `lookup`: Lookup operations shared by the registry and its views
//! - `format`: Printf-style template substitution
//! - `validator`: Missing/superfluous translation detection
//! - `diagnostics`: Recorded warnings and errors
//! - `metrics`: Lookup observability
//! - `grammar`: Noun flags and the gender section prefix
//! - `registry`: The `LanguageRegistry` tying it all together
//!
//! # Example
//!
//! ```rust,ignore
//! use lang_registry::i18n::{ExtensionSource, LanguageRegistry, MemoryProvider, MessageLookup};
//!
//! let mut registry = LanguageRegistry::default();
//! registry.load_base(ExtensionSource::new("core", "lang", provider))?;
//!
//! if registry.switch_language("german") {
//!     registry.set_overlay_enabled(true);
//! }
//! let title = registry.resolve_or_key("menu.title");
//! ```

mod diagnostics;
mod format;
mod grammar;
mod listeners;
mod loader;
mod lookup;
mod metrics;
mod registry;
mod store;
mod validator;
mod version;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use format::{format_template, FormatArg, FormatError};
pub use grammar::{NounFlags, GENDERS_SECTION};
pub use listeners::{
    LanguageChangeListener, ListenerFailure, ListenerHandle, ListenerPriority, ListenerRegistry,
};
pub use loader::{
    DirectoryProvider, ExtensionSource, FileLoader, JsonLangParser, LangParser, LoadOutcome,
    LoadedResource, MemoryProvider, ResourceProvider, LANG_EXTENSION, VERSION_KEY,
};
pub use lookup::{split_list, LanguageView, MessageLookup};
pub use metrics::{LookupMetrics, MetricsReport};
pub use registry::LanguageRegistry;
pub use store::{canonical_key, KeyValueStore};
pub use validator::{TranslationValidator, ValidationReport};
pub use version::{Version, VersionCheck, VersionParseError, VersionTracker};
