//! Language registry: owner of the base and overlay languages.
//!
//! Every extension source registers its base language once via
//! [`LanguageRegistry::load_base`]. An alternate language can then be layered
//! on top with [`LanguageRegistry::switch_language`]; lookups prefer the
//! overlay while overlay lookups are enabled and fall back to the base
//! language otherwise.
//!
//! The registry is a plain value. [`LanguageRegistry::global`] offers a
//! process-wide instance for hosts that want one, but nothing here depends on
//! it.

use crate::config::{RegistryConfig, Verbosity};
use crate::error::RegistryError;
use crate::i18n::diagnostics::{Diagnostic, Diagnostics};
use crate::i18n::listeners::{
    LanguageChangeListener, ListenerFailure, ListenerHandle, ListenerPriority, ListenerRegistry,
};
use crate::i18n::loader::{ExtensionSource, FileLoader, LoadOutcome, LoadedResource};
use crate::i18n::lookup::{LanguageView, MessageLookup};
use crate::i18n::metrics::LookupMetrics;
use crate::i18n::store::{canonical_key, KeyValueStore};
use crate::i18n::validator::{TranslationValidator, ValidationReport};
use crate::i18n::version::{Version, VersionCheck, VersionTracker};
use std::sync::{Mutex, OnceLock};
use tracing::{debug, info};

/// Global registry instance (initialized lazily)
static GLOBAL: OnceLock<Mutex<LanguageRegistry>> = OnceLock::new();

#[derive(Debug)]
pub struct LanguageRegistry {
    config: RegistryConfig,
    loader: FileLoader,
    base: KeyValueStore,
    /// Most recently loaded alternate language; survives failed switches
    overlay: Option<KeyValueStore>,
    active_language: String,
    overlay_enabled: bool,
    versions: VersionTracker,
    sources: Vec<ExtensionSource>,
    listeners: ListenerRegistry,
    diagnostics: Diagnostics,
    metrics: LookupMetrics,
    last_validation: Option<ValidationReport>,
}

impl LanguageRegistry {
    pub fn new(config: RegistryConfig) -> Self {
        Self::with_loader(config, FileLoader::default())
    }

    pub fn with_loader(config: RegistryConfig, loader: FileLoader) -> Self {
        let active_language = config.base_language.clone();
        Self {
            config,
            loader,
            base: KeyValueStore::new(),
            overlay: None,
            active_language,
            overlay_enabled: false,
            versions: VersionTracker::new(),
            sources: Vec::new(),
            listeners: ListenerRegistry::new(),
            diagnostics: Diagnostics::new(),
            metrics: LookupMetrics::new(),
            last_validation: None,
        }
    }

    /// Process-wide registry, configured from the environment on first use.
    pub fn global() -> &'static Mutex<LanguageRegistry> {
        GLOBAL.get_or_init(|| Mutex::new(LanguageRegistry::new(RegistryConfig::from_env())))
    }

    // ==================== State ====================

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn base_language(&self) -> &str {
        &self.config.base_language
    }

    /// Name of the loaded language, or the base language if none is loaded.
    pub fn active_language(&self) -> &str {
        &self.active_language
    }

    /// Name of the language lookups currently answer in.
    pub fn effective_language(&self) -> &str {
        if self.overlay_enabled {
            &self.active_language
        } else {
            &self.config.base_language
        }
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn is_overlay_enabled(&self) -> bool {
        self.overlay_enabled
    }

    pub fn base(&self) -> &KeyValueStore {
        &self.base
    }

    pub fn overlay(&self) -> Option<&KeyValueStore> {
        self.overlay.as_ref()
    }

    pub fn sources(&self) -> &[ExtensionSource] {
        &self.sources
    }

    pub fn base_version(&self, source: &str) -> Option<&Version> {
        self.versions.base_version(source)
    }

    /// Validation report of the most recent successful switch.
    pub fn last_validation(&self) -> Option<&ValidationReport> {
        self.last_validation.as_ref()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.records()
    }

    pub fn take_diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.take()
    }

    pub fn metrics(&self) -> &LookupMetrics {
        &self.metrics
    }

    /// Snapshot of the state lookups currently see.
    pub fn view(&self) -> LanguageView<'_> {
        match self.active_overlay() {
            Some(overlay) => LanguageView::with_overlay(&self.base, overlay, &self.active_language),
            None => LanguageView::base_only(&self.base, &self.config.base_language),
        }
    }

    /// Snapshot that answers purely from the base language.
    pub fn base_view(&self) -> LanguageView<'_> {
        LanguageView::base_only(&self.base, &self.config.base_language)
    }

    fn active_overlay(&self) -> Option<&KeyValueStore> {
        if self.overlay_enabled {
            self.overlay.as_ref()
        } else {
            None
        }
    }

    // ==================== Base Languages ====================

    /// Load the base language of `source` and register the source.
    ///
    /// A source without a language directory is registered without loading
    /// anything. Listeners are notified after the new entries are merged.
    pub fn load_base(&mut self, source: ExtensionSource) -> Result<(), RegistryError> {
        if self.sources.iter().any(|s| s.name() == source.name()) {
            return Err(RegistryError::BaseAlreadyLoaded {
                source_name: source.name().to_string(),
            });
        }

        let Some(path) = source.resource_path(&self.config.base_language) else {
            debug!("{} has no language files", source);
            self.sources.push(source);
            return Ok(());
        };

        let resource = match self.loader.load(source.bundled(), &path) {
            LoadOutcome::Loaded(resource) => resource,
            LoadOutcome::NotFound => {
                return Err(RegistryError::MissingBaseLanguage {
                    source_name: source.name().to_string(),
                    path,
                })
            }
            LoadOutcome::Failed(message) => {
                return Err(RegistryError::BaseLoadFailed {
                    source_name: source.name().to_string(),
                    message,
                })
            }
        };

        let version = match resource.version.as_deref().map(str::parse::<Version>) {
            Some(Ok(version)) => Some(version),
            Some(Err(e)) => {
                self.diagnostics.warning(format!(
                    "Illegal version syntax in {}'s language file {}.lang: {}",
                    source, self.config.base_language, e
                ));
                None
            }
            None => {
                debug!(
                    "{}'s {} language file declares no version",
                    source, self.config.base_language
                );
                None
            }
        };
        self.versions.record_base_version(source.name(), version);

        info!(
            "Loaded {} {} messages from {}",
            resource.entries.len(),
            self.config.base_language,
            source
        );
        self.base.merge(resource.entries);
        self.sources.push(source);
        self.notify_all();
        Ok(())
    }

    // ==================== Language Switching ====================

    /// Switch to `name`, loading its resources from every known source.
    ///
    /// Returns `false` if no source provides the language; the base language
    /// then stays active and any previously loaded overlay is kept as is.
    pub fn switch_language(&mut self, name: &str) -> bool {
        let name = name.trim().to_lowercase();
        if name == self.config.base_language {
            return true;
        }
        if name == self.active_language && self.overlay.is_some() {
            debug!("{} is already the active language", name);
            return true;
        }

        let mut overlay = KeyValueStore::new();
        let mut found = false;
        for source in &self.sources {
            let Some(resource) = self.load_overlay_resource(source, &name) else {
                continue;
            };
            found = true;
            self.check_overlay_version(source, &name, resource.version.as_deref());
            overlay.merge(resource.entries);
        }

        if !found {
            self.active_language = self.config.base_language.clone();
            self.diagnostics.warning(format!(
                "No language files found for '{}', keeping {}",
                name, self.config.base_language
            ));
            return false;
        }

        let report = TranslationValidator::validate(&self.base, &overlay);
        info!("Switched language to {} ({} messages)", name, overlay.len());
        self.overlay = Some(overlay);
        self.active_language = name;
        self.report_validation(&report);
        self.last_validation = Some(report);

        if self.overlay_enabled {
            self.notify_all();
        }
        true
    }

    /// Merge `source`'s providers for `language`, later providers winning.
    fn load_overlay_resource(
        &self,
        source: &ExtensionSource,
        language: &str,
    ) -> Option<LoadedResource> {
        let path = source.resource_path(language)?;
        let mut merged: Option<LoadedResource> = None;

        for provider in source.providers() {
            match self.loader.load(provider, &path) {
                LoadOutcome::Loaded(resource) => {
                    let target = merged.get_or_insert_with(LoadedResource::default);
                    target.entries.merge(resource.entries);
                    if resource.version.is_some() {
                        target.version = resource.version;
                    }
                }
                LoadOutcome::NotFound => {}
                LoadOutcome::Failed(message) => self.diagnostics.error(format!(
                    "Could not load {}'s language file {}.lang from {}: {}",
                    source,
                    language,
                    provider.describe(),
                    message
                )),
            }
        }

        merged.filter(|r| !r.entries.is_empty() || r.version.is_some())
    }

    fn check_overlay_version(
        &self,
        source: &ExtensionSource,
        language: &str,
        version: Option<&str>,
    ) {
        let Some(raw) = version else {
            self.diagnostics.error(format!(
                "{}'s language file {}.lang does not provide a version number!",
                source, language
            ));
            return;
        };

        match raw.parse::<Version>() {
            Ok(version) => {
                let check = self.versions.check(source.name(), &version);
                if let VersionCheck::Outdated { .. } = check {
                    self.diagnostics.warning(format!(
                        "{}'s language file {}.lang is outdated, some messages will be in {}.",
                        source, language, self.config.base_language
                    ));
                }
            }
            Err(e) => self.diagnostics.error(format!(
                "Illegal version syntax in {}'s language file {}.lang: {}",
                source, language, e
            )),
        }
    }

    fn report_validation(&self, report: &ValidationReport) {
        if report.has_missing() && self.config.verbosity >= Verbosity::Normal {
            self.diagnostics.warning(format!(
                "The following messages have not been translated to {}: {}",
                self.active_language,
                join(&report.missing)
            ));
        }
        if report.has_superfluous() && self.config.verbosity >= Verbosity::High {
            self.diagnostics.warning(format!(
                "The localized language file(s) have superfluous entries: {}",
                join(&report.superfluous)
            ));
        }
    }

    /// Enable or disable overlay lookups.
    ///
    /// Returns the previous state, so callers can restore it afterwards.
    /// Enabling is refused while no overlay is loaded.
    pub fn set_overlay_enabled(&mut self, enabled: bool) -> bool {
        if self.overlay_enabled == enabled {
            return enabled;
        }
        if self.overlay.is_none() {
            return false;
        }
        self.overlay_enabled = enabled;
        self.notify_all();
        !enabled
    }

    /// Run `f` with overlay lookups disabled, restoring the previous state.
    pub fn with_overlay_disabled<R>(&mut self, f: impl FnOnce(&Self) -> R) -> R {
        let was_enabled = self.set_overlay_enabled(false);
        let result = f(self);
        self.set_overlay_enabled(was_enabled);
        result
    }

    // ==================== Listeners ====================

    /// Register a listener at [`ListenerPriority::Normal`].
    pub fn add_listener(
        &mut self,
        listener: impl LanguageChangeListener + 'static,
    ) -> ListenerHandle {
        self.register_listener(listener, ListenerPriority::Normal)
    }

    /// Register a listener.
    ///
    /// If a base language is already loaded, the listener is replayed the
    /// current state right away (see [`registration_replay`](Self::registration_replay)).
    pub fn register_listener(
        &mut self,
        listener: impl LanguageChangeListener + 'static,
        priority: ListenerPriority,
    ) -> ListenerHandle {
        let handle = self.listeners.register(Box::new(listener), priority);
        for view in self.registration_replay() {
            if let Some(failure) = self.listeners.notify_one(handle, &view) {
                self.report_listener_failure(&failure);
            }
        }
        handle
    }

    /// Views a newly registered listener is invoked with, in order.
    ///
    /// The first observation is always the base language; if an overlay is
    /// active, a second call follows with the current state. Nothing is
    /// replayed before any base language is loaded.
    pub fn registration_replay(&self) -> Vec<LanguageView<'_>> {
        if self.base.is_empty() {
            return Vec::new();
        }
        let mut views = vec![self.base_view()];
        if self.active_overlay().is_some() {
            views.push(self.view());
        }
        views
    }

    pub fn listener_order(&self) -> Vec<ListenerHandle> {
        self.listeners.order()
    }

    fn notify_all(&self) {
        for failure in self.listeners.notify_all(&self.view()) {
            self.report_listener_failure(&failure);
        }
    }

    fn report_listener_failure(&self, failure: &ListenerFailure) {
        self.diagnostics.error(format!(
            "Language change listener {:?} ({:?}) failed: {:#}",
            failure.handle, failure.priority, failure.error
        ));
    }

    // ==================== Lifecycle ====================

    /// Drop all languages, sources, listeners and diagnostics.
    pub fn teardown(&mut self) {
        self.base.clear();
        self.overlay = None;
        self.active_language = self.config.base_language.clone();
        self.overlay_enabled = false;
        self.versions.clear();
        self.sources.clear();
        self.listeners.clear();
        self.diagnostics.clear();
        self.metrics.reset();
        self.last_validation = None;
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

impl MessageLookup for LanguageRegistry {
    fn resolve(&self, key: &str) -> Option<&str> {
        let key = canonical_key(key);
        if let Some(value) = self.active_overlay().and_then(|overlay| overlay.get(&key)) {
            self.metrics.record_overlay_hit();
            return Some(value);
        }
        if let Some(value) = self.base.get(&key) {
            self.metrics.record_base_hit();
            return Some(value);
        }

        self.metrics.record_miss();
        if self.config.report_missing_entries {
            self.diagnostics.error(format!(
                "Missing entry '{}' in the default {} language file",
                key, self.config.base_language
            ));
        }
        None
    }

    fn key_exists(&self, key: &str) -> bool {
        self.base.contains_key(key)
    }
}

fn join<'a>(keys: impl IntoIterator<Item = &'a String>) -> String {
    keys.into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
