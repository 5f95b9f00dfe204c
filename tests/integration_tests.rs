//! Integration tests for the language registry
//!
//! These tests load languages from real directories on disk, the way a host
//! wires bundled resources and a data-directory override together.

use lang_registry::i18n::{
    DirectoryProvider, ExtensionSource, FormatArg, LanguageView, ListenerPriority,
    MemoryProvider, Severity,
};
use lang_registry::{LanguageRegistry, MessageLookup, RegistryConfig, RegistryError, Verbosity};
use serial_test::serial;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

// ==================== Test Helpers ====================

fn write_lang(root: &Path, language: &str, contents: &str) {
    let dir = root.join("lang");
    std::fs::create_dir_all(&dir).expect("Failed to create lang dir");
    std::fs::write(dir.join(format!("{}.lang", language)), contents)
        .expect("Failed to write language file");
}

/// Bundled and data directories for one source
struct SourceDirs {
    bundled: TempDir,
    data: TempDir,
}

impl SourceDirs {
    fn new() -> Self {
        Self {
            bundled: TempDir::new().expect("Failed to create temp dir"),
            data: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    fn source(&self, name: &str) -> ExtensionSource {
        ExtensionSource::new(name, "lang", DirectoryProvider::new(self.bundled.path()))
            .with_override(DirectoryProvider::new(self.data.path()))
    }
}

fn core_dirs() -> SourceDirs {
    let dirs = SourceDirs::new();
    write_lang(
        dirs.bundled.path(),
        "english",
        r#"{
            "version": "2.6",
            "messages": {"welcome": "Welcome, %s!", "items": "sword, shield , bow"},
            "units": {"day": "day", "empty": ""},
            "genders": {"0": {"id": "m", "name": "masculine"}}
        }"#,
    );
    write_lang(
        dirs.bundled.path(),
        "german",
        r#"{
            "version": "2.6",
            "messages": {"welcome": "Willkommen, %s!", "items": "Schwert, Schild, Bogen"},
            "units": {"empty": ""}
        }"#,
    );
    dirs
}

// ==================== Loading From Disk ====================

#[test]
fn test_load_and_switch_from_disk() {
    let dirs = core_dirs();
    let mut registry = LanguageRegistry::default();
    registry.load_base(dirs.source("core")).expect("base should load");

    assert!(registry.key_exists("Messages.Welcome"));
    assert_eq!(
        registry.format("messages.welcome", &[FormatArg::from("Alex")]),
        "Welcome, Alex!"
    );

    assert!(registry.switch_language("german"));
    assert!(!registry.set_overlay_enabled(true));

    assert_eq!(
        registry.format("messages.welcome", &[FormatArg::from("Alex")]),
        "Willkommen, Alex!"
    );
    assert_eq!(
        registry.resolve_list("messages.items"),
        vec!["Schwert", "Schild", "Bogen"]
    );
    // Untranslated entries fall back to the base language
    assert_eq!(registry.resolve_padded("units.day"), " day ");
    assert_eq!(registry.resolve_padded("units.empty"), " ");
}

#[test]
fn test_data_directory_override_wins() {
    let dirs = core_dirs();
    write_lang(
        dirs.data.path(),
        "german",
        r#"{"messages": {"welcome": "Servus, %s!"}}"#,
    );

    let mut registry = LanguageRegistry::default();
    registry.load_base(dirs.source("core")).expect("base should load");
    assert!(registry.switch_language("german"));
    registry.set_overlay_enabled(true);

    assert_eq!(
        registry.format("messages.welcome", &[FormatArg::from("Sam")]),
        "Servus, Sam!"
    );
    assert_eq!(
        registry.resolve_list("messages.items"),
        vec!["Schwert", "Schild", "Bogen"]
    );
}

#[test]
fn test_base_language_is_never_read_from_data_directory() {
    let dirs = SourceDirs::new();
    write_lang(dirs.data.path(), "english", r#"{"version": "1", "a": "A"}"#);

    let mut registry = LanguageRegistry::default();
    let result = registry.load_base(dirs.source("addon"));

    assert!(matches!(
        result,
        Err(RegistryError::MissingBaseLanguage { ref source_name, .. }) if source_name == "addon"
    ));
}

#[test]
fn test_unparsable_base_language_is_fatal() {
    let dirs = SourceDirs::new();
    write_lang(dirs.bundled.path(), "english", "version: 1");

    let mut registry = LanguageRegistry::default();
    let err = registry
        .load_base(dirs.source("addon"))
        .expect_err("broken base file should fail");

    assert!(err.to_string().contains("addon's default language file"));
}

// ==================== Multiple Sources ====================

#[test]
fn test_addon_without_translation_does_not_block_switch() {
    let core = core_dirs();
    let addon = SourceDirs::new();
    write_lang(
        addon.bundled.path(),
        "english",
        r#"{"version": "1.0", "addon": {"title": "Addon"}}"#,
    );

    let mut registry = LanguageRegistry::default();
    registry.load_base(core.source("core")).expect("core should load");
    registry.load_base(addon.source("addon")).expect("addon should load");

    assert!(registry.switch_language("german"));
    registry.set_overlay_enabled(true);

    assert_eq!(registry.resolve("addon.title"), Some("Addon"));
    let report = registry.last_validation().expect("switch validates");
    assert!(report.missing.contains("addon.title"));
    assert!(report.missing.contains("units.day"));
    assert!(!report.missing.iter().any(|k| k.starts_with("genders.")));
}

#[test]
fn test_outdated_addon_translation_warns_but_switches() {
    let core = core_dirs();
    let addon = SourceDirs::new();
    write_lang(addon.bundled.path(), "english", r#"{"version": "1.4", "x": "X"}"#);
    write_lang(addon.bundled.path(), "german", r#"{"version": "1.3.9", "x": "Ix"}"#);

    let mut registry = LanguageRegistry::default();
    registry.load_base(core.source("core")).expect("core should load");
    registry.load_base(addon.source("addon")).expect("addon should load");

    assert!(registry.switch_language("german"));
    let warnings: Vec<String> = registry
        .diagnostics()
        .into_iter()
        .filter(|d| d.severity == Severity::Warning)
        .map(|d| d.message)
        .collect();
    assert!(warnings
        .iter()
        .any(|m| m.contains("addon's language file german.lang is outdated")));
    assert!(!warnings.iter().any(|m| m.contains("core's language file")));
}

#[test]
fn test_unknown_language_keeps_base() {
    let dirs = core_dirs();
    let mut registry = LanguageRegistry::default();
    registry.load_base(dirs.source("core")).expect("base should load");

    assert!(!registry.switch_language("elvish"));
    assert_eq!(registry.active_language(), "english");
    assert_eq!(registry.effective_language(), "english");
    assert!(!registry.set_overlay_enabled(true));
}

// ==================== Listeners ====================

#[test]
fn test_listener_sees_language_changes_in_order() {
    let dirs = core_dirs();
    let log = Arc::new(Mutex::new(Vec::<String>::new()));
    let mut registry =
        LanguageRegistry::new(RegistryConfig::default().with_verbosity(Verbosity::Quiet));

    let sink = Arc::clone(&log);
    registry.register_listener(
        move |view: &LanguageView<'_>| -> anyhow::Result<()> {
            sink.lock().unwrap().push(format!(
                "{}={}",
                view.language(),
                view.format("messages.welcome", &[FormatArg::from("A")])
            ));
            Ok(())
        },
        ListenerPriority::Earliest,
    );

    registry.load_base(dirs.source("core")).expect("base should load");
    registry.switch_language("german");
    registry.set_overlay_enabled(true);
    registry.set_overlay_enabled(false);

    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "english=Welcome, A!",
            "german=Willkommen, A!",
            "english=Welcome, A!",
        ]
    );
    assert!(registry.diagnostics().is_empty());
}

// ==================== Global Registry ====================

#[test]
#[serial]
fn test_global_registry_is_shared() {
    let first = LanguageRegistry::global();
    let second = LanguageRegistry::global();
    assert!(std::ptr::eq(first, second));
}

#[test]
#[serial]
fn test_global_registry_lifecycle() {
    let mut registry = LanguageRegistry::global().lock().unwrap();
    registry.teardown();

    let path = format!("lang/{}.lang", registry.base_language());
    registry
        .load_base(ExtensionSource::new(
            "global-core",
            "lang",
            MemoryProvider::new().with_file(path, r#"{"version": "1", "hello": "Hello"}"#),
        ))
        .expect("base should load");
    assert_eq!(registry.resolve_or_key("HELLO"), "Hello");

    registry.teardown();
    assert_eq!(registry.resolve_or_key("HELLO"), "hello");
}
