//! lang-check - loads every extension source's languages and reports how
//! complete a translation is.
//!
//! Usage:
//!   cargo run --bin lang-check
//!
//! Required environment variables:
//! - LANG_SOURCES_DIR (one subdirectory per source, files under `lang/`)
//! - LANG_TARGET (language to switch to, e.g. `german`)
//!
//! Optional:
//! - LANG_OVERRIDE_DIR (per-source override files under `<source>/lang/`)
//! - LANG_BASE_LANGUAGE (defaults to english)
//! - LANG_VERBOSITY (defaults to normal)
//! - LANG_REPORT_MISSING (defaults to false)

use anyhow::{Context, Result};
use lang_registry::i18n::{
    Diagnostic, DirectoryProvider, ExtensionSource, MetricsReport, ValidationReport,
};
use lang_registry::{LanguageRegistry, RegistryConfig};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Directory inside each source that holds its language files
const LANGUAGE_DIR: &str = "lang";

struct LangCheckConfig {
    sources_dir: PathBuf,
    override_dir: Option<PathBuf>,
    target: String,
}

impl LangCheckConfig {
    fn from_env() -> Result<Self> {
        Ok(Self {
            sources_dir: std::env::var("LANG_SOURCES_DIR")
                .context("LANG_SOURCES_DIR not set")?
                .into(),
            override_dir: std::env::var("LANG_OVERRIDE_DIR").ok().map(PathBuf::from),
            target: std::env::var("LANG_TARGET").context("LANG_TARGET not set")?,
        })
    }
}

#[derive(Serialize)]
struct CheckReport {
    base_language: String,
    target: String,
    switched: bool,
    sources: Vec<String>,
    validation: Option<ValidationReport>,
    diagnostics: Vec<Diagnostic>,
    metrics: MetricsReport,
}

fn discover_sources(config: &LangCheckConfig) -> Result<Vec<ExtensionSource>> {
    let mut dirs: Vec<PathBuf> = std::fs::read_dir(&config.sources_dir)
        .with_context(|| format!("Failed to read {}", config.sources_dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();

    Ok(dirs
        .into_iter()
        .filter_map(|dir| {
            let name = dir.file_name()?.to_string_lossy().into_owned();
            let mut source =
                ExtensionSource::new(&name, LANGUAGE_DIR, DirectoryProvider::new(&dir));
            if let Some(overrides) = &config.override_dir {
                source = source.with_override(DirectoryProvider::new(overrides.join(&name)));
            }
            Some(source)
        })
        .collect())
}

fn main() -> Result<()> {
    // Load .env file (ignored when not present)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lang_registry=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let registry_config = RegistryConfig::from_env();
    let config = LangCheckConfig::from_env()?;

    let mut registry = LanguageRegistry::new(registry_config);
    for source in discover_sources(&config)? {
        let name = source.name().to_string();
        registry
            .load_base(source)
            .with_context(|| format!("Failed to load the base language of {}", name))?;
    }
    info!("Loaded {} sources", registry.sources().len());

    let switched = registry.switch_language(&config.target);
    registry.set_overlay_enabled(true);

    let report = CheckReport {
        base_language: registry.base_language().to_string(),
        target: config.target.clone(),
        switched,
        sources: registry.sources().iter().map(|s| s.name().to_string()).collect(),
        validation: registry.last_validation().cloned(),
        diagnostics: registry.diagnostics(),
        metrics: registry.metrics().report(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
