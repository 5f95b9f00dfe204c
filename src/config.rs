use serde::Serialize;
use std::str::FromStr;

/// Name of the language every source must ship.
pub const DEFAULT_BASE_LANGUAGE: &str = "english";

/// How chatty the registry's diagnostics are.
///
/// Ordered from least to most verbose, so `verbosity >= Verbosity::High`
/// reads as "at least high".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    High,
    VeryHigh,
    Debug,
}

impl FromStr for Verbosity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', '-', ' '], "").as_str() {
            "quiet" => Ok(Verbosity::Quiet),
            "normal" => Ok(Verbosity::Normal),
            "high" => Ok(Verbosity::High),
            "veryhigh" => Ok(Verbosity::VeryHigh),
            "debug" => Ok(Verbosity::Debug),
            other => Err(format!("Unknown verbosity: '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Canonical (lowercase) name of the base language
    pub base_language: String,

    /// Diagnostic verbosity used to gate completeness warnings
    pub verbosity: Verbosity,

    /// Record an error diagnostic whenever a key is missing from every store
    pub report_missing_entries: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_language: DEFAULT_BASE_LANGUAGE.to_string(),
            verbosity: Verbosity::default(),
            report_missing_entries: false,
        }
    }
}

impl RegistryConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_language: std::env::var("LANG_BASE_LANGUAGE")
                .ok()
                .map(|v| v.trim().to_lowercase())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.base_language),
            verbosity: std::env::var("LANG_VERBOSITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.verbosity),
            report_missing_entries: std::env::var("LANG_REPORT_MISSING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.report_missing_entries),
        }
    }

    /// Set the verbosity
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Enable or disable missing-entry reporting on lookups
    pub fn with_report_missing_entries(mut self, enabled: bool) -> Self {
        self.report_missing_entries = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RegistryConfig::default();
        assert_eq!(config.base_language, "english");
        assert_eq!(config.verbosity, Verbosity::Normal);
        assert!(!config.report_missing_entries);
    }

    #[test]
    fn test_verbosity_ordering() {
        assert!(Verbosity::Quiet < Verbosity::Normal);
        assert!(Verbosity::Normal < Verbosity::High);
        assert!(Verbosity::High < Verbosity::VeryHigh);
        assert!(Verbosity::VeryHigh < Verbosity::Debug);
    }

    #[test]
    fn test_verbosity_from_str() {
        assert_eq!("quiet".parse::<Verbosity>(), Ok(Verbosity::Quiet));
        assert_eq!("HIGH".parse::<Verbosity>(), Ok(Verbosity::High));
        assert_eq!("very_high".parse::<Verbosity>(), Ok(Verbosity::VeryHigh));
        assert_eq!(" debug ".parse::<Verbosity>(), Ok(Verbosity::Debug));
        assert!("loud".parse::<Verbosity>().is_err());
    }

    #[test]
    fn test_builder_methods() {
        let config = RegistryConfig::default()
            .with_verbosity(Verbosity::High)
            .with_report_missing_entries(true);
        assert_eq!(config.verbosity, Verbosity::High);
        assert!(config.report_missing_entries);
    }
}
