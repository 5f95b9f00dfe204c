use thiserror::Error;

/// Errors that make an extension source non-functional.
///
/// Everything else the registry encounters (missing overlay files, version
/// skew, incomplete translations, lookup misses) is absorbed and reported as
/// a [`Diagnostic`](crate::i18n::Diagnostic) instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The source declares a language directory but ships no base language file.
    #[error("{source_name} is missing the required {path} file")]
    MissingBaseLanguage { source_name: String, path: String },

    /// The base language file exists but could not be read or parsed.
    #[error("could not load {source_name}'s default language file: {message}")]
    BaseLoadFailed {
        source_name: String,
        message: String,
    },

    /// `load_base` was called twice for the same source.
    #[error("the base language of {source_name} has already been loaded")]
    BaseAlreadyLoaded { source_name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_base_language_message() {
        let err = RegistryError::MissingBaseLanguage {
            source_name: "core".to_string(),
            path: "lang/english.lang".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "core is missing the required lang/english.lang file"
        );
    }

    #[test]
    fn test_base_load_failed_message() {
        let err = RegistryError::BaseLoadFailed {
            source_name: "core".to_string(),
            message: "expected value at line 1".to_string(),
        };
        assert!(err.to_string().contains("core's default language file"));
        assert!(err.to_string().contains("expected value"));
    }
}
