//! Runtime localization registry with a base language, a switchable overlay
//! language, prioritized change listeners and translation completeness checks.

pub mod config;
pub mod consumers;
pub mod error;
pub mod i18n;

pub use config::{RegistryConfig, Verbosity};
pub use error::RegistryError;
pub use i18n::{LanguageRegistry, MessageLookup};
