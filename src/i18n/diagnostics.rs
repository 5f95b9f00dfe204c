//! Diagnostic records produced while loading and validating languages.
//!
//! Every diagnostic is logged through `tracing` as it is recorded, and also
//! kept in memory so hosts can surface them in their own reporting.

use serde::Serialize;
use std::sync::{Mutex, MutexGuard};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

/// In-memory diagnostic sink.
///
/// Recording only needs `&self`, so read-only operations such as lookups can
/// still report problems.
#[derive(Debug, Default)]
pub struct Diagnostics {
    records: Mutex<Vec<Diagnostic>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        error!("{}", message);
        self.push(Severity::Error, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        let message = message.into();
        warn!("{}", message);
        self.push(Severity::Warning, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        let message = message.into();
        info!("{}", message);
        self.push(Severity::Info, message);
    }

    fn push(&self, severity: Severity, message: String) {
        self.lock().push(Diagnostic { severity, message });
    }

    // Poisoning only means a holder panicked; the records are still valid
    fn lock(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Copy of every diagnostic recorded so far.
    pub fn records(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.lock())
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_keep_order_and_severity() {
        let sink = Diagnostics::new();
        sink.error("broken");
        sink.warning("careful");
        sink.info("fyi");

        let severities: Vec<_> = sink.records().iter().map(|d| d.severity).collect();
        assert_eq!(
            severities,
            vec![Severity::Error, Severity::Warning, Severity::Info]
        );
        assert_eq!(sink.records()[1].message, "careful");
    }

    #[test]
    fn test_take_drains_records() {
        let sink = Diagnostics::new();
        sink.warning("once");

        assert_eq!(sink.take().len(), 1);
        assert!(sink.records().is_empty());
    }

    #[test]
    fn test_diagnostic_serialization() {
        let diagnostic = Diagnostic {
            severity: Severity::Warning,
            message: "outdated".to_string(),
        };
        let json = serde_json::to_string(&diagnostic).expect("Should serialize");
        assert!(json.contains("\"severity\":\"warning\""));
        assert!(json.contains("\"message\":\"outdated\""));
    }
}
