//! Language file versions and base/overlay skew detection.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{input}' is not a valid version (expected dot-separated numbers)")]
pub struct VersionParseError {
    pub input: String,
}

/// A dot-separated numeric version such as `2.1` or `2.6.4`.
///
/// Missing trailing components compare as zero, so `1.2` equals `1.2.0`.
#[derive(Debug, Clone)]
pub struct Version {
    parts: Vec<u64>,
}

impl Version {
    pub fn parts(&self) -> &[u64] {
        &self.parts
    }

    pub fn is_smaller_than(&self, other: &Version) -> bool {
        self < other
    }

    fn component(&self, index: usize) -> u64 {
        self.parts.get(index).copied().unwrap_or(0)
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parts = trimmed
            .split('.')
            .map(|part| part.parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| VersionParseError {
                input: s.to_string(),
            })?;
        Ok(Version { parts })
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        (0..len)
            .map(|i| self.component(i).cmp(&other.component(i)))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.parts.iter().map(u64::to_string).collect();
        write!(f, "{}", joined.join("."))
    }
}

/// Result of comparing an overlay version against its source's base version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionCheck {
    /// Overlay is at least as new as the base
    Current,
    /// Overlay is older than the base
    Outdated { base: Version, overlay: Version },
    /// Base version was never declared, so nothing can be compared
    Unknown,
}

/// Per-source base language versions.
///
/// Each source records its base version exactly once.
#[derive(Debug, Default)]
pub struct VersionTracker {
    base_versions: HashMap<String, Option<Version>>,
}

impl VersionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the base version declared by `source`.
    ///
    /// Returns `false` (and leaves the first record untouched) if the source
    /// was already recorded.
    pub fn record_base_version(&mut self, source: &str, version: Option<Version>) -> bool {
        if self.base_versions.contains_key(source) {
            return false;
        }
        self.base_versions.insert(source.to_string(), version);
        true
    }

    pub fn is_recorded(&self, source: &str) -> bool {
        self.base_versions.contains_key(source)
    }

    pub fn base_version(&self, source: &str) -> Option<&Version> {
        self.base_versions.get(source).and_then(Option::as_ref)
    }

    pub fn check(&self, source: &str, overlay: &Version) -> VersionCheck {
        match self.base_version(source) {
            Some(base) if overlay.is_smaller_than(base) => VersionCheck::Outdated {
                base: base.clone(),
                overlay: overlay.clone(),
            },
            Some(_) => VersionCheck::Current,
            None => VersionCheck::Unknown,
        }
    }

    pub fn clear(&mut self) {
        self.base_versions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        s.parse().expect("valid version")
    }

    // ==================== Version Tests ====================

    #[test]
    fn test_parse_simple_version() {
        assert_eq!(v("2.1").parts(), &[2, 1]);
        assert_eq!(v(" 2.6.4 ").parts(), &[2, 6, 4]);
    }

    #[test]
    fn test_parse_invalid_version() {
        assert!("".parse::<Version>().is_err());
        assert!("1..2".parse::<Version>().is_err());
        assert!("1.2-beta".parse::<Version>().is_err());
        assert!("abc".parse::<Version>().is_err());
    }

    #[test]
    fn test_version_ordering_is_numeric() {
        assert!(v("1.9") < v("1.10"));
        assert!(v("2.0") > v("1.99.99"));
        assert!(v("1.2").is_smaller_than(&v("1.2.1")));
    }

    #[test]
    fn test_missing_components_are_zero() {
        assert_eq!(v("1.2"), v("1.2.0"));
        assert!(!v("1.2.0").is_smaller_than(&v("1.2")));
    }

    #[test]
    fn test_version_display() {
        assert_eq!(v("2.6.4").to_string(), "2.6.4");
    }

    // ==================== Tracker Tests ====================

    #[test]
    fn test_record_base_version_once() {
        let mut tracker = VersionTracker::new();

        assert!(tracker.record_base_version("core", Some(v("2.0"))));
        assert!(!tracker.record_base_version("core", Some(v("3.0"))));
        assert_eq!(tracker.base_version("core"), Some(&v("2.0")));
    }

    #[test]
    fn test_check_outdated_overlay() {
        let mut tracker = VersionTracker::new();
        tracker.record_base_version("core", Some(v("2.1")));

        assert_eq!(
            tracker.check("core", &v("2.0")),
            VersionCheck::Outdated {
                base: v("2.1"),
                overlay: v("2.0"),
            }
        );
    }

    #[test]
    fn test_check_current_overlay() {
        let mut tracker = VersionTracker::new();
        tracker.record_base_version("core", Some(v("2.1")));

        assert_eq!(tracker.check("core", &v("2.1")), VersionCheck::Current);
        assert_eq!(tracker.check("core", &v("3")), VersionCheck::Current);
    }

    #[test]
    fn test_check_unknown_base_version() {
        let mut tracker = VersionTracker::new();
        tracker.record_base_version("addon", None);

        assert!(tracker.is_recorded("addon"));
        assert_eq!(tracker.check("addon", &v("1.0")), VersionCheck::Unknown);
        assert_eq!(tracker.check("never-seen", &v("1.0")), VersionCheck::Unknown);
    }
}
