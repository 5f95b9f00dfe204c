//! Lookup metrics and observability.
//!
//! Counts where lookups were answered from: the overlay, the base language
//! fallback, or nowhere at all.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Lookup counters owned by one registry.
#[derive(Debug, Default)]
pub struct LookupMetrics {
    /// Lookups answered by the overlay language
    overlay_hits: AtomicUsize,

    /// Lookups answered by the base language
    base_hits: AtomicUsize,

    /// Lookups with no entry in any store
    misses: AtomicUsize,
}

impl LookupMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_overlay_hit(&self) {
        self.overlay_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_base_hit(&self) {
        self.base_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn overlay_hits(&self) -> usize {
        self.overlay_hits.load(Ordering::Relaxed)
    }

    pub fn base_hits(&self) -> usize {
        self.base_hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let overlay_hits = self.overlay_hits();
        let base_hits = self.base_hits();
        let misses = self.misses();
        let total = overlay_hits + base_hits + misses;

        let percent = |count: usize| {
            if total > 0 {
                (count as f64 / total as f64) * 100.0
            } else {
                0.0
            }
        };

        MetricsReport {
            lookups: total,
            overlay_hits,
            base_hits,
            misses,
            overlay_hit_rate: percent(overlay_hits),
            miss_rate: percent(misses),
        }
    }

    pub fn reset(&self) {
        self.overlay_hits.store(0, Ordering::Relaxed);
        self.base_hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

/// Snapshot of lookup statistics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    /// Total number of lookups
    pub lookups: usize,

    pub overlay_hits: usize,

    pub base_hits: usize,

    pub misses: usize,

    /// Share of lookups answered by the overlay, as a percentage (0-100)
    pub overlay_hit_rate: f64,

    /// Share of lookups that found nothing, as a percentage (0-100)
    pub miss_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Counter Tests ====================

    #[test]
    fn test_record_counters() {
        let metrics = LookupMetrics::new();

        metrics.record_overlay_hit();
        metrics.record_base_hit();
        metrics.record_base_hit();
        metrics.record_miss();

        assert_eq!(metrics.overlay_hits(), 1);
        assert_eq!(metrics.base_hits(), 2);
        assert_eq!(metrics.misses(), 1);
    }

    #[test]
    fn test_reset() {
        let metrics = LookupMetrics::new();
        metrics.record_miss();
        metrics.reset();
        assert_eq!(metrics.misses(), 0);
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_empty() {
        let report = LookupMetrics::new().report();

        assert_eq!(report.lookups, 0);
        assert_eq!(report.overlay_hit_rate, 0.0);
        assert_eq!(report.miss_rate, 0.0);
    }

    #[test]
    fn test_report_rates() {
        let metrics = LookupMetrics::new();

        // 2 overlay, 1 base, 1 miss = 50% overlay, 25% miss
        metrics.record_overlay_hit();
        metrics.record_overlay_hit();
        metrics.record_base_hit();
        metrics.record_miss();

        let report = metrics.report();
        assert_eq!(report.lookups, 4);
        assert_eq!(report.overlay_hit_rate, 50.0);
        assert_eq!(report.miss_rate, 25.0);
    }

    #[test]
    fn test_report_serialization() {
        let metrics = LookupMetrics::new();
        metrics.record_base_hit();

        let json = serde_json::to_string(&metrics.report()).expect("Should serialize");
        assert!(json.contains("\"base_hits\":1"));
    }
}
