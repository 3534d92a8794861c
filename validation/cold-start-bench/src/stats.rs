//! Per-worker latency statistics.

use serde::{Deserialize, Serialize};

/// Running min / max / mean over a stream of latency samples.
///
/// Owned by exactly one worker; nothing here is shared or locked.
#[derive(Debug, Clone)]
pub struct LatencyStats {
    min: f64,
    max: f64,
    average: f64,
    count: u64,
}

/// A point-in-time copy of [`LatencyStats`].
///
/// Only exists once at least one sample was recorded, so the infinite
/// sentinels never leak into a report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatencySnapshot {
    pub min_ms: f64,
    pub max_ms: f64,
    pub average_ms: f64,
    pub count: u64,
}

impl LatencyStats {
    pub fn new() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            average: 0.0,
            count: 0,
        }
    }

    /// Record one latency sample in milliseconds.
    pub fn record(&mut self, sample_ms: f64) {
        self.min = self.min.min(sample_ms);
        self.max = self.max.max(sample_ms);

        self.count += 1;
        let n = self.count as f64;
        self.average = self.average * ((n - 1.0) / n) + sample_ms / n;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn snapshot(&self) -> Option<LatencySnapshot> {
        if self.count == 0 {
            return None;
        }
        Some(LatencySnapshot {
            min_ms: self.min,
            max_ms: self.max,
            average_ms: self.average,
            count: self.count,
        })
    }
}

impl Default for LatencyStats {
    fn default() -> Self {
        Self::new()
    }
}

impl LatencySnapshot {
    /// Average rounded to whole milliseconds, as printed in reports.
    pub fn rounded_average_ms(&self) -> i64 {
        self.average_ms.round() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{assert_approx_eq, direct_mean, latency_samples};

    fn check_against_direct(samples: &[f64]) {
        let mut stats = LatencyStats::new();
        for sample in samples {
            stats.record(*sample);
        }

        let snapshot = stats.snapshot().unwrap();
        let min = samples.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        assert_eq!(snapshot.count, samples.len() as u64);
        assert_eq!(snapshot.min_ms, min);
        assert_eq!(snapshot.max_ms, max);
        assert_approx_eq!(snapshot.average_ms, direct_mean(samples), 1e-9);
    }

    #[test]
    fn test_empty_tracker_has_no_snapshot() {
        let stats = LatencyStats::new();
        assert_eq!(stats.count(), 0);
        assert!(stats.snapshot().is_none());
    }

    #[test]
    fn test_first_sample_sets_both_bounds() {
        let mut stats = LatencyStats::new();
        stats.record(42.0);

        let snapshot = stats.snapshot().unwrap();
        assert_eq!(snapshot.min_ms, 42.0);
        assert_eq!(snapshot.max_ms, 42.0);
        assert_eq!(snapshot.average_ms, 42.0);
    }

    #[test]
    fn test_zero_sample_is_valid() {
        let mut stats = LatencyStats::new();
        stats.record(0.0);
        stats.record(10.0);

        let snapshot = stats.snapshot().unwrap();
        assert_eq!(snapshot.min_ms, 0.0);
        assert_eq!(snapshot.average_ms, 5.0);
    }

    #[test]
    fn test_random_sequences_match_direct_computation() {
        for (len, seed) in [(1, 1), (2, 2), (1000, 3), (1000, 4)] {
            check_against_direct(&latency_samples(len, seed));
        }
    }

    #[test]
    fn test_incremental_mean_matches_every_prefix() {
        let samples = latency_samples(1000, 11);
        let mut stats = LatencyStats::new();

        for (i, sample) in samples.iter().enumerate() {
            stats.record(*sample);
            let snapshot = stats.snapshot().unwrap();
            assert_approx_eq!(snapshot.average_ms, direct_mean(&samples[..=i]), 1e-9);
            assert!(snapshot.min_ms <= snapshot.average_ms + 1e-9);
            assert!(snapshot.average_ms <= snapshot.max_ms + 1e-9);
        }
    }

    #[test]
    fn test_rounded_average() {
        let mut stats = LatencyStats::new();
        stats.record(1.0);
        stats.record(2.0);
        assert_eq!(stats.snapshot().unwrap().rounded_average_ms(), 2);

        stats.record(1.0);
        assert_eq!(stats.snapshot().unwrap().rounded_average_ms(), 1);
    }
}
