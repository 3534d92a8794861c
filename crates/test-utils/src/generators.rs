//! Latency sample generators.
//!
//! Seeded so a failing property test can be replayed exactly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generate `len` latency samples in milliseconds.
///
/// Values are uniform in `[0, 250)` with roughly one in twenty forced to
/// exactly zero, since zero-duration samples are valid input.
///
/// # Example
///
/// ```
/// use test_utils::latency_samples;
///
/// let samples = latency_samples(1000, 7);
/// assert_eq!(samples.len(), 1000);
/// assert!(samples.iter().all(|s| *s >= 0.0));
/// ```
pub fn latency_samples(len: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|_| {
            if rng.gen_ratio(1, 20) {
                0.0
            } else {
                rng.gen_range(0.0..250.0)
            }
        })
        .collect()
}

/// Arithmetic mean computed directly as sum / count.
pub fn direct_mean(samples: &[f64]) -> f64 {
    samples.iter().sum::<f64>() / samples.len() as f64
}
