//! Synthetic measurement sampling.
//!
//! All "measurements" in netpulse come from here: one noisy draw from a
//! normal distribution centered on a tuned base value, clamped to a 1.0
//! floor so the UI never shows a zero or negative rate.

use log::warn;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use std::sync::Mutex;

/// Minimum value any sample can take (Mbps or ms depending on caller).
pub const SAMPLE_FLOOR: f64 = 1.0;

/// Process-lifetime random source for all synthetic measurements.
///
/// The generator is seeded once at construction and reused for every draw.
/// A mutex guards it so the same instance can be shared (via `Arc`) between
/// the serial accept loop and per-connection worker threads.
pub struct SpeedModel {
    rng: Mutex<StdRng>,
}

impl SpeedModel {
    /// Create a model, optionally seeded for reproducible runs.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        SpeedModel {
            rng: Mutex::new(rng),
        }
    }

    /// Draw one sample from `Normal(base, variance)`, floored at 1.0.
    ///
    /// Never fails: degenerate parameters (negative or non-finite spread)
    /// fall back to the clamped base value.
    pub fn sample(&self, base: f64, variance: f64) -> f64 {
        // Normal::new accepts a negative std_dev (mirrored distribution), so
        // the spread has to be validated here, not just via the Err arm.
        if !(variance.is_finite() && variance >= 0.0) {
            warn!("[Model] Invalid spread ({}, {})", base, variance);
            return base.max(SAMPLE_FLOOR);
        }

        let normal = match Normal::new(base, variance) {
            Ok(n) => n,
            Err(e) => {
                warn!("[Model] Invalid distribution ({}, {}): {}", base, variance, e);
                return base.max(SAMPLE_FLOOR);
            }
        };

        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            // A panic while holding the lock cannot corrupt the RNG state.
            Err(poisoned) => poisoned.into_inner(),
        };

        normal.sample(&mut *rng).max(SAMPLE_FLOOR)
    }
}
