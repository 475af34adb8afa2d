//! Simulated Shield readings.
//!
//! There is no real backend to query; every value is derived from uniform
//! draws supplied by a [`ValueSource`], so tests can script them.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Health score before jitter is applied.
pub const BASE_HEALTH: f64 = 95.0;
/// Largest upward jitter (exclusive).
pub const HEALTH_JITTER_UP: f64 = 5.0;
/// Largest downward jitter (exclusive).
pub const HEALTH_JITTER_DOWN: f64 = 2.0;
/// Vulnerability scan counts are drawn from `0..VULNERABILITY_SCAN_LIMIT`.
pub const VULNERABILITY_SCAN_LIMIT: u32 = 5;
/// Compliance scan counts are drawn from `0..COMPLIANCE_SCAN_LIMIT`.
pub const COMPLIANCE_SCAN_LIMIT: u32 = 2;

/// Supplier of the uniform draws behind each simulated value.
pub trait ValueSource: Send + 'static {
    /// A uniform draw in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// A uniform integer in `[0, bound)`. `bound` is never zero.
    fn below(&mut self, bound: u32) -> u32;
}

/// [`ValueSource`] backed by a `rand` generator.
pub struct RandomSource {
    rng: SmallRng,
}

impl RandomSource {
    /// Seeds from the operating system.
    pub fn new() -> Self {
        RandomSource {
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        RandomSource {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueSource for RandomSource {
    fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn below(&mut self, bound: u32) -> u32 {
        self.rng.random_range(0..bound)
    }
}

/// One cycle's worth of simulated values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub health_score: f64,
    pub vulnerability_scans: u32,
    pub compliance_scans: u32,
}

impl Sample {
    /// Draws a new sample. The health score is not clamped: it lies in
    /// `(93, 100)` up to rounding, and the largest `f64` draw with no
    /// downward jitter rounds to exactly `100.0`.
    pub fn draw<S: ValueSource + ?Sized>(source: &mut S) -> Self {
        let up = source.unit() * HEALTH_JITTER_UP;
        let down = source.unit() * HEALTH_JITTER_DOWN;

        Sample {
            health_score: BASE_HEALTH + up - down,
            vulnerability_scans: source.below(VULNERABILITY_SCAN_LIMIT),
            compliance_scans: source.below(COMPLIANCE_SCAN_LIMIT),
        }
    }
}
