//! Noise sources for the daily price walk.
//!
//! The price model only needs standard-normal draws, so it depends on the
//! small [`GaussianSource`] trait rather than a concrete RNG. Production code
//! uses [`NormalNoise`] (seedable `StdRng`); tests use [`ScriptedNoise`] to
//! pin every draw.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Source of standard-normal (mean 0, std dev 1) draws.
pub trait GaussianSource {
    fn next_gaussian(&mut self) -> f64;
}

impl<G: GaussianSource + ?Sized> GaussianSource for &mut G {
    fn next_gaussian(&mut self) -> f64 {
        (**self).next_gaussian()
    }
}

/// Standard-normal draws from a `StdRng`.
#[derive(Debug, Clone)]
pub struct NormalNoise {
    rng: StdRng,
}

impl NormalNoise {
    /// Reproducible stream: the same seed yields the same draws.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl GaussianSource for NormalNoise {
    fn next_gaussian(&mut self) -> f64 {
        self.rng.sample(StandardNormal)
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
///
/// An empty script always yields `0.0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedNoise {
    draws: Vec<f64>,
    next: usize,
}

impl ScriptedNoise {
    pub fn new(draws: Vec<f64>) -> Self {
        Self { draws, next: 0 }
    }

    pub fn constant(draw: f64) -> Self {
        Self::new(vec![draw])
    }
}

impl GaussianSource for ScriptedNoise {
    fn next_gaussian(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let draw = self.draws[self.next % self.draws.len()];
        self.next += 1;
        draw
    }
}
