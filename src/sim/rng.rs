//! Seedable random source for spawns and explosions

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Random number generator shared by every spawn site.
///
/// Seed it for reproducible tests; use [`GameRng::from_entropy`] in play.
#[derive(Debug, Clone)]
pub struct GameRng {
    seed: u64,
    inner: Pcg32,
}

impl GameRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            inner: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform float in `[min, max)`. An empty or inverted range yields
    /// values between the two bounds rather than panicking.
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.inner.random::<f32>() * (max - min)
    }

    /// Uniform integer in `[min, max]` (inclusive)
    pub fn range_int(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        self.inner.random_range(min..=max)
    }

    /// Uniform angle in `[0, 2π)`
    pub fn angle(&mut self) -> f32 {
        self.range(0.0, std::f32::consts::TAU)
    }

    /// Symmetric jitter in `[-amount, amount)`
    pub fn jitter(&mut self, amount: f32) -> f32 {
        self.range(-amount, amount)
    }

    /// Pick one element of a non-empty slice
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let last = items.len() as u32 - 1;
        items.get(self.range_int(0, last) as usize)
    }
}
