//! Score, cleared and miss counters plus the best score

use super::danger::Miss;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub score: u64,
    pub cleared: u32,
    pub misses: u32,
    /// Highest score seen, loaded from and written back to the store
    pub best: u64,
}

impl Scoreboard {
    pub fn with_best(best: u64) -> Self {
        Self {
            best,
            ..Default::default()
        }
    }

    /// Points for clearing with a given base count: `max(1, round(base / 10))`
    pub fn clear_gain(base_count: u32) -> u64 {
        crate::round_count(base_count as f32 / 10.0).max(1) as u64
    }

    /// Credit one clear. Returns true when the best score was raised.
    pub fn record_clear(&mut self, base_count: u32) -> bool {
        self.score = self.score.saturating_add(Self::clear_gain(base_count));
        self.cleared = self.cleared.saturating_add(1);
        self.commit_best()
    }

    /// Apply a miss penalty, never dropping below zero
    pub fn apply_miss(&mut self, miss: &Miss) {
        self.score = self.score.saturating_sub(miss.penalty());
        self.misses = self.misses.saturating_add(1);
    }

    /// Raise best to the current score if it is higher. Returns true when
    /// best changed; repeated calls without a new high are no-ops.
    pub fn commit_best(&mut self) -> bool {
        if self.score > self.best {
            self.best = self.score;
            true
        } else {
            false
        }
    }

    /// Zero the run counters, keeping best
    pub fn reset(&mut self) {
        self.score = 0;
        self.cleared = 0;
        self.misses = 0;
    }
}
