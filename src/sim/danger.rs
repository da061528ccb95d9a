//! Danger line evaluation
//!
//! Runs once per frame after asteroids move. An asteroid whose bottom edge
//! crosses the line is a miss: it leaves a ripple near the bottom and goes
//! back to the top.

use glam::Vec2;

use super::asteroid::Asteroid;
use super::effects::Ripple;
use super::rng::GameRng;
use super::viewport::Viewport;
use crate::consts::{MISS_RIPPLE_INSET, MISS_RIPPLE_LIFE};
use crate::tuning::Tuning;

/// One asteroid reaching the planet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Miss {
    /// Where it crossed
    pub x: f32,
    pub size: f32,
}

impl Miss {
    /// Score lost for this miss: `max(1, round(size / 8))`
    pub fn penalty(&self) -> u64 {
        crate::round_count(self.size / 8.0).max(1) as u64
    }
}

/// Recycle every asteroid past the danger line, one miss per asteroid.
pub fn evaluate(
    asteroids: &mut [Asteroid],
    ripples: &mut Vec<Ripple>,
    rng: &mut GameRng,
    viewport: &Viewport,
    tuning: &Tuning,
) -> Vec<Miss> {
    let line = viewport.danger_y();
    let mut misses = Vec::new();
    for asteroid in asteroids.iter_mut() {
        if asteroid.bottom() <= line {
            continue;
        }
        misses.push(Miss {
            x: asteroid.pos.x,
            size: asteroid.size,
        });
        ripples.push(Ripple::new(
            Vec2::new(asteroid.pos.x, viewport.height - MISS_RIPPLE_INSET),
            MISS_RIPPLE_LIFE,
        ));
        asteroid.reset(rng, viewport, tuning);
    }
    misses
}
