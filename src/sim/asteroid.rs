//! Falling asteroids
//!
//! Asteroids never expire. A hit or a miss recycles the same slot back
//! above the viewport, so the population size only changes on populate.

use glam::Vec2;

use super::body::{Body, Bounds, Step};
use super::color::{Rgba, palette};
use super::draw::{DrawCommand, Frame, RadialGradient};
use super::rng::GameRng;
use super::viewport::Viewport;
use crate::consts::REFERENCE_FPS;
use crate::polar;
use crate::tuning::Tuning;

/// Outline vertices per asteroid
const OUTLINE_SPIKES: usize = 10;
/// Spin range in radians per 60 Hz frame
const MAX_SPIN: f32 = 0.01;
/// Highest spawn point as a fraction of viewport height above the top
const SPAWN_HEIGHT_RATIO: f32 = 0.6;
/// Lowest spawn point (px above the top edge)
const SPAWN_CEILING: f32 = -20.0;

/// A crater in the asteroid's local, rotating frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crater {
    pub angle: f32,
    pub distance: f32,
    pub radius: f32,
}

#[derive(Debug, Clone)]
pub struct Asteroid {
    pub pos: Vec2,
    /// Body radius (px)
    pub size: f32,
    /// Fall speed in px per 60 Hz frame
    pub speed: f32,
    pub rotation: f32,
    /// Spin in radians per 60 Hz frame
    pub spin: f32,
    pub color: Rgba,
    pub craters: Vec<Crater>,
}

impl Asteroid {
    /// Spawn a fresh asteroid above the viewport
    pub fn spawn(rng: &mut GameRng, viewport: &Viewport, tuning: &Tuning) -> Self {
        let mut asteroid = Self {
            pos: Vec2::ZERO,
            size: 0.0,
            speed: 0.0,
            rotation: 0.0,
            spin: 0.0,
            color: palette::ASTEROID_TINTS[0],
            craters: Vec::new(),
        };
        asteroid.reset(rng, viewport, tuning);
        asteroid
    }

    /// Test helper: a motionless asteroid at a known spot
    pub fn at(pos: Vec2, size: f32) -> Self {
        Self {
            pos,
            size,
            speed: 0.0,
            rotation: 0.0,
            spin: 0.0,
            color: palette::ASTEROID_TINTS[0],
            craters: Vec::new(),
        }
    }

    /// Re-roll every parameter and move back above the top edge
    pub fn reset(&mut self, rng: &mut GameRng, viewport: &Viewport, tuning: &Tuning) {
        let (min_size, max_size) = tuning.asteroid_size;
        self.size = rng.range(min_size, max_size);
        self.pos = Vec2::new(
            spawn_x(rng, self.size, viewport.width),
            rng.range(-viewport.height * SPAWN_HEIGHT_RATIO, SPAWN_CEILING),
        );
        self.speed = rng.range(tuning.asteroid_speed.0, tuning.asteroid_speed.1);
        self.rotation = rng.angle();
        self.spin = rng.range(-MAX_SPIN, MAX_SPIN);
        self.color = rng
            .pick(&palette::ASTEROID_TINTS)
            .copied()
            .unwrap_or(palette::ASTEROID_TINTS[0]);

        let count = rng.range_int(tuning.crater_count.0, tuning.crater_count.1);
        self.craters.clear();
        for _ in 0..count {
            self.craters.push(Crater {
                angle: rng.angle(),
                distance: rng.range(self.size * 0.15, self.size * 0.45),
                radius: rng.range(self.size * 0.08, self.size * 0.22),
            });
        }
    }

    /// y coordinate of the lowest point of the body
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size
    }

    /// Wobbly outline in world space, following the current rotation
    pub fn outline(&self) -> Vec<Vec2> {
        let (sin, cos) = self.rotation.sin_cos();
        (0..OUTLINE_SPIKES)
            .map(|i| {
                let theta = i as f32 / OUTLINE_SPIKES as f32 * std::f32::consts::TAU;
                let fi = i as f32;
                let radius = self.size
                    * (1.0
                        + 0.06 * (fi * 3.0 + self.rotation * 4.0).sin()
                        + 0.04 * (fi * 2.0 + self.rotation * 2.0).cos());
                self.pos + rotate(polar(radius, theta), sin, cos)
            })
            .collect()
    }
}

/// Horizontal spawn keeping the whole body inside the viewport
fn spawn_x(rng: &mut GameRng, size: f32, width: f32) -> f32 {
    if width <= size * 2.0 {
        return width / 2.0;
    }
    rng.range(size, width - size)
}

#[inline]
fn rotate(v: Vec2, sin: f32, cos: f32) -> Vec2 {
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

impl Body for Asteroid {
    fn advance(&mut self, step: &Step) {
        let frames = step.dt * REFERENCE_FPS;
        self.pos.y += self.speed * frames * step.speed_multiplier;
        self.rotation += self.spin * frames;
    }

    fn render(&self, frame: &mut Frame) {
        let (sin, cos) = self.rotation.sin_cos();
        let focus = self.pos + rotate(Vec2::splat(-self.size * 0.2), sin, cos);
        frame.push(DrawCommand::Blob {
            center: self.pos,
            outline: self.outline(),
            fill: RadialGradient {
                focus,
                inner: palette::ASTEROID_HIGHLIGHT,
                middle: self.color,
                outer: palette::ASTEROID_SHADOW,
            },
            stroke: Some((1.0, palette::CRATER)),
        });
        for crater in &self.craters {
            let local = polar(crater.distance, crater.angle);
            frame.push(DrawCommand::Ellipse {
                center: self.pos + rotate(local, sin, cos),
                radii: Vec2::new(crater.radius, crater.radius * 0.7),
                rotation: self.rotation + crater.angle * 0.4,
                color: palette::CRATER,
            });
        }
    }

    fn is_expired(&self, _bounds: &Bounds) -> bool {
        false
    }
}
