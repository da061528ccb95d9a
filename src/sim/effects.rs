//! Transient explosion particles: shards, smoke, sparks and ripples
//!
//! Each one burns down a ttl and fades with `ttl / life`.

use glam::Vec2;

use super::body::{Body, Bounds, Step};
use super::color::{Rgba, palette};
use super::draw::{DrawCommand, Frame};
use super::rng::GameRng;
use crate::consts::RIPPLE_MAX_RADIUS;
use crate::polar;

const SHARD_GRAVITY: f32 = 180.0;
const SPARK_GRAVITY: f32 = 400.0;
/// Smoke sinks slowly on top of its own drift
const SMOKE_SINK: f32 = 30.0;

/// Remaining life as a 0..1 fraction
#[inline]
fn life_fraction(ttl: f32, life: f32) -> f32 {
    if life <= 0.0 {
        return 0.0;
    }
    (ttl / life).clamp(0.0, 1.0)
}

/// A spinning triangular fragment of rock
#[derive(Debug, Clone)]
pub struct Shard {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub rotation: f32,
    pub spin: f32,
    pub life: f32,
    pub ttl: f32,
    pub color: Rgba,
}

impl Shard {
    pub fn spawn(rng: &mut GameRng, pos: Vec2, color: Rgba) -> Self {
        let vel = polar(rng.range(80.0, 360.0), rng.angle());
        let life = rng.range(0.5, 1.4);
        Self {
            pos,
            vel,
            size: rng.range(6.0, 16.0),
            rotation: rng.angle(),
            spin: rng.range(-6.0, 6.0),
            life,
            ttl: life,
            color,
        }
    }
}

impl Body for Shard {
    fn advance(&mut self, step: &Step) {
        let dt = step.dt;
        self.ttl -= dt;
        self.pos += self.vel * dt;
        self.vel.y += SHARD_GRAVITY * dt;
        self.rotation += self.spin * dt;
    }

    fn render(&self, frame: &mut Frame) {
        let (sin, cos) = self.rotation.sin_cos();
        let local = [
            Vec2::new(-self.size * 0.6, -self.size * 0.3),
            Vec2::new(self.size * 0.8, 0.0),
            Vec2::new(-self.size * 0.6, self.size * 0.3),
        ];
        let points = local.map(|p| self.pos + Vec2::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos));
        frame.push(DrawCommand::Triangle {
            points,
            color: self.color.fade(life_fraction(self.ttl, self.life)),
        });
    }

    fn is_expired(&self, bounds: &Bounds) -> bool {
        self.ttl <= 0.0 || !bounds.contains(self.pos)
    }
}

/// A growing, fading dust cloud
#[derive(Debug, Clone)]
pub struct Smoke {
    pub pos: Vec2,
    pub radius: f32,
    /// Base radial growth (px/s), accelerating with age
    pub growth: f32,
    pub life: f32,
    pub ttl: f32,
    /// Per-puff drift (px/s)
    pub drift: Vec2,
    pub color: Rgba,
}

impl Smoke {
    pub fn spawn(rng: &mut GameRng, pos: Vec2, base_radius: f32) -> Self {
        let life = rng.range(0.6, 1.4);
        Self {
            pos,
            radius: rng.range(base_radius * 0.6, base_radius * 1.2),
            growth: rng.range(30.0, 90.0),
            life,
            ttl: life,
            drift: Vec2::new(rng.jitter(12.0), rng.jitter(6.0)),
            color: palette::SMOKE,
        }
    }
}

impl Body for Smoke {
    fn advance(&mut self, step: &Step) {
        let dt = step.dt;
        self.ttl -= dt;
        let age = 1.0 - life_fraction(self.ttl, self.life);
        self.radius += self.growth * dt * (0.6 + age);
        self.pos += self.drift * dt;
        self.pos.y += SMOKE_SINK * dt;
    }

    fn render(&self, frame: &mut Frame) {
        let a = life_fraction(self.ttl, self.life);
        // Layer alpha 0.55 over a 0.6 fill
        frame.push(DrawCommand::Disc {
            center: self.pos,
            radius: self.radius,
            color: self.color.with_alpha(0.55 * 0.6 * a * a),
        });
    }

    fn is_expired(&self, bounds: &Bounds) -> bool {
        self.ttl <= 0.0 || !bounds.contains(self.pos)
    }
}

/// A small, fast, gravity-bound ember
#[derive(Debug, Clone)]
pub struct Spark {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub life: f32,
    pub ttl: f32,
    pub color: Rgba,
}

impl Spark {
    pub fn spawn(rng: &mut GameRng, pos: Vec2) -> Self {
        let vel = polar(rng.range(120.0, 520.0), rng.angle());
        let life = rng.range(0.28, 0.9);
        Self {
            pos,
            vel,
            radius: rng.range(0.8, 2.8),
            life,
            ttl: life,
            color: palette::SPARK,
        }
    }
}

impl Body for Spark {
    fn advance(&mut self, step: &Step) {
        let dt = step.dt;
        self.ttl -= dt;
        self.pos += self.vel * dt;
        self.vel.y += SPARK_GRAVITY * dt;
    }

    fn render(&self, frame: &mut Frame) {
        frame.push(DrawCommand::Disc {
            center: self.pos,
            radius: self.radius,
            color: self.color.fade(life_fraction(self.ttl, self.life)),
        });
    }

    fn is_expired(&self, bounds: &Bounds) -> bool {
        self.ttl <= 0.0 || !bounds.contains(self.pos)
    }
}

/// An expanding ring marking an impact
#[derive(Debug, Clone)]
pub struct Ripple {
    pub origin: Vec2,
    pub life: f32,
    pub ttl: f32,
}

impl Ripple {
    pub fn new(origin: Vec2, life: f32) -> Self {
        Self {
            origin,
            life,
            ttl: life,
        }
    }

    /// 0 at birth, 1 at expiry
    pub fn progress(&self) -> f32 {
        1.0 - life_fraction(self.ttl, self.life)
    }

    pub fn radius(&self) -> f32 {
        self.progress() * RIPPLE_MAX_RADIUS
    }
}

impl Body for Ripple {
    fn advance(&mut self, step: &Step) {
        self.ttl -= step.dt;
    }

    fn render(&self, frame: &mut Frame) {
        let progress = self.progress();
        frame.push(DrawCommand::Ring {
            center: self.origin,
            radius: self.radius(),
            width: 1.0 + progress * 3.0,
            color: palette::RIPPLE.fade(1.0 - progress),
        });
    }

    fn is_expired(&self, _bounds: &Bounds) -> bool {
        self.ttl <= 0.0
    }
}
