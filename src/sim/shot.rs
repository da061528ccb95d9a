//! Background shooting stars
//!
//! Purely decorative. The population has a fixed size: an expired shot is
//! re-rolled in place instead of being removed.

use glam::Vec2;

use super::body::{Body, Bounds, Step};
use super::color::palette;
use super::draw::{DrawCommand, Frame};
use super::rng::GameRng;
use super::viewport::Viewport;
use crate::polar;

#[derive(Debug, Clone)]
pub struct BackgroundShot {
    pub pos: Vec2,
    /// Streak length (px)
    pub length: f32,
    /// Travel speed (px/s)
    pub speed: f32,
    /// Travel direction (radians, pointing up-right)
    pub angle: f32,
    pub life: f32,
    pub ttl: f32,
}

impl BackgroundShot {
    pub fn spawn(rng: &mut GameRng, viewport: &Viewport) -> Self {
        let mut shot = Self {
            pos: Vec2::ZERO,
            length: 0.0,
            speed: 0.0,
            angle: 0.0,
            life: 0.0,
            ttl: 0.0,
        };
        shot.reset(rng, viewport);
        shot
    }

    /// Pick a new random trajectory
    pub fn reset(&mut self, rng: &mut GameRng, viewport: &Viewport) {
        let (w, h) = (viewport.width, viewport.height);
        self.pos = Vec2::new(rng.range(-w * 0.2, w), rng.range(-h * 0.2, h * 0.6));
        self.length = rng.range(6.0, 18.0);
        self.speed = rng.range(150.0, 420.0);
        self.angle = rng.range(-0.6, -0.2);
        self.life = rng.range(0.6, 1.6);
        self.ttl = self.life;
    }

    fn alpha(&self) -> f32 {
        if self.life <= 0.0 {
            return 0.0;
        }
        (self.ttl / self.life).clamp(0.0, 1.0)
    }
}

impl Body for BackgroundShot {
    fn advance(&mut self, step: &Step) {
        self.ttl -= step.dt;
        self.pos += polar(self.speed * step.dt, self.angle);
    }

    fn render(&self, frame: &mut Frame) {
        let alpha = self.alpha();
        let tail = self.pos - polar(self.length, self.angle);
        frame.push(DrawCommand::Line {
            from: self.pos,
            to: tail,
            width: (self.length * 0.12).max(1.0),
            // Layer alpha 0.9 over a 0.9 stroke
            color: palette::SHOT.with_alpha(0.81 * alpha * alpha),
        });
    }

    /// Expired shots are recycled by the population, never dropped.
    /// `bounds` comes from [`Viewport::shot_bounds`] for the current size.
    fn is_expired(&self, bounds: &Bounds) -> bool {
        self.ttl <= 0.0 || !bounds.contains(self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_ranges() {
        let vp = Viewport::new(1000.0, 500.0);
        let mut rng = GameRng::from_seed(31);
        for _ in 0..200 {
            let s = BackgroundShot::spawn(&mut rng, &vp);
            assert!(s.pos.x >= -200.0 && s.pos.x <= 1000.0);
            assert!(s.pos.y >= -100.0 && s.pos.y <= 300.0);
            assert!(s.angle >= -0.6 && s.angle <= -0.2);
            assert_eq!(s.ttl, s.life);
        }
    }

    #[test]
    fn test_travels_up_and_right() {
        let vp = Viewport::new(1000.0, 500.0);
        let mut rng = GameRng::from_seed(32);
        let mut s = BackgroundShot::spawn(&mut rng, &vp);
        let start = s.pos;
        s.advance(&Step::new(0.016));
        assert!(s.pos.x > start.x);
        assert!(s.pos.y < start.y);
    }

    #[test]
    fn test_expires_off_screen() {
        let vp = Viewport::new(1000.0, 500.0);
        let bounds = vp.shot_bounds();
        let mut rng = GameRng::from_seed(33);
        let mut s = BackgroundShot::spawn(&mut rng, &vp);
        assert!(!s.is_expired(&bounds));
        s.pos.x = 1051.0;
        assert!(s.is_expired(&bounds));
        s.reset(&mut rng, &vp);
        s.ttl = -0.01;
        assert!(s.is_expired(&bounds));
    }

    #[test]
    fn test_recycle_bound_follows_current_size() {
        let vp = Viewport::new(1000.0, 500.0);
        let mut rng = GameRng::from_seed(34);
        let mut s = BackgroundShot::spawn(&mut rng, &vp);
        s.pos = Vec2::new(900.0, 100.0);
        assert!(!s.is_expired(&vp.shot_bounds()));

        // Host shrank without a re-populate
        let narrow = Viewport::new(600.0, 500.0);
        assert!(s.is_expired(&narrow.shot_bounds()));
    }
}
