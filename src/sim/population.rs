//! Population manager
//!
//! Owns one collection per particle kind. Asteroids and background shots
//! have a fixed size between populate calls and recycle in place; the
//! explosion kinds grow on explosions and shrink as they expire.

use super::asteroid::Asteroid;
use super::body::{Body, Step, advance_and_cull, render_all};
use super::danger::{self, Miss};
use super::draw::Frame;
use super::effects::{Ripple, Shard, Smoke, Spark};
use super::rng::GameRng;
use super::shot::BackgroundShot;
use super::viewport::Viewport;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Default)]
pub struct Populations {
    pub shots: Vec<BackgroundShot>,
    pub asteroids: Vec<Asteroid>,
    pub smoke: Vec<Smoke>,
    pub shards: Vec<Shard>,
    pub sparks: Vec<Spark>,
    pub ripples: Vec<Ripple>,
}

impl Populations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything and seed asteroids and shots for the viewport
    pub fn populate(&mut self, rng: &mut GameRng, viewport: &Viewport, tuning: &Tuning) {
        self.clear();

        let asteroid_count = tuning.asteroid_count(viewport.width, viewport.height);
        self.asteroids
            .extend((0..asteroid_count).map(|_| Asteroid::spawn(rng, viewport, tuning)));

        let shot_count = tuning.shot_count(viewport.width);
        self.shots
            .extend((0..shot_count).map(|_| BackgroundShot::spawn(rng, viewport)));

        log::debug!(
            "Populated {}x{}: {} asteroids, {} shots",
            viewport.width,
            viewport.height,
            asteroid_count,
            shot_count
        );
    }

    pub fn clear(&mut self) {
        self.shots.clear();
        self.asteroids.clear();
        self.smoke.clear();
        self.shards.clear();
        self.sparks.clear();
        self.ripples.clear();
    }

    /// Advance, cull and render every population in draw order:
    /// shots, asteroids (then the danger check), smoke, shards, sparks,
    /// ripples. Returns the misses registered this frame.
    pub fn tick(
        &mut self,
        step: &Step,
        rng: &mut GameRng,
        viewport: &Viewport,
        tuning: &Tuning,
        frame: &mut Frame,
    ) -> Vec<Miss> {
        let bounds = viewport.cull_bounds();
        let shot_bounds = viewport.shot_bounds();

        for shot in self.shots.iter_mut() {
            shot.advance(step);
            if shot.is_expired(&shot_bounds) {
                shot.reset(rng, viewport);
            }
        }
        render_all(&self.shots, frame);

        for asteroid in self.asteroids.iter_mut() {
            asteroid.advance(step);
        }
        render_all(&self.asteroids, frame);
        let misses = danger::evaluate(&mut self.asteroids, &mut self.ripples, rng, viewport, tuning);

        advance_and_cull(&mut self.smoke, step, &bounds);
        render_all(&self.smoke, frame);

        advance_and_cull(&mut self.shards, step, &bounds);
        render_all(&self.shards, frame);

        advance_and_cull(&mut self.sparks, step, &bounds);
        render_all(&self.sparks, frame);

        advance_and_cull(&mut self.ripples, step, &bounds);
        render_all(&self.ripples, frame);

        misses
    }

    /// Live explosion particles of every kind
    pub fn transient_count(&self) -> usize {
        self.smoke.len() + self.shards.len() + self.sparks.len() + self.ripples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::draw::DrawCommand;
    use crate::tuning::Difficulty;
    use glam::Vec2;

    fn setup() -> (Populations, GameRng, Viewport, Tuning) {
        let mut rng = GameRng::from_seed(77);
        let viewport = Viewport::new(1200.0, 900.0);
        let tuning = Tuning::for_difficulty(Difficulty::Normal);
        let mut pops = Populations::new();
        pops.populate(&mut rng, &viewport, &tuning);
        (pops, rng, viewport, tuning)
    }

    #[test]
    fn test_populate_counts() {
        let (pops, _, viewport, tuning) = setup();
        assert_eq!(pops.asteroids.len(), tuning.asteroid_count(1200.0, 900.0));
        assert_eq!(pops.asteroids.len(), 12);
        assert_eq!(pops.shots.len(), tuning.shot_count(viewport.width));
        assert_eq!(pops.transient_count(), 0);
    }

    #[test]
    fn test_populate_clears_transients() {
        let (mut pops, mut rng, viewport, tuning) = setup();
        pops.ripples.push(Ripple::new(Vec2::ZERO, 1.0));
        pops.sparks.push(Spark::spawn(&mut rng, Vec2::ZERO));
        pops.populate(&mut rng, &viewport, &tuning);
        assert_eq!(pops.transient_count(), 0);
    }

    #[test]
    fn test_tick_culls_expired_in_same_frame() {
        let (mut pops, mut rng, viewport, tuning) = setup();
        // Several particles expiring on the same frame, interleaved with live ones
        for i in 0..6 {
            let life = if i % 2 == 0 { 0.01 } else { 10.0 };
            pops.ripples.push(Ripple::new(Vec2::new(i as f32, 0.0), life));
        }
        let mut frame = Frame::new();
        pops.tick(&Step::new(0.016), &mut rng, &viewport, &tuning, &mut frame);
        assert_eq!(pops.ripples.len(), 3);
        assert!(pops.ripples.iter().all(|r| r.ttl > 0.0));

        let rings = frame
            .iter()
            .filter(|c| matches!(c, DrawCommand::Ring { .. }))
            .count();
        assert_eq!(rings, 3);
    }

    #[test]
    fn test_shots_recycle_instead_of_dropping() {
        let (mut pops, mut rng, viewport, tuning) = setup();
        let count = pops.shots.len();
        for shot in pops.shots.iter_mut() {
            shot.ttl = 0.001;
        }
        let mut frame = Frame::new();
        pops.tick(&Step::new(0.05), &mut rng, &viewport, &tuning, &mut frame);
        assert_eq!(pops.shots.len(), count);
        assert!(pops.shots.iter().all(|s| s.ttl > 0.0));
    }

    #[test]
    fn test_shots_recycle_against_current_viewport() {
        let (mut pops, mut rng, _, tuning) = setup();
        for shot in pops.shots.iter_mut() {
            shot.pos = Vec2::new(900.0, 200.0);
            shot.speed = 0.0;
            shot.ttl = 10.0;
        }
        let narrow = Viewport::new(700.0, 900.0);
        let mut frame = Frame::new();
        pops.tick(&Step::new(0.016), &mut rng, &narrow, &tuning, &mut frame);
        assert!(pops.shots.iter().all(|s| s.pos.x <= 700.0));
    }

    #[test]
    fn test_tick_draw_order() {
        let (mut pops, mut rng, viewport, tuning) = setup();
        pops.smoke.push(Smoke::spawn(&mut rng, Vec2::new(600.0, 450.0), 12.0));
        pops.ripples.push(Ripple::new(Vec2::new(600.0, 450.0), 1.0));
        let mut frame = Frame::new();
        pops.tick(&Step::new(0.016), &mut rng, &viewport, &tuning, &mut frame);

        let first_line = frame.iter().position(|c| matches!(c, DrawCommand::Line { .. }));
        let first_blob = frame.iter().position(|c| matches!(c, DrawCommand::Blob { .. }));
        let first_disc = frame.iter().position(|c| matches!(c, DrawCommand::Disc { .. }));
        let last_ring = frame.iter().collect::<Vec<_>>().into_iter().rposition(|c| matches!(c, DrawCommand::Ring { .. }));
        assert!(first_line < first_blob);
        assert!(first_blob < first_disc);
        assert_eq!(last_ring, Some(frame.len() - 1));
    }

    #[test]
    fn test_missed_asteroid_is_recycled() {
        let (mut pops, mut rng, viewport, tuning) = setup();
        let count = pops.asteroids.len();
        pops.asteroids[0].pos.y = viewport.height;
        let mut frame = Frame::new();
        let misses = pops.tick(&Step::new(0.016), &mut rng, &viewport, &tuning, &mut frame);
        assert_eq!(misses.len(), 1);
        assert_eq!(pops.asteroids.len(), count);
        assert_eq!(pops.ripples.len(), 1);
    }
}
