//! Game state aggregate
//!
//! Everything the frame loop mutates lives in `GameState`. Side effects for
//! the host (audio, best-score persistence) are queued as `GameEvent`s and
//! drained by the controller after each callback.

use glam::Vec2;

use super::boost::{BoostPhase, SpeedBoost};
use super::color::Rgba;
use super::danger::Miss;
use super::effects::Ripple;
use super::explosion::{self, ExplosionCounts};
use super::population::Populations;
use super::rng::GameRng;
use super::score::Scoreboard;
use super::viewport::Viewport;
use crate::consts::BOOST_RIPPLE_LIFE;
use crate::tuning::Tuning;

/// Default background star count
pub const DEFAULT_STAR_COUNT: u32 = 40;

/// Signals for collaborators outside the simulation
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// One per explosion: play the explosion cue
    Explosion { pos: Vec2, base_count: u32 },
    /// Score passed the stored best; persist the new value
    BestScoreRaised(u64),
    /// An asteroid crossed the danger line
    Missed(Miss),
    /// Speed modulation entered a new phase
    BoostChanged(BoostPhase),
    /// Run counters were zeroed and the field re-seeded
    Restarted,
}

/// Snapshot of the counters shown in the HUD
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub score: u64,
    pub cleared: u32,
    pub misses: u32,
    pub best: u64,
    pub boost: BoostPhase,
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub rng: GameRng,
    pub populations: Populations,
    pub scoreboard: Scoreboard,
    pub boost: SpeedBoost,
    /// Stars drawn behind everything
    pub star_count: u32,
    /// Seconds of simulated time
    pub elapsed: f32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Build a populated field with a previously stored best score
    pub fn new(viewport: Viewport, tuning: Tuning, rng: GameRng, best: u64) -> Self {
        let boost = SpeedBoost::new(tuning.boost);
        let mut state = Self {
            tuning,
            viewport,
            rng,
            populations: Populations::new(),
            scoreboard: Scoreboard::with_best(best),
            boost,
            star_count: DEFAULT_STAR_COUNT,
            elapsed: 0.0,
            events: Vec::new(),
        };
        state.populate();
        state
    }

    /// Re-seed asteroids and shots for the current viewport
    pub fn populate(&mut self) {
        self.populations
            .populate(&mut self.rng, &self.viewport, &self.tuning);
    }

    /// Adopt new host dimensions, keeping the current field
    pub fn set_size(&mut self, width: f32, height: f32) {
        let planet_height = self.viewport.planet_height;
        self.viewport = Viewport::new(width, height);
        self.viewport.planet_height = planet_height;
    }

    /// Adopt new host dimensions and re-seed the field
    pub fn resize(&mut self, width: f32, height: f32) {
        self.set_size(width, height);
        self.populate();
    }

    /// Update the measured planet height (None falls back to an estimate)
    pub fn set_planet_height(&mut self, height: Option<f32>) {
        self.viewport.planet_height = height.filter(|h| *h > 0.0);
    }

    /// Resolve a pointer position against the asteroids. On a hit the
    /// asteroid explodes and respawns in the same slot.
    pub fn handle_pointer(&mut self, point: Vec2) -> bool {
        let asteroids = &self.populations.asteroids;
        let Some(index) = explosion::hit_test(asteroids, point, self.tuning.hit_slack) else {
            return false;
        };
        let base_count = self.tuning.hit_base_count(asteroids[index].size);
        self.destroy_asteroid(index, base_count);
        true
    }

    /// Keyboard clear: explode the asteroid nearest the viewport center
    /// if it is within reach.
    pub fn clear_nearest(&mut self) -> bool {
        let center = self.viewport.center();
        let reach = self.viewport.height * self.tuning.key_clear_radius_ratio;
        match explosion::nearest_to(&self.populations.asteroids, center, reach) {
            Some(index) => {
                self.destroy_asteroid(index, self.tuning.key_clear_base_count);
                true
            }
            None => false,
        }
    }

    fn destroy_asteroid(&mut self, index: usize, base_count: u32) {
        let (pos, color) = {
            let a = &self.populations.asteroids[index];
            (a.pos, a.color)
        };
        self.explode(pos, color, base_count);
        self.populations.asteroids[index].reset(&mut self.rng, &self.viewport, &self.tuning);
    }

    /// Spawn an explosion, credit the clear and queue exactly one cue
    pub fn explode(&mut self, pos: Vec2, color: Rgba, base_count: u32) -> ExplosionCounts {
        let counts = explosion::explode(
            &mut self.populations,
            &mut self.rng,
            pos,
            color,
            base_count,
            &self.tuning.explosion,
        );
        self.events.push(GameEvent::Explosion { pos, base_count });
        if self.scoreboard.record_clear(base_count) {
            self.events
                .push(GameEvent::BestScoreRaised(self.scoreboard.best));
        }
        counts
    }

    /// Start a speed boost from the planet. Ignored unless idle.
    pub fn trigger_boost(&mut self) -> bool {
        if !self.boost.trigger() {
            log::debug!("Boost ignored while {}", self.boost.phase().as_str());
            return false;
        }
        self.populations
            .ripples
            .push(Ripple::new(self.viewport.planet_anchor(), BOOST_RIPPLE_LIFE));
        self.events.push(GameEvent::BoostChanged(self.boost.phase()));
        log::info!("Speed boost started");
        true
    }

    /// Count the boost windows down by `dt`
    pub fn advance_boost(&mut self, dt: f32) {
        if let Some(phase) = self.boost.advance(dt) {
            log::debug!("Boost phase -> {}", phase.as_str());
            self.events.push(GameEvent::BoostChanged(phase));
        }
    }

    pub fn register_miss(&mut self, miss: Miss) {
        self.scoreboard.apply_miss(&miss);
        self.events.push(GameEvent::Missed(miss));
    }

    /// Commit best, zero the run and re-seed. The boost returns to idle.
    pub fn restart(&mut self) {
        if self.scoreboard.commit_best() {
            self.events
                .push(GameEvent::BestScoreRaised(self.scoreboard.best));
        }
        self.scoreboard.reset();
        self.boost.reset();
        self.populate();
        self.events.push(GameEvent::Restarted);
        log::info!("Restarted (best {})", self.scoreboard.best);
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.scoreboard.score,
            cleared: self.scoreboard.cleared,
            misses: self.scoreboard.misses,
            best: self.scoreboard.best,
            boost: self.boost.phase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::asteroid::Asteroid;
    use crate::tuning::Difficulty;

    fn state() -> GameState {
        let mut vp = Viewport::new(1200.0, 900.0);
        vp.planet_height = Some(120.0);
        GameState::new(
            vp,
            Tuning::for_difficulty(Difficulty::Normal),
            GameRng::from_seed(9),
            0,
        )
    }

    #[test]
    fn test_new_is_populated() {
        let s = state();
        assert_eq!(s.populations.asteroids.len(), 12);
        assert_eq!(s.hud().score, 0);
        assert_eq!(s.hud().boost, BoostPhase::Idle);
    }

    #[test]
    fn test_pointer_hit_explodes_and_respawns() {
        let mut s = state();
        s.populations.asteroids[3] = Asteroid::at(Vec2::new(500.0, 300.0), 20.0);
        let count = s.populations.asteroids.len();

        assert!(s.handle_pointer(Vec2::new(505.0, 303.0)));
        assert_eq!(s.populations.asteroids.len(), count);
        assert!(s.populations.asteroids[3].pos.y < 0.0);
        assert_eq!(s.scoreboard.cleared, 1);
        // base = max(12, round(24)) = 24 -> gain 2
        assert_eq!(s.scoreboard.score, 2);

        let cues = s
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::Explosion { .. }))
            .count();
        assert_eq!(cues, 1);
        assert!(s.events().contains(&GameEvent::BestScoreRaised(2)));
    }

    #[test]
    fn test_pointer_miss_changes_nothing() {
        let mut s = state();
        for a in s.populations.asteroids.iter_mut() {
            a.pos = Vec2::new(100.0, -100.0);
        }
        assert!(!s.handle_pointer(Vec2::new(900.0, 700.0)));
        assert_eq!(s.scoreboard.cleared, 0);
        assert_eq!(s.populations.transient_count(), 0);
        assert!(s.events().is_empty());
    }

    #[test]
    fn test_clear_nearest_uses_key_base() {
        let mut s = state();
        for a in s.populations.asteroids.iter_mut() {
            a.pos = Vec2::new(50.0, -400.0);
        }
        s.populations.asteroids[0].pos = Vec2::new(620.0, 460.0);
        assert!(s.clear_nearest());
        assert!(s.events().contains(&GameEvent::Explosion {
            pos: Vec2::new(620.0, 460.0),
            base_count: 14
        }));
        // Nothing within 0.6 * H of the center
        for a in s.populations.asteroids.iter_mut() {
            a.pos = Vec2::new(50.0, -400.0);
        }
        assert!(!s.clear_nearest());
    }

    #[test]
    fn test_boost_trigger_adds_one_ripple() {
        let mut s = state();
        assert!(s.trigger_boost());
        assert_eq!(s.populations.ripples.len(), 1);
        assert_eq!(s.populations.ripples[0].origin, Vec2::new(600.0, 876.0));
        assert!(!s.trigger_boost());
        assert_eq!(s.populations.ripples.len(), 1);
    }

    #[test]
    fn test_restart_commits_best_and_resets() {
        let mut s = state();
        s.scoreboard.score = 40;
        s.scoreboard.cleared = 7;
        s.trigger_boost();
        s.drain_events();

        s.restart();
        assert_eq!(s.scoreboard.best, 40);
        assert_eq!(s.scoreboard.score, 0);
        assert_eq!(s.scoreboard.cleared, 0);
        assert_eq!(s.boost.phase(), BoostPhase::Idle);
        assert_eq!(s.populations.transient_count(), 0);
        assert_eq!(
            s.drain_events(),
            vec![GameEvent::BestScoreRaised(40), GameEvent::Restarted]
        );
    }

    #[test]
    fn test_resize_keeps_planet_height() {
        let mut s = state();
        s.resize(600.0, 900.0);
        assert_eq!(s.viewport.planet_height, Some(120.0));
        assert_eq!(s.populations.asteroids.len(), 6);
        s.set_planet_height(Some(0.0));
        assert_eq!(s.viewport.planet_height, None);
    }
}
