//! Game controller
//!
//! Owns the `GameState` and its collaborators. Host callbacks (clicks,
//! keys, animation frames) come in here; queued input is applied on the
//! next frame and the resulting events go out to the audio sink and the
//! best-score store.

use glam::Vec2;

use crate::audio::AudioSink;
use crate::highscores::BestScoreStore;
use crate::platform::{FrameClock, KeyAction, map_key};
use crate::settings::Settings;
use crate::sim::state::{GameEvent, Hud};
use crate::sim::{Frame, GameRng, GameState, ResizeWatcher, TickInput, Viewport, tick};

pub struct App<S: BestScoreStore, A: AudioSink> {
    state: GameState,
    settings: Settings,
    clock: FrameClock,
    resize: ResizeWatcher,
    input: TickInput,
    store: S,
    audio: A,
}

impl<S: BestScoreStore, A: AudioSink> App<S, A> {
    pub fn new(settings: Settings, width: f32, height: f32, store: S, mut audio: A) -> Self {
        let rng = match settings.seed {
            Some(seed) => GameRng::from_seed(seed),
            None => GameRng::from_entropy(),
        };
        let viewport = Viewport::new(width, height);
        let best = store.get();
        let mut state = GameState::new(viewport, settings.tuning(), rng, best);
        state.star_count = settings.quality.star_count();

        audio.set_volume(settings.volume);
        audio.set_muted(settings.muted);

        log::info!(
            "Save Mars ready: {}x{} {} (seed {}, best {})",
            width,
            height,
            settings.difficulty.as_str(),
            state.rng.seed(),
            best
        );

        Self {
            resize: ResizeWatcher::new(&state.viewport),
            state,
            settings,
            clock: FrameClock::new(),
            input: TickInput::default(),
            store,
            audio,
        }
    }

    /// Run one animation frame at host time `now_ms`
    pub fn frame(&mut self, now_ms: f64) -> Frame {
        let dt = self.clock.delta(now_ms);
        let input = std::mem::take(&mut self.input);
        let frame = tick(&mut self.state, &input, dt);
        self.dispatch_events();
        frame
    }

    /// Unlock audio output. Call from inside the gesture handler itself;
    /// the queued input only reaches the simulation on the next frame.
    pub fn unlock_audio(&mut self) {
        self.audio.unlock();
    }

    /// Pointer press at a canvas-space position
    pub fn on_click(&mut self, point: Vec2) {
        self.input.pointers.push(point);
    }

    /// Touch start; every active touch point is tested
    pub fn on_touch(&mut self, points: &[Vec2]) {
        self.input.pointers.extend_from_slice(points);
    }

    /// Keyboard input. Returns true when the key was handled.
    pub fn on_key(&mut self, key: &str) -> bool {
        match map_key(key) {
            Some(KeyAction::ClearNearest) => self.input.clear_nearest = true,
            Some(KeyAction::Boost) => self.input.boost = true,
            Some(KeyAction::Restart) => self.input.restart = true,
            Some(KeyAction::ToggleMute) => {
                self.toggle_mute();
            }
            None => return false,
        }
        true
    }

    /// Planet clicked or tapped
    pub fn on_planet_activate(&mut self) {
        self.input.boost = true;
    }

    pub fn on_restart(&mut self) {
        self.input.restart = true;
    }

    /// Host resize event: track the new size without touching the field.
    /// Re-seeding waits for [`App::poll_resize`] to see a large change.
    pub fn on_resize(&mut self, width: f32, height: f32) {
        self.state.set_size(width, height);
    }

    /// Poll the host size; re-seeds only on a large change. Returns true
    /// when the field was rebuilt.
    pub fn poll_resize(&mut self, now_ms: f64, width: f32, height: f32) -> bool {
        match self.resize.poll(now_ms, width, height) {
            Some((w, h)) => {
                log::info!("Viewport changed to {}x{}", w, h);
                self.state.resize(w, h);
                true
            }
            None => false,
        }
    }

    /// Measured height of the planet element (None if not measurable)
    pub fn set_planet_height(&mut self, height: Option<f32>) {
        self.state.set_planet_height(height);
    }

    /// Flip mute and persist the preference. Returns the new state.
    pub fn toggle_mute(&mut self) -> bool {
        let muted = !self.audio.is_muted();
        self.audio.set_muted(muted);
        self.settings.muted = muted;
        self.settings.save();
        muted
    }

    pub fn is_muted(&self) -> bool {
        self.audio.is_muted()
    }

    pub fn hud(&self) -> Hud {
        self.state.hud()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Explosion { .. } => self.audio.play_explosion(),
                GameEvent::BestScoreRaised(best) => {
                    log::debug!("New best score {}", best);
                    self.store.set(best);
                }
                GameEvent::Missed(miss) => {
                    log::debug!("Missed asteroid at x={:.0} (-{})", miss.x, miss.penalty());
                }
                GameEvent::BoostChanged(_) | GameEvent::Restarted => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentAudio;
    use crate::highscores::MemoryStore;
    use crate::sim::BoostPhase;
    use crate::sim::asteroid::Asteroid;

    fn app(best: u64) -> App<MemoryStore, SilentAudio> {
        let settings = Settings {
            seed: Some(11),
            ..Default::default()
        };
        App::new(settings, 1000.0, 800.0, MemoryStore::new(best), SilentAudio::new())
    }

    fn place(app: &mut App<MemoryStore, SilentAudio>, index: usize, pos: Vec2) {
        app.state_mut().populations.asteroids[index] = Asteroid::at(pos, 25.0);
    }

    #[test]
    fn test_click_plays_one_cue_and_persists_best() {
        let mut app = app(0);
        place(&mut app, 0, Vec2::new(300.0, 300.0));
        app.on_click(Vec2::new(302.0, 298.0));
        app.frame(0.0);

        assert_eq!(app.audio().played, 1);
        assert_eq!(app.hud().cleared, 1);
        assert_eq!(app.store().get(), app.hud().score);
        assert_eq!(app.store().writes, 1);
    }

    #[test]
    fn test_best_not_written_below_stored() {
        let mut app = app(500);
        place(&mut app, 0, Vec2::new(300.0, 300.0));
        app.on_click(Vec2::new(300.0, 300.0));
        app.frame(0.0);
        assert_eq!(app.audio().played, 1);
        assert_eq!(app.store().writes, 0);
        assert_eq!(app.hud().best, 500);
    }

    #[test]
    fn test_touch_tests_every_point() {
        let mut app = app(0);
        place(&mut app, 0, Vec2::new(200.0, 200.0));
        place(&mut app, 1, Vec2::new(600.0, 200.0));
        app.on_touch(&[Vec2::new(200.0, 200.0), Vec2::new(600.0, 200.0)]);
        app.frame(0.0);
        assert_eq!(app.hud().cleared, 2);
        assert_eq!(app.audio().played, 2);
    }

    #[test]
    fn test_input_is_consumed_once() {
        let mut app = app(0);
        place(&mut app, 0, Vec2::new(300.0, 300.0));
        app.on_click(Vec2::new(300.0, 300.0));
        app.frame(0.0);
        place(&mut app, 0, Vec2::new(300.0, 300.0));
        app.frame(16.0);
        assert_eq!(app.hud().cleared, 1);
    }

    #[test]
    fn test_keys_and_planet() {
        let mut app = app(0);
        assert!(!app.on_key("ArrowUp"));
        assert!(app.on_key("m"));
        assert!(app.is_muted());
        assert!(app.settings().muted);

        app.on_planet_activate();
        app.frame(0.0);
        assert!(matches!(app.hud().boost, BoostPhase::Boosting { .. }));
    }

    #[test]
    fn test_unlock_happens_before_the_frame() {
        let mut app = app(0);
        place(&mut app, 0, Vec2::new(300.0, 300.0));
        app.unlock_audio();
        app.on_click(Vec2::new(300.0, 300.0));
        assert_eq!(app.audio().unlocks, 1);
        assert_eq!(app.audio().played, 0);

        app.frame(0.0);
        assert_eq!(app.audio().unlocks, 1);
        assert_eq!(app.audio().played, 1);
    }

    #[test]
    fn test_muted_clears_play_nothing() {
        let mut app = app(0);
        app.toggle_mute();
        place(&mut app, 0, Vec2::new(300.0, 300.0));
        app.on_click(Vec2::new(300.0, 300.0));
        app.frame(0.0);
        assert_eq!(app.audio().played, 0);
        assert_eq!(app.hud().cleared, 1);
    }

    #[test]
    fn test_restart_button() {
        let mut app = app(0);
        app.state_mut().scoreboard.score = 30;
        app.on_restart();
        app.frame(0.0);
        assert_eq!(app.hud().score, 0);
        assert_eq!(app.hud().best, 30);
        assert_eq!(app.store().get(), 30);
    }

    #[test]
    fn test_resize_polling_thresholds() {
        let mut app = app(0);
        assert!(!app.poll_resize(0.0, 1050.0, 820.0));
        // Not due yet
        assert!(!app.poll_resize(100.0, 1400.0, 800.0));
        assert!(app.poll_resize(900.0, 1400.0, 800.0));
        assert_eq!(app.state().viewport.width, 1400.0);
    }

    #[test]
    fn test_on_resize_keeps_field() {
        let mut app = app(0);
        let first = app.state().populations.asteroids[0].pos;
        app.on_resize(1030.0, 790.0);
        assert_eq!(app.state().viewport.width, 1030.0);
        assert_eq!(app.state().populations.asteroids[0].pos, first);
    }

    #[test]
    fn test_seeded_runs_match() {
        let mut a = app(0);
        let mut b = app(0);
        for i in 0..30 {
            let fa = a.frame(i as f64 * 16.0);
            let fb = b.frame(i as f64 * 16.0);
            assert_eq!(fa.commands, fb.commands);
        }
    }
}
