//! Save Mars - an asteroid-clearing arcade game
//!
//! Core modules:
//! - `sim`: Simulation (particle populations, hit testing, explosions, scoring)
//! - `renderer`: Tessellation of draw commands and the WebGPU pipeline
//! - `platform`: Browser/native differences (frame clock, input mapping)
//! - `app`: Controller wiring the simulation to its collaborators
//! - `tuning`: Data-driven game balance

pub mod app;
pub mod audio;
pub mod error;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use app::App;
pub use error::ConfigError;
pub use highscores::{BestScoreStore, MemoryStore};
pub use settings::{QualityPreset, Settings};
pub use tuning::{Difficulty, Tuning};

/// Game configuration constants
pub mod consts {
    /// Upper bound on a single frame's delta time (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;
    /// Delta time used on the first frame or after a non-positive gap
    pub const FALLBACK_FRAME_DT: f32 = 0.016;
    /// Asteroid speeds are tuned in pixels per 60 Hz frame
    pub const REFERENCE_FPS: f32 = 60.0;

    /// Transient particles outside these margins are culled
    pub const CULL_MARGIN_X: f32 = 50.0;
    pub const CULL_MARGIN_BOTTOM: f32 = 200.0;
    /// Background shots recycle once past these margins
    pub const SHOT_MARGIN: f32 = 50.0;

    /// Ripple ring radius at the end of its life
    pub const RIPPLE_MAX_RADIUS: f32 = 60.0;
    pub const EXPLOSION_RIPPLE_LIFE: f32 = 0.35;
    pub const MISS_RIPPLE_LIFE: f32 = 0.45;
    pub const BOOST_RIPPLE_LIFE: f32 = 0.6;
    /// Miss ripples are drawn this far above the bottom edge
    pub const MISS_RIPPLE_INSET: f32 = 40.0;

    /// Gap between the planet's top edge and the danger line
    pub const DANGER_MARGIN: f32 = 6.0;
    /// Planet height used when the host cannot measure it
    pub const MIN_PLANET_HEIGHT: f32 = 80.0;
    pub const PLANET_HEIGHT_WIDTH_RATIO: f32 = 0.12;

    /// Resize polling (milliseconds) and the change needed to re-populate
    pub const RESIZE_POLL_MS: f64 = 800.0;
    pub const RESIZE_THRESHOLD_W: f32 = 100.0;
    pub const RESIZE_THRESHOLD_H: f32 = 80.0;
}

/// Round half away from zero, returning an integer count
#[inline]
pub fn round_count(value: f32) -> u32 {
    value.round().max(0.0) as u32
}

/// Point on a circle of `radius` around the origin at angle `theta`
#[inline]
pub fn polar(radius: f32, theta: f32) -> glam::Vec2 {
    glam::Vec2::new(radius * theta.cos(), radius * theta.sin())
}
