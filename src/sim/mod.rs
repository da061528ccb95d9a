//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module touches the DOM,
//! the GPU or audio:
//! - Randomness comes from an injected, seedable `GameRng`
//! - Rendering is a list of `DrawCommand`s per frame
//! - Side effects for collaborators are queued as `GameEvent`s

pub mod asteroid;
pub mod body;
pub mod boost;
pub mod color;
pub mod danger;
pub mod draw;
pub mod effects;
pub mod explosion;
pub mod population;
pub mod rng;
pub mod score;
pub mod shot;
pub mod state;
pub mod tick;
pub mod viewport;

pub use asteroid::{Asteroid, Crater};
pub use body::{Body, Bounds, Step};
pub use boost::{BoostPhase, SpeedBoost};
pub use color::Rgba;
pub use danger::Miss;
pub use draw::{DrawCommand, Frame};
pub use effects::{Ripple, Shard, Smoke, Spark};
pub use explosion::{ExplosionCounts, explode, hit_test, nearest_to};
pub use population::Populations;
pub use rng::GameRng;
pub use score::Scoreboard;
pub use shot::BackgroundShot;
pub use state::{GameEvent, GameState};
pub use tick::{TickInput, tick};
pub use viewport::{ResizeWatcher, Viewport};
