//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing (delta-time clamp)
//! - Input events (coordinate correction, key mapping)

pub mod clock;
pub mod input;

pub use clock::FrameClock;
pub use input::{KeyAction, map_key, to_viewport};
