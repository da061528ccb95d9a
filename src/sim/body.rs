//! Capability shared by every particle kind

use glam::Vec2;

use super::draw::Frame;
use crate::consts::{CULL_MARGIN_BOTTOM, CULL_MARGIN_X, SHOT_MARGIN};

/// Per-frame integration parameters
#[derive(Debug, Clone, Copy)]
pub struct Step {
    /// Elapsed seconds since the previous frame
    pub dt: f32,
    /// Global fall-speed multiplier (only asteroids honor it)
    pub speed_multiplier: f32,
}

impl Step {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            speed_multiplier: 1.0,
        }
    }

    pub fn with_multiplier(dt: f32, speed_multiplier: f32) -> Self {
        Self {
            dt,
            speed_multiplier,
        }
    }
}

/// Region a transient particle may occupy before it is culled
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    /// Viewport extended by the standard cull margins
    pub fn for_viewport(width: f32, height: f32) -> Self {
        Self {
            min_x: -CULL_MARGIN_X,
            max_x: width + CULL_MARGIN_X,
            max_y: height + CULL_MARGIN_BOTTOM,
        }
    }

    /// Viewport extended by the background-shot recycle margin
    pub fn for_shots(width: f32, height: f32) -> Self {
        Self {
            min_x: f32::NEG_INFINITY,
            max_x: width + SHOT_MARGIN,
            max_y: height + SHOT_MARGIN,
        }
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= self.min_x && pos.x <= self.max_x && pos.y <= self.max_y
    }
}

/// A simulated body: advanced each frame, rendered read-only, and either
/// expired (removed or recycled by its owner) or alive.
pub trait Body {
    /// Integrate one frame. Transient kinds also burn down their ttl here.
    fn advance(&mut self, step: &Step);

    /// Emit draw commands for the current state
    fn render(&self, frame: &mut Frame);

    /// Whether the owner should drop (or recycle) this body
    fn is_expired(&self, bounds: &Bounds) -> bool;
}

/// Advance every body, then drop the expired ones in a second pass
pub fn advance_and_cull<B: Body>(bodies: &mut Vec<B>, step: &Step, bounds: &Bounds) -> usize {
    for body in bodies.iter_mut() {
        body.advance(step);
    }
    let before = bodies.len();
    bodies.retain(|b| !b.is_expired(bounds));
    before - bodies.len()
}

pub fn render_all<B: Body>(bodies: &[B], frame: &mut Frame) {
    for body in bodies {
        body.render(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_margins() {
        let b = Bounds::for_viewport(800.0, 600.0);
        assert!(b.contains(Vec2::new(-50.0, 0.0)));
        assert!(!b.contains(Vec2::new(-50.1, 0.0)));
        assert!(b.contains(Vec2::new(850.0, 800.0)));
        assert!(!b.contains(Vec2::new(851.0, 0.0)));
        assert!(!b.contains(Vec2::new(400.0, 800.5)));
        // No ceiling: debris thrown upward stays alive
        assert!(b.contains(Vec2::new(400.0, -1000.0)));
    }

    #[test]
    fn test_shot_bounds_margins() {
        let b = Bounds::for_shots(800.0, 600.0);
        assert!(b.contains(Vec2::new(-500.0, 650.0)));
        assert!(!b.contains(Vec2::new(850.5, 0.0)));
        assert!(!b.contains(Vec2::new(0.0, 650.5)));
    }
}
