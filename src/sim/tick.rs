//! Per-frame simulation tick
//!
//! One call per animation frame: apply queued input, count down the boost,
//! then advance and draw every population in a fixed order.

use glam::Vec2;

use super::body::Step;
use super::color::palette;
use super::draw::{DrawCommand, Frame};
use super::state::GameState;
use super::viewport::Viewport;

/// Input gathered between two frames
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Click / touch positions in simulation coordinates
    pub pointers: Vec<Vec2>,
    /// Clear the asteroid nearest the center (keyboard)
    pub clear_nearest: bool,
    /// Planet activated: request a speed boost
    pub boost: bool,
    /// Restart button
    pub restart: bool,
}

/// Advance the game by `dt` seconds and return the frame's draw list
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Frame {
    if input.restart {
        state.restart();
    }
    if input.boost {
        state.trigger_boost();
    }
    for &point in &input.pointers {
        state.handle_pointer(point);
    }
    if input.clear_nearest {
        state.clear_nearest();
    }

    state.advance_boost(dt);

    let mut frame = Frame::new();
    frame.push(DrawCommand::Clear);
    draw_background(&mut frame, &state.viewport, state.star_count);

    let step = Step::with_multiplier(dt, state.boost.multiplier());
    let misses = state.populations.tick(
        &step,
        &mut state.rng,
        &state.viewport,
        &state.tuning,
        &mut frame,
    );
    for miss in misses {
        state.register_miss(miss);
    }

    state.elapsed += dt;
    frame
}

/// Sky gradient and a fixed star field placed by index hashing, so stars
/// stay put from frame to frame without stored state.
pub fn draw_background(frame: &mut Frame, viewport: &Viewport, star_count: u32) {
    frame.push(DrawCommand::VerticalGradient {
        min: Vec2::ZERO,
        max: Vec2::new(viewport.width, viewport.height),
        top: palette::SKY_TOP,
        bottom: palette::SKY_BOTTOM,
    });

    let w = viewport.width.floor().max(1.0) as u64;
    let h = viewport.height.floor().max(1.0) as u64;
    let color = palette::STAR.fade(0.85);
    for i in 0..star_count as u64 {
        let x = (i * 9973 + w) % w;
        let y = (i * 7919 + h) % h;
        let radius = if i % 7 == 0 { 1.6 } else { 0.9 };
        frame.push(DrawCommand::Disc {
            center: Vec2::new(x as f32, y as f32),
            radius,
            color,
        });
    }
}
