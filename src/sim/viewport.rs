//! Viewport geometry and resize debouncing

use glam::Vec2;

use super::body::Bounds;
use crate::consts::{
    DANGER_MARGIN, MIN_PLANET_HEIGHT, PLANET_HEIGHT_WIDTH_RATIO, RESIZE_POLL_MS,
    RESIZE_THRESHOLD_H, RESIZE_THRESHOLD_W,
};

/// Simulation coordinate space: CSS pixels, origin top-left, y down
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Rendered height of the planet element, when the host can measure it
    pub planet_height: Option<f32>,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
            planet_height: None,
        }
    }

    /// Visible planet height, falling back to a width-derived estimate
    pub fn planet_height(&self) -> f32 {
        match self.planet_height {
            Some(h) if h > 0.0 => h,
            _ => MIN_PLANET_HEIGHT.max(self.width * PLANET_HEIGHT_WIDTH_RATIO),
        }
    }

    /// y beyond which an asteroid's bottom edge counts as a miss
    pub fn danger_y(&self) -> f32 {
        self.height - self.planet_height() - DANGER_MARGIN
    }

    /// Where the planet's boost ripple appears
    pub fn planet_anchor(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height - self.planet_height() * 0.2)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    pub fn cull_bounds(&self) -> Bounds {
        Bounds::for_viewport(self.width, self.height)
    }

    pub fn shot_bounds(&self) -> Bounds {
        Bounds::for_shots(self.width, self.height)
    }
}

/// Polls the host size and reports only large changes, so minor layout
/// jitter does not wipe the field.
#[derive(Debug, Clone)]
pub struct ResizeWatcher {
    last_width: f32,
    last_height: f32,
    last_poll_ms: Option<f64>,
}

impl ResizeWatcher {
    pub fn new(viewport: &Viewport) -> Self {
        Self {
            last_width: viewport.width,
            last_height: viewport.height,
            last_poll_ms: None,
        }
    }

    /// Check the current size. Returns the new viewport dimensions when a
    /// poll is due and the size moved past the thresholds.
    pub fn poll(&mut self, now_ms: f64, width: f32, height: f32) -> Option<(f32, f32)> {
        match self.last_poll_ms {
            Some(last) if now_ms - last < RESIZE_POLL_MS => return None,
            _ => self.last_poll_ms = Some(now_ms),
        }
        let moved_w = (width - self.last_width).abs() > RESIZE_THRESHOLD_W;
        let moved_h = (height - self.last_height).abs() > RESIZE_THRESHOLD_H;
        if moved_w || moved_h {
            self.last_width = width;
            self.last_height = height;
            Some((width, height))
        } else {
            None
        }
    }
}
