//! Draw commands handed to the rendering backend
//!
//! Every particle kind renders into a [`Frame`] as plain shapes in viewport
//! pixels. The backend decides how to rasterize them.

use glam::Vec2;

use super::color::Rgba;

/// Radial fill used for asteroid bodies
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    /// Where the highlight sits
    pub focus: Vec2,
    pub inner: Rgba,
    pub middle: Rgba,
    pub outer: Rgba,
}

/// A single drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Wipe the frame buffer
    Clear,
    /// Axis-aligned rectangle with a top-to-bottom gradient
    VerticalGradient {
        min: Vec2,
        max: Vec2,
        top: Rgba,
        bottom: Rgba,
    },
    /// Filled disc
    Disc { center: Vec2, radius: f32, color: Rgba },
    /// Filled ellipse rotated by `rotation` radians
    Ellipse {
        center: Vec2,
        radii: Vec2,
        rotation: f32,
        color: Rgba,
    },
    /// Filled closed outline with a radial gradient and an optional stroke
    Blob {
        center: Vec2,
        outline: Vec<Vec2>,
        fill: RadialGradient,
        stroke: Option<(f32, Rgba)>,
    },
    /// Filled triangle
    Triangle { points: [Vec2; 3], color: Rgba },
    /// Stroked circle
    Ring {
        center: Vec2,
        radius: f32,
        width: f32,
        color: Rgba,
    },
    /// Stroked line segment
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Rgba,
    },
}

/// Ordered draw commands for one frame
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }
}
