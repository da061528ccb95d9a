//! Shape generation for 2D primitives
//!
//! Every draw command becomes a run of colored triangles in viewport
//! pixels. The shader maps pixels to clip space.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::draw::RadialGradient;
use crate::sim::{DrawCommand, Frame, Rgba};

/// Fewest segments used for any circle, however small
const MIN_SEGMENTS: u32 = 6;

/// Where the middle gradient stop sits between focus and rim
const GRADIENT_MID_STOP: f32 = 0.6;

/// Tessellate a whole frame. `Clear` discards everything queued before it.
pub fn tessellate(frame: &Frame, segments: u32) -> Vec<Vertex> {
    let segments = segments.max(MIN_SEGMENTS);
    let mut vertices = Vec::with_capacity(frame.len() * segments as usize * 3);

    for command in frame.iter() {
        match command {
            DrawCommand::Clear => vertices.clear(),
            DrawCommand::VerticalGradient {
                min,
                max,
                top,
                bottom,
            } => vertices.extend(vertical_gradient(*min, *max, top.to_f32(), bottom.to_f32())),
            DrawCommand::Disc {
                center,
                radius,
                color,
            } => vertices.extend(circle(*center, *radius, color.to_f32(), segments)),
            DrawCommand::Ellipse {
                center,
                radii,
                rotation,
                color,
            } => vertices.extend(ellipse(*center, *radii, *rotation, color.to_f32(), segments)),
            DrawCommand::Blob {
                center,
                outline,
                fill,
                stroke,
            } => {
                vertices.extend(blob(*center, outline, fill));
                if let Some((width, color)) = stroke {
                    vertices.extend(polyline_loop(outline, *width, color.to_f32()));
                }
            }
            DrawCommand::Triangle { points, color } => {
                let c = color.to_f32();
                vertices.extend(points.iter().map(|p| Vertex::at(*p, c)));
            }
            DrawCommand::Ring {
                center,
                radius,
                width,
                color,
            } => {
                let half = width / 2.0;
                vertices.extend(ring(
                    *center,
                    (radius - half).max(0.0),
                    radius + half,
                    color.to_f32(),
                    segments,
                ));
            }
            DrawCommand::Line {
                from,
                to,
                width,
                color,
            } => vertices.extend(line(*from, *to, *width, color.to_f32())),
        }
    }

    vertices
}

/// Rectangle with `top` color along its upper edge and `bottom` along the lower
pub fn vertical_gradient(min: Vec2, max: Vec2, top: [f32; 4], bottom: [f32; 4]) -> [Vertex; 6] {
    [
        Vertex::new(min.x, min.y, top),
        Vertex::new(max.x, min.y, top),
        Vertex::new(min.x, max.y, bottom),
        Vertex::new(min.x, max.y, bottom),
        Vertex::new(max.x, min.y, top),
        Vertex::new(max.x, max.y, bottom),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    ellipse(center, Vec2::splat(radius), 0.0, color, segments)
}

/// Generate vertices for a filled ellipse rotated by `rotation`
pub fn ellipse(
    center: Vec2,
    radii: Vec2,
    rotation: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    let rot = Vec2::from_angle(rotation);
    let point = |i: u32| {
        let theta = (i as f32 / segments as f32) * 2.0 * PI;
        center + rot.rotate(Vec2::new(radii.x * theta.cos(), radii.y * theta.sin()))
    };

    for i in 0..segments {
        vertices.push(Vertex::at(center, color));
        vertices.push(Vertex::at(point(i), color));
        vertices.push(Vertex::at(point(i + 1), color));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let inner1 = center + crate::polar(inner_radius, theta1);
        let outer1 = center + crate::polar(outer_radius, theta1);
        let inner2 = center + crate::polar(inner_radius, theta2);
        let outer2 = center + crate::polar(outer_radius, theta2);

        // Two triangles per segment
        vertices.push(Vertex::at(inner1, color));
        vertices.push(Vertex::at(outer1, color));
        vertices.push(Vertex::at(inner2, color));

        vertices.push(Vertex::at(inner2, color));
        vertices.push(Vertex::at(outer1, color));
        vertices.push(Vertex::at(outer2, color));
    }

    vertices
}

/// A segment as a quad of the given width
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    let perp = dir.perp() * (width / 2.0);

    let a1 = from + perp;
    let b1 = from - perp;
    let a2 = to + perp;
    let b2 = to - perp;

    vec![
        Vertex::at(a1, color),
        Vertex::at(b1, color),
        Vertex::at(a2, color),
        Vertex::at(a2, color),
        Vertex::at(b1, color),
        Vertex::at(b2, color),
    ]
}

/// Closed outline stroke
pub fn polyline_loop(points: &[Vec2], width: f32, color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }
    let mut vertices = Vec::with_capacity(points.len() * 6);
    for (i, p) in points.iter().enumerate() {
        let next = points[(i + 1) % points.len()];
        vertices.extend(line(*p, next, width, color));
    }
    vertices
}

/// Filled outline shaded with a radial gradient. Each spoke is split at
/// the middle stop so the three colors interpolate close to a real radial
/// fill.
pub fn blob(center: Vec2, outline: &[Vec2], fill: &RadialGradient) -> Vec<Vertex> {
    if outline.len() < 3 {
        return Vec::new();
    }
    let reach = outline
        .iter()
        .map(|p| p.distance(fill.focus))
        .fold(0.0_f32, f32::max)
        .max(1e-3);
    let shade = |p: Vec2| sample_gradient(fill, p.distance(fill.focus) / reach).to_f32();
    let mid = |p: Vec2| center + (p - center) * GRADIENT_MID_STOP;

    let mut vertices = Vec::with_capacity(outline.len() * 9);
    let c = Vertex::at(center, shade(center));
    for (i, &a) in outline.iter().enumerate() {
        let b = outline[(i + 1) % outline.len()];
        let (ma, mb) = (mid(a), mid(b));
        let va = Vertex::at(a, shade(a));
        let vb = Vertex::at(b, shade(b));
        let vma = Vertex::at(ma, shade(ma));
        let vmb = Vertex::at(mb, shade(mb));

        vertices.extend([c, vma, vmb]);
        vertices.extend([vma, va, vmb, vmb, va, vb]);
    }
    vertices
}

/// Three-stop gradient: inner at 0, middle at 0.6, outer at 1
pub fn sample_gradient(fill: &RadialGradient, t: f32) -> Rgba {
    let t = t.clamp(0.0, 1.0);
    if t <= GRADIENT_MID_STOP {
        fill.inner.lerp(&fill.middle, t / GRADIENT_MID_STOP)
    } else {
        fill.middle
            .lerp(&fill.outer, (t - GRADIENT_MID_STOP) / (1.0 - GRADIENT_MID_STOP))
    }
}
