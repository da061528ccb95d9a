//! Colors as semantic hex + alpha

/// An sRGB color with straight alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    /// Opaque color from a packed `0xRRGGBB` value
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 1.0,
        }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb` (leading `#` optional) with the given alpha
    pub fn from_hex_str(hex: &str, alpha: f32) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 {
            return None;
        }
        let packed = u32::from_str_radix(digits, 16).ok()?;
        Some(Self::hex(packed).with_alpha(alpha))
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Multiply the existing alpha
    pub fn fade(self, factor: f32) -> Self {
        self.with_alpha(self.a * factor)
    }

    /// CSS `rgba(r,g,b,a)` string
    pub fn to_css(&self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }

    /// Normalized channels for vertex colors
    pub fn to_f32(&self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a,
        ]
    }

    /// Linear blend toward `other` (t = 0 keeps self)
    pub fn lerp(&self, other: &Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgba {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }
}

/// Named colors used by the particle kinds
pub mod palette {
    use super::Rgba;

    /// Asteroid body tints
    pub const ASTEROID_TINTS: [Rgba; 5] = [
        Rgba::hex(0xff8a72),
        Rgba::hex(0xff6f61),
        Rgba::hex(0xff3b30),
        Rgba::hex(0xb22222),
        Rgba::hex(0x8b1b16),
    ];
    pub const ASTEROID_HIGHLIGHT: Rgba = Rgba::hex(0xffb9a8);
    pub const ASTEROID_SHADOW: Rgba = Rgba::hex(0x2b0d0d);
    pub const CRATER: Rgba = Rgba::rgba(0, 0, 0, 0.18);
    pub const SMOKE: Rgba = Rgba::hex(0x2b0d0d);
    pub const SPARK: Rgba = Rgba::hex(0xffd9c9);
    pub const RIPPLE: Rgba = Rgba::rgba(255, 200, 170, 0.18);
    pub const SHOT: Rgba = Rgba::rgba(255, 255, 220, 1.0);
    pub const STAR: Rgba = Rgba::rgba(255, 255, 255, 0.08);
    pub const SKY_TOP: Rgba = Rgba::rgba(10, 8, 12, 0.0);
    pub const SKY_BOTTOM: Rgba = Rgba::rgba(5, 4, 6, 0.35);
}
