//! Color values and ARGB8888 packing.
//!
//! The renderer works with floating point [`Color`]s while shading and
//! converts to packed `0xAARRGGBB` words when writing into the color buffer.

use std::ops::{Add, Mul};

pub const BACKGROUND: u32 = 0xFF000000;

/// An RGBA color with channels nominally in [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
    pub const MAGENTA: Color = Color::rgb(1.0, 0.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 8-bit channels.
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Opaque color from signed 32-bit channels.
    ///
    /// The full `i32` range maps linearly onto [-1.0, 1.0]; negative results
    /// clamp to zero, so `i32::MAX` is full intensity.
    pub fn from_i32(r: i32, g: i32, b: i32) -> Self {
        let channel = |v: i32| ((2.0 * v as f64 + 1.0) / (u32::MAX as f64)).clamp(0.0, 1.0) as f32;
        Self::rgb(channel(r), channel(g), channel(b))
    }

    /// Opaque color from double precision channels.
    pub fn from_f64(r: f64, g: f64, b: f64) -> Self {
        Self::rgb(r as f32, g as f32, b as f32)
    }

    /// Unpack a `0xAARRGGBB` word.
    pub fn from_argb(argb: u32) -> Self {
        let channel = |shift: u32| ((argb >> shift) & 0xFF) as f32 / 255.0;
        Self::rgba(channel(16), channel(8), channel(0), channel(24))
    }

    /// Pack into a `0xAARRGGBB` word, clamping every channel to [0, 1].
    pub fn to_argb(self) -> u32 {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.a) << 24) | (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Component-wise product, used for texture modulation and lighting.
    pub fn modulate(self, other: Color) -> Self {
        Self::rgba(
            self.r * other.r,
            self.g * other.g,
            self.b * other.b,
            self.a * other.a,
        )
    }

    /// Source-over blend of `self` onto a packed destination pixel,
    /// weighting by the source alpha. The result is opaque.
    pub fn blend_over(self, dst: u32) -> u32 {
        let dst = Color::from_argb(dst);
        let a = self.a.clamp(0.0, 1.0);
        Color::rgb(
            self.r * a + dst.r * (1.0 - a),
            self.g * a + dst.g * (1.0 - a),
            self.b * a + dst.b * (1.0 - a),
        )
        .to_argb()
    }
}

/// Component-wise sum of the color channels; alpha is kept from the left side.
impl Add<Color> for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Self::Output {
        Color::rgba(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b, self.a)
    }
}

/// Scales the color channels; alpha is untouched.
impl Mul<f32> for Color {
    type Output = Color;

    fn mul(self, rhs: f32) -> Self::Output {
        Color::rgba(self.r * rhs, self.g * rhs, self.b * rhs, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pack_unpack() {
        assert_eq!(Color::RED.to_argb(), 0xFFFF0000);
        assert_eq!(Color::from_argb(0x80FF8000).to_argb(), 0x80FF8000);
    }

    #[test]
    fn test_pack_clamps() {
        assert_eq!(Color::rgb(2.0, -1.0, 0.5).to_argb(), 0xFFFF0080);
    }

    #[test]
    fn test_integer_formats() {
        assert_eq!(Color::from_u8(255, 128, 0).to_argb(), 0xFFFF8000);
        let c = Color::from_i32(i32::MAX, 0, i32::MAX);
        assert_relative_eq!(c.r, 1.0);
        assert_relative_eq!(c.g, 0.0, epsilon = 1e-6);
        assert_eq!(Color::from_i32(i32::MIN, 0, 0).r, 0.0);
    }

    #[test]
    fn test_blend_half_transparent_yellow_over_blue() {
        let out = Color::from_argb(Color::YELLOW.with_alpha(0.5).blend_over(0xFF0000FF));
        assert_relative_eq!(out.r, 0.5, epsilon = 0.01);
        assert_relative_eq!(out.g, 0.5, epsilon = 0.01);
        assert_relative_eq!(out.b, 0.5, epsilon = 0.01);
    }

    #[test]
    fn test_opaque_blend_replaces() {
        assert_eq!(Color::GREEN.blend_over(0xFFFF0000), 0xFF00FF00);
    }
}
