//! Pixel shaders for triangle rasterization.
//!
//! The rasterizer handles coverage and barycentric coordinates; a shader turns
//! those coordinates into a color, similar to how GPUs separate the
//! fixed-function rasterizer from fragment shaders.

use crate::colors::Color;
use crate::math::vec2::Vec2;
use crate::texture::Texture;

/// Trait for per-pixel shading computations.
///
/// The `lambda` parameter contains three weights [λ₀, λ₁, λ₂] that sum to 1.0
/// inside the triangle and interpolate any per-vertex attribute:
/// `attr_at_pixel = λ₀*attr₀ + λ₁*attr₁ + λ₂*attr₂`
pub trait PixelShader {
    fn shade(&self, lambda: [f32; 3]) -> Color;
}

#[inline]
fn interpolate_color(colors: &[Color; 3], lambda: [f32; 3]) -> Color {
    Color::rgba(
        lambda[0] * colors[0].r + lambda[1] * colors[1].r + lambda[2] * colors[2].r,
        lambda[0] * colors[0].g + lambda[1] * colors[1].g + lambda[2] * colors[2].g,
        lambda[0] * colors[0].b + lambda[1] * colors[1].b + lambda[2] * colors[2].b,
        lambda[0] * colors[0].a + lambda[1] * colors[1].a + lambda[2] * colors[2].a,
    )
}

/// Constant color for every pixel.
pub struct FlatShader {
    color: Color,
}

impl FlatShader {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl PixelShader for FlatShader {
    #[inline]
    fn shade(&self, _lambda: [f32; 3]) -> Color {
        self.color
    }
}

/// Gouraud shader - interpolates vertex colors using barycentric coordinates.
pub struct GouraudShader {
    colors: [Color; 3],
}

impl GouraudShader {
    pub fn new(colors: [Color; 3]) -> Self {
        Self { colors }
    }
}

impl PixelShader for GouraudShader {
    #[inline]
    fn shade(&self, lambda: [f32; 3]) -> Color {
        interpolate_color(&self.colors, lambda)
    }
}

/// Modulated texture shader - texel multiplied by the interpolated vertex color.
///
/// Vertex colors carry both the base color and any lighting, so textures pick
/// up shading and tint while still showing their detail.
pub struct TextureModulateShader<'a> {
    texture: &'a Texture,
    uvs: [Vec2; 3],
    colors: [Color; 3],
}

impl<'a> TextureModulateShader<'a> {
    pub fn new(texture: &'a Texture, uvs: [Vec2; 3], colors: [Color; 3]) -> Self {
        Self {
            texture,
            uvs,
            colors,
        }
    }

    #[inline]
    fn interpolate_uv(&self, lambda: [f32; 3]) -> (f32, f32) {
        let u = lambda[0] * self.uvs[0].x + lambda[1] * self.uvs[1].x + lambda[2] * self.uvs[2].x;
        let v = lambda[0] * self.uvs[0].y + lambda[1] * self.uvs[1].y + lambda[2] * self.uvs[2].y;
        (u, v)
    }
}

impl PixelShader for TextureModulateShader<'_> {
    #[inline]
    fn shade(&self, lambda: [f32; 3]) -> Color {
        let (u, v) = self.interpolate_uv(lambda);
        self.texture
            .sample(u, v)
            .modulate(interpolate_color(&self.colors, lambda))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gouraud_at_vertices_and_centre() {
        let shader = GouraudShader::new([Color::RED, Color::GREEN, Color::BLUE]);
        assert_eq!(shader.shade([1.0, 0.0, 0.0]), Color::RED);
        let centre = shader.shade([1.0 / 3.0; 3]);
        assert_relative_eq!(centre.r, 1.0 / 3.0);
        assert_relative_eq!(centre.a, 1.0);
    }

    #[test]
    fn test_texture_modulates_vertex_color() {
        let texture = Texture::checkerboard(2, 1, Color::WHITE, Color::rgb(0.5, 0.5, 0.5));
        let uvs = [Vec2::new(0.1, 0.9); 3];
        let shader = TextureModulateShader::new(&texture, uvs, [Color::RED; 3]);
        assert_eq!(shader.shade([1.0, 0.0, 0.0]), Color::RED);
    }
}
