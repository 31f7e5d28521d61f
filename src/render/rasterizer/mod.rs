//! Triangle rasterization.
//!
//! [`EdgeFunctionRasterizer`] walks the triangle's bounding box and tests each
//! pixel against the three edge equations; shading is delegated to the
//! shaders in [`shader`].

mod edgefunction;
mod shader;

pub use edgefunction::EdgeFunctionRasterizer;

use super::framebuffer::FrameBuffer;
use super::RenderState;
use crate::colors::Color;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::texture::Texture;

/// A triangle ready for rasterization in screen space.
///
/// `points` hold pixel coordinates in x/y and the depth value in z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub points: [Vec3; 3],
    pub colors: [Color; 3],
    pub uvs: [Vec2; 3],
}

impl Triangle {
    pub fn new(points: [Vec3; 3], colors: [Color; 3], uvs: [Vec2; 3]) -> Self {
        Self {
            points,
            colors,
            uvs,
        }
    }

    /// Single-color triangle without texture coordinates.
    pub fn flat(points: [Vec3; 3], color: Color) -> Self {
        Self::new(points, [color; 3], [Vec2::ZERO; 3])
    }

    /// The same triangle with the opposite winding.
    pub fn flipped(&self) -> Self {
        let [p0, p1, p2] = self.points;
        let [c0, c1, c2] = self.colors;
        let [t0, t1, t2] = self.uvs;
        Self::new([p0, p2, p1], [c0, c2, c1], [t0, t2, t1])
    }

    pub fn is_uniform_color(&self) -> bool {
        self.colors[0] == self.colors[1] && self.colors[1] == self.colors[2]
    }
}

/// Trait for triangle rasterization algorithms.
pub trait Rasterizer {
    /// Fill a triangle into the frame buffer.
    ///
    /// With a texture the texel is modulated by the interpolated vertex color;
    /// otherwise vertex colors are interpolated directly.
    fn fill_triangle(
        &self,
        triangle: &Triangle,
        buffer: &mut FrameBuffer,
        texture: Option<&Texture>,
        state: RenderState,
    );
}
