//! Edge function-based triangle rasterization.
//!
//! # Algorithm Overview
//!
//! 1. Compute a bounding box around the triangle
//! 2. For each pixel centre in the box, evaluate three edge functions
//! 3. The pixel is covered if all three agree in sign
//!
//! For an edge from A to B the edge function at P is the 2D cross product
//!
//! ```text
//! E(P) = (P.x - A.x) * (B.y - A.y) - (P.y - A.y) * (B.x - A.x)
//! ```
//!
//! and the three values divided by the triangle's signed area are the
//! barycentric coordinates used to interpolate depth, colors and UVs.
//!
//! # Fill Convention
//!
//! Pixels exactly on an edge are covered only when the edge is a top or left
//! edge, so triangles sharing an edge (quads, circle fans) never write the
//! same pixel twice. That matters once blending is enabled.
//!
//! # References
//!
//! - Juan Pineda, "A Parallel Algorithm for Polygon Rasterization" (1988)

use super::shader::{FlatShader, GouraudShader, PixelShader, TextureModulateShader};
use super::{Rasterizer, Triangle};
use crate::math::vec3::Vec3;
use crate::render::framebuffer::FrameBuffer;
use crate::render::RenderState;
use crate::texture::Texture;

#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeFunctionRasterizer;

impl EdgeFunctionRasterizer {
    pub fn new() -> Self {
        EdgeFunctionRasterizer
    }

    #[inline]
    fn edge_function(a: Vec3, b: Vec3, p: Vec3) -> f32 {
        (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
    }

    /// Whether the edge A -> B is a top or left edge of a triangle with
    /// positive signed area (screen y grows downwards).
    #[inline]
    fn is_top_left(a: Vec3, b: Vec3) -> bool {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        dy > 0.0 || (dy == 0.0 && dx < 0.0)
    }

    #[inline]
    fn covers(w: f32, top_left: bool) -> bool {
        w > 0.0 || (w == 0.0 && top_left)
    }

    /// Rasterize a triangle with positive signed area using `shader`.
    fn rasterize_with_shader<S: PixelShader>(
        triangle: &Triangle,
        area: f32,
        buffer: &mut FrameBuffer,
        shader: &S,
        state: RenderState,
    ) {
        let [v0, v1, v2] = triangle.points;

        let min_x = (v0.x.min(v1.x).min(v2.x).floor() as i32).max(0);
        let max_x = (v0.x.max(v1.x).max(v2.x).ceil() as i32).min(buffer.width() as i32 - 1);
        let min_y = (v0.y.min(v1.y).min(v2.y).floor() as i32).max(0);
        let max_y = (v0.y.max(v1.y).max(v2.y).ceil() as i32).min(buffer.height() as i32 - 1);

        let inv_area = 1.0 / area;
        let top_left = [
            Self::is_top_left(v1, v2),
            Self::is_top_left(v2, v0),
            Self::is_top_left(v0, v1),
        ];

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                // Sample at pixel center
                let p = Vec3::new(x as f32 + 0.5, y as f32 + 0.5, 0.0);

                let w0 = Self::edge_function(v1, v2, p);
                let w1 = Self::edge_function(v2, v0, p);
                let w2 = Self::edge_function(v0, v1, p);

                if Self::covers(w0, top_left[0])
                    && Self::covers(w1, top_left[1])
                    && Self::covers(w2, top_left[2])
                {
                    let lambda = [w0 * inv_area, w1 * inv_area, w2 * inv_area];
                    let depth = lambda[0] * v0.z + lambda[1] * v1.z + lambda[2] * v2.z;
                    buffer.plot(x, y, depth, shader.shade(lambda), state);
                }
            }
        }
    }
}

impl Rasterizer for EdgeFunctionRasterizer {
    /// Fills a triangle, picking the cheapest shader that reproduces it:
    ///
    /// | texture | vertex colors | Shader Used |
    /// |---------|---------------|-------------|
    /// | Some | * | TextureModulateShader |
    /// | None | uniform | FlatShader |
    /// | None | varying | GouraudShader |
    fn fill_triangle(
        &self,
        triangle: &Triangle,
        buffer: &mut FrameBuffer,
        texture: Option<&Texture>,
        state: RenderState,
    ) {
        let [v0, v1, v2] = triangle.points;
        let area = Self::edge_function(v0, v1, v2);
        if area.abs() < f32::EPSILON || !area.is_finite() {
            return; // Degenerate triangle
        }

        // Normalize the winding so that covered pixels have positive edge values.
        let (triangle, area) = if area < 0.0 {
            (triangle.flipped(), -area)
        } else {
            (*triangle, area)
        };

        match texture {
            Some(tex) => {
                let shader = TextureModulateShader::new(tex, triangle.uvs, triangle.colors);
                Self::rasterize_with_shader(&triangle, area, buffer, &shader, state);
            }
            None if triangle.is_uniform_color() => {
                let shader = FlatShader::new(triangle.colors[0]);
                Self::rasterize_with_shader(&triangle, area, buffer, &shader, state);
            }
            None => {
                let shader = GouraudShader::new(triangle.colors);
                Self::rasterize_with_shader(&triangle, area, buffer, &shader, state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::Color;

    const W: u32 = 16;
    const H: u32 = 16;

    fn count_written(color: &[u32]) -> usize {
        color.iter().filter(|&&c| c != 0).count()
    }

    #[test]
    fn test_winding_does_not_matter() {
        let points = [
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(12.0, 2.0, 1.0),
            Vec3::new(5.0, 14.0, 1.0),
        ];
        let rasterizer = EdgeFunctionRasterizer::new();

        let mut a = vec![0u32; (W * H) as usize];
        let mut da = vec![0.0f32; (W * H) as usize];
        let tri = Triangle::flat(points, Color::RED);
        rasterizer.fill_triangle(&tri, &mut FrameBuffer::new(&mut a, &mut da, W, H), None, RenderState::default());

        let mut b = vec![0u32; (W * H) as usize];
        let mut db = vec![0.0f32; (W * H) as usize];
        rasterizer.fill_triangle(
            &tri.flipped(),
            &mut FrameBuffer::new(&mut b, &mut db, W, H),
            None,
            RenderState::default(),
        );

        assert!(count_written(&a) > 0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_shared_edge_is_drawn_once() {
        // Two halves of an axis-aligned square sharing the diagonal; every
        // pixel of the square must be blended exactly once.
        let corners = [
            Vec3::new(2.0, 2.0, 1.0),
            Vec3::new(10.0, 2.0, 1.0),
            Vec3::new(10.0, 10.0, 1.0),
            Vec3::new(2.0, 10.0, 1.0),
        ];
        let half = Color::WHITE.with_alpha(0.5);
        let rasterizer = EdgeFunctionRasterizer::new();
        let mut color = vec![0xFF000000u32; (W * H) as usize];
        let mut depth = vec![0.0f32; (W * H) as usize];
        {
            let mut fb = FrameBuffer::new(&mut color, &mut depth, W, H);
            for tri in [
                Triangle::flat([corners[0], corners[1], corners[2]], half),
                Triangle::flat([corners[0], corners[2], corners[3]], half),
            ] {
                rasterizer.fill_triangle(&tri, &mut fb, None, RenderState::OVERLAY);
            }
        }

        let single = half.blend_over(0xFF000000);
        let covered: Vec<u32> = color.iter().copied().filter(|&c| c != 0xFF000000).collect();
        assert_eq!(covered.len(), 64);
        assert!(covered.iter().all(|&c| c == single));
    }

    #[test]
    fn test_degenerate_triangle_draws_nothing() {
        let mut color = vec![0u32; (W * H) as usize];
        let mut depth = vec![0.0f32; (W * H) as usize];
        let tri = Triangle::flat(
            [Vec3::new(1.0, 1.0, 1.0), Vec3::new(5.0, 5.0, 1.0), Vec3::new(9.0, 9.0, 1.0)],
            Color::RED,
        );
        EdgeFunctionRasterizer::new().fill_triangle(
            &tri,
            &mut FrameBuffer::new(&mut color, &mut depth, W, H),
            None,
            RenderState::default(),
        );
        assert_eq!(count_written(&color), 0);
    }

    #[test]
    fn test_depth_is_interpolated() {
        let mut color = vec![0u32; (W * H) as usize];
        let mut depth = vec![0.0f32; (W * H) as usize];
        let tri = Triangle::flat(
            [Vec3::new(0.0, 0.0, 1.0), Vec3::new(16.0, 0.0, 1.0), Vec3::new(0.0, 16.0, 1.0)],
            Color::RED,
        );
        EdgeFunctionRasterizer::new().fill_triangle(
            &tri,
            &mut FrameBuffer::new(&mut color, &mut depth, W, H),
            None,
            RenderState::default(),
        );
        let written: Vec<f32> = depth.iter().copied().filter(|&d| d != 0.0).collect();
        assert!(!written.is_empty());
        assert!(written.iter().all(|&d| (d - 1.0).abs() < 1e-5));
    }
}
