//! Static scene mixing matrix transforms with the manual reflection.

use super::Demo;
use crate::colors::Color;
use crate::engine::{DrawOptions, Engine};
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::mesh::{self, Mesh, SHAPE_AREA};
use crate::projection::Projection;
use crate::render::RenderState;
use crate::transform;

const VIEW_HALF_EXTENT: f32 = 3.0;
const CIRCLE_SEGMENTS: u32 = 100;

pub struct ShapesDemo {
    square: Mesh,
    triangle: Mesh,
    circle: Mesh,
}

impl Default for ShapesDemo {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapesDemo {
    pub fn new() -> Self {
        let triangle = Mesh::equilateral_triangle(mesh::triangle_side(SHAPE_AREA), Color::RED)
            .map_positions(|p| {
                let q = transform::reflect(p.xy(), false, true);
                Vec3::new(q.x, q.y, p.z)
            });
        Self {
            square: Mesh::square(mesh::square_side(SHAPE_AREA), Color::BLUE),
            triangle,
            circle: Mesh::circle(mesh::circle_radius(SHAPE_AREA), CIRCLE_SEGMENTS, Color::GREEN),
        }
    }

    fn placements(&self) -> [(&Mesh, Mat4); 3] {
        [
            (
                &self.square,
                Mat4::translation(-1.5, 0.0, 0.0)
                    * Mat4::rotation_z(45f32.to_radians())
                    * Mat4::scaling(1.2, 1.2, 1.0),
            ),
            (
                &self.triangle,
                Mat4::translation(1.5, 0.0, 0.0) * Mat4::rotation_z((-30f32).to_radians()),
            ),
            (
                &self.circle,
                Mat4::translation(0.0, -1.5, 0.0) * Mat4::scaling(1.5, 0.5, 1.0),
            ),
        ]
    }
}

impl Demo for ShapesDemo {
    fn title(&self) -> String {
        "Square, triangle and circle with transforms".to_string()
    }

    fn setup(&mut self, engine: &mut Engine) {
        engine.set_projection(Projection::fit_ortho(
            VIEW_HALF_EXTENT,
            engine.width(),
            engine.height(),
        ));
        engine.set_view(Mat4::identity());
        engine.set_render_state(RenderState::OVERLAY);
    }

    fn resize(&mut self, engine: &mut Engine, width: u32, height: u32) {
        engine.set_projection(Projection::fit_ortho(VIEW_HALF_EXTENT, width, height));
    }

    fn render(&mut self, engine: &mut Engine) {
        engine.begin_frame(Color::WHITE);
        for (mesh, model) in self.placements() {
            engine.draw_mesh(mesh, &model, &DrawOptions::default());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 20 pixels per world unit, origin at (60, 60).
    fn render() -> Engine {
        let mut demo = ShapesDemo::new();
        let mut engine = Engine::new(120, 120);
        demo.setup(&mut engine);
        demo.render(&mut engine);
        engine
    }

    #[test]
    fn test_shapes_land_where_placed() {
        let engine = render();
        // Square centre (-1.5, 0), triangle centroid (1.5, 0), circle centre (0, -1.5).
        assert_eq!(engine.pixel(30, 60), Some(Color::BLUE.to_argb()));
        assert_eq!(engine.pixel(90, 60), Some(Color::RED.to_argb()));
        assert_eq!(engine.pixel(60, 90), Some(Color::GREEN.to_argb()));
        assert_eq!(engine.pixel(60, 60), Some(Color::WHITE.to_argb()));
        assert_eq!(engine.pixel(2, 2), Some(Color::WHITE.to_argb()));
    }

    #[test]
    fn test_circle_is_squashed() {
        let engine = render();
        // Radius ~0.56 scaled to 0.85 wide and 0.28 tall.
        assert_eq!(engine.pixel(60 + 15, 90), Some(Color::GREEN.to_argb()));
        assert_eq!(engine.pixel(60, 90 - 10), Some(Color::WHITE.to_argb()));
    }

    #[test]
    fn test_manual_reflection_mirrors_x() {
        let demo = ShapesDemo::new();
        // Reflecting about the Y axis flips x only; the apex stays up.
        let apex = demo
            .triangle
            .vertices()
            .iter()
            .map(|v| v.position.y)
            .fold(f32::MIN, f32::max);
        assert!(apex > 0.0);
        let xs: Vec<f32> = demo.triangle.vertices().iter().map(|v| v.position.x).collect();
        assert!(xs[0] > 0.0 && xs[1] < 0.0);
    }
}
