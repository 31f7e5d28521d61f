//! Alpha blending: a half-transparent circle over an opaque square.

use super::Demo;
use crate::colors::Color;
use crate::engine::{DrawOptions, Engine};
use crate::math::mat4::Mat4;
use crate::mesh::Mesh;
use crate::projection::Projection;
use crate::render::RenderState;

const CIRCLE_SEGMENTS: u32 = 100;

pub struct BlendDemo {
    square: Mesh,
    circle: Mesh,
}

impl Default for BlendDemo {
    fn default() -> Self {
        Self::new()
    }
}

impl BlendDemo {
    pub fn new() -> Self {
        Self {
            square: Mesh::square(1.0, Color::BLUE),
            circle: Mesh::circle(0.3, CIRCLE_SEGMENTS, Color::YELLOW.with_alpha(0.5)),
        }
    }
}

impl Demo for BlendDemo {
    fn title(&self) -> String {
        "Blending".to_string()
    }

    fn setup(&mut self, engine: &mut Engine) {
        engine.set_projection(Projection::fit_ortho(1.0, engine.width(), engine.height()));
        engine.set_view(Mat4::identity());
        engine.set_render_state(RenderState::OVERLAY);
    }

    fn resize(&mut self, engine: &mut Engine, width: u32, height: u32) {
        engine.set_projection(Projection::fit_ortho(1.0, width, height));
    }

    fn render(&mut self, engine: &mut Engine) {
        engine.begin_frame(Color::BLACK);
        let identity = Mat4::identity();
        engine.draw_mesh(&self.square, &identity, &DrawOptions::default());
        engine.draw_mesh(&self.circle, &identity, &DrawOptions::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_blends_over_square() {
        let mut demo = BlendDemo::new();
        let mut engine = Engine::new(100, 100);
        demo.setup(&mut engine);
        demo.render(&mut engine);

        // Half yellow over blue.
        assert_eq!(engine.pixel(50, 50), Some(0xFF808080));
        // Square outside the circle stays opaque blue.
        assert_eq!(engine.pixel(30, 30), Some(Color::BLUE.to_argb()));
        // Background beyond the square.
        assert_eq!(engine.pixel(5, 5), Some(Color::BLACK.to_argb()));
    }
}
