//! Interactive 2D transforms on one of three equal-area shapes.

use super::{Demo, LoopFeedback};
use crate::colors::Color;
use crate::engine::{DrawOptions, Engine};
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::mesh::{self, Mesh, SHAPE_AREA};
use crate::projection::Projection;
use crate::render::RenderState;
use crate::transform::{
    self, PipelineKind, TransformParameters, ROTATION_STEP, SCALE_STEP, TRANSLATE_STEP,
};
use crate::window::Key;

/// Half of the visible range on the shorter window axis.
const VIEW_HALF_EXTENT: f32 = 2.0;
const CIRCLE_SEGMENTS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeKind {
    #[default]
    Square,
    Triangle,
    Circle,
}

impl ShapeKind {
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Square => "square",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Circle => "circle",
        }
    }

    fn mesh(self) -> Mesh {
        match self {
            ShapeKind::Square => Mesh::square(mesh::square_side(SHAPE_AREA), Color::RED),
            ShapeKind::Triangle => {
                Mesh::equilateral_triangle(mesh::triangle_side(SHAPE_AREA), Color::GREEN)
            }
            ShapeKind::Circle => {
                Mesh::circle(mesh::circle_radius(SHAPE_AREA), CIRCLE_SEGMENTS, Color::BLUE)
            }
        }
    }
}

pub struct TransformDemo {
    shape: ShapeKind,
    meshes: [Mesh; 3],
    params: TransformParameters,
    pipeline: PipelineKind,
}

impl Default for TransformDemo {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformDemo {
    pub fn new() -> Self {
        log::info!(
            "Shape area {SHAPE_AREA}: square side {:.4}, triangle side {:.4}, circle radius {:.4}",
            mesh::square_side(SHAPE_AREA),
            mesh::triangle_side(SHAPE_AREA),
            mesh::circle_radius(SHAPE_AREA)
        );
        log::info!(
            "Keys: 1/2/3 shape, W/A/S/D move, Q/E scale, R/F rotate, X/Y reflect, M pipeline, Space reset"
        );
        Self {
            shape: ShapeKind::default(),
            meshes: [
                ShapeKind::Square.mesh(),
                ShapeKind::Triangle.mesh(),
                ShapeKind::Circle.mesh(),
            ],
            params: TransformParameters::new(),
            pipeline: PipelineKind::default(),
        }
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn params(&self) -> &TransformParameters {
        &self.params
    }

    pub fn pipeline(&self) -> PipelineKind {
        self.pipeline
    }

    fn current_mesh(&self) -> &Mesh {
        &self.meshes[self.shape as usize]
    }
}

impl Demo for TransformDemo {
    fn title(&self) -> String {
        format!(
            "Transforms | {} | {} | {}",
            self.shape.name(),
            self.pipeline.label(),
            self.params
        )
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

    fn handle_key(&mut self, key: Key) -> LoopFeedback {
        let Key::Char(c) = key else {
            if key == Key::Space {
                self.params.reset();
            }
            return LoopFeedback::Continue;
        };
        match c {
            '1' => self.shape = ShapeKind::Square,
            '2' => self.shape = ShapeKind::Triangle,
            '3' => self.shape = ShapeKind::Circle,
            'w' => {
                self.params.translate_by(0.0, TRANSLATE_STEP);
            }
            's' => {
                self.params.translate_by(0.0, -TRANSLATE_STEP);
            }
            'a' => {
                self.params.translate_by(-TRANSLATE_STEP, 0.0);
            }
            'd' => {
                self.params.translate_by(TRANSLATE_STEP, 0.0);
            }
            'q' => {
                self.params.scale_by(SCALE_STEP);
            }
            'e' => {
                self.params.scale_by(-SCALE_STEP);
            }
            'r' => {
                self.params.rotate_by(ROTATION_STEP);
            }
            'f' => {
                self.params.rotate_by(-ROTATION_STEP);
            }
            'x' => {
                self.params.toggle_reflect_x();
            }
            'y' => {
                self.params.toggle_reflect_y();
            }
            'm' => {
                self.pipeline = self.pipeline.toggled();
                log::info!("Using the {} pipeline", self.pipeline.label());
            }
            _ => return LoopFeedback::Continue,
        }
        log::debug!("{} | {}", self.shape.name(), self.params);
        LoopFeedback::Continue
    }

    fn render(&mut self, engine: &mut Engine) {
        engine.begin_frame(Color::BLACK);
        let options = DrawOptions::default();
        match self.pipeline {
            PipelineKind::Manual => {
                let params = self.params;
                let moved = self.current_mesh().map_positions(|p| {
                    let q = transform::apply_all(p.xy(), &params);
                    Vec3::new(q.x, q.y, p.z)
                });
                engine.draw_mesh(&moved, &Mat4::identity(), &options);
            }
            PipelineKind::Matrix => {
                let model = self.params.to_matrix();
                engine.draw_mesh(self.current_mesh(), &model, &options);
            }
        }
    }
}
