//! Rendering benchmark: a spinning ring of RGB triangles measured under every
//! lighting / texture combination for a list of triangle counts.

use std::path::PathBuf;
use std::time::Duration;

use super::{Demo, LoopFeedback};
use crate::benchmark::{FeatureCombination, Sequencer, SequencerAction, SequencerConfig};
use crate::colors::Color;
use crate::engine::{DrawOptions, Engine};
use crate::error::Error;
use crate::light::{Light, LightKind, Material};
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::mesh::Mesh;
use crate::projection::Projection;
use crate::texture::Texture;

pub const BENCHMARK_WIDTH: u32 = 1280;
pub const BENCHMARK_HEIGHT: u32 = 720;

const BACKGROUND: Color = Color::rgb(0.1, 0.1, 0.15);
const RING_RADIUS: f32 = 0.6;
const TRIANGLE_SCALE: f32 = 0.3;
/// Spin per rendered frame, in degrees.
const SPIN_PER_FRAME: f32 = 0.5;

const LIGHT_POSITION: Vec3 = Vec3::new(2.0, 2.0, 2.0);
const SPOT_DIRECTION: Vec3 = Vec3::new(-0.5, -1.0, -0.5);
const SPOT_CUTOFF_DEGREES: f32 = 15.0;
const SPOT_EXPONENT: f32 = 20.0;
const GLOBAL_AMBIENT: Color = Color::rgb(0.3, 0.3, 0.3);

const TEXTURE_SIZE: u32 = 256;
const TEXTURE_CELL: u32 = 32;

/// The procedural texture used when no image is supplied.
pub fn checker_texture() -> Texture {
    Texture::checkerboard(
        TEXTURE_SIZE,
        TEXTURE_CELL,
        Color::from_u8(200, 200, 255),
        Color::from_u8(100, 150, 200),
    )
}

/// Model matrices placing `count` triangles evenly on the ring, each turned
/// by `rotation` degrees on top of its position angle.
pub fn ring_models(count: u32, rotation: f32) -> impl Iterator<Item = Mat4> {
    (0..count).map(move |i| {
        let angle = 360.0 / count as f32 * i as f32;
        let (sin, cos) = angle.to_radians().sin_cos();
        Mat4::translation(RING_RADIUS * cos, RING_RADIUS * sin, 0.0)
            * Mat4::rotation_z((rotation + angle).to_radians())
            * Mat4::scaling(TRIANGLE_SCALE, TRIANGLE_SCALE, TRIANGLE_SCALE)
    })
}

/// Fixed scene resources for one benchmark frame.
pub struct RingScene {
    triangle: Mesh,
    omni: Light,
    spot: Light,
    material: Material,
    texture: Texture,
}

impl RingScene {
    pub fn new(texture: Texture) -> Self {
        Self {
            triangle: Mesh::benchmark_triangle(),
            omni: Light::omni(LIGHT_POSITION).with_ambient(GLOBAL_AMBIENT),
            spot: Light::spot(LIGHT_POSITION, SPOT_DIRECTION, SPOT_CUTOFF_DEGREES, SPOT_EXPONENT)
                .with_ambient(GLOBAL_AMBIENT),
            material: Material {
                specular: Color::rgb(0.5, 0.5, 0.5),
                shininess: 32.0,
            },
            texture,
        }
    }

    /// Set the camera used by the benchmark.
    pub fn setup(engine: &mut Engine) {
        engine.set_projection(Projection::perspective_degrees(
            45.0,
            engine.width() as f32 / engine.height().max(1) as f32,
            0.1,
            100.0,
        ));
        engine.set_view(Mat4::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::UP));
    }

    fn draw_options(&self, combination: FeatureCombination) -> DrawOptions<'_> {
        let light = match (combination.lighting, combination.light_kind) {
            (true, LightKind::Omni) => Some(&self.omni),
            (true, LightKind::Spot) => Some(&self.spot),
            _ => None,
        };
        DrawOptions {
            light,
            material: self.material,
            texture: combination.texture.then_some(&self.texture),
            ..DrawOptions::default()
        }
    }

    /// Draw one frame of the ring and return the number of triangles drawn.
    pub fn render(
        &self,
        engine: &mut Engine,
        count: u32,
        combination: FeatureCombination,
        rotation: f32,
    ) -> usize {
        engine.begin_frame(BACKGROUND);
        let options = self.draw_options(combination);
        ring_models(count, rotation)
            .map(|model| engine.draw_mesh(&self.triangle, &model, &options))
            .sum()
    }
}

pub struct BenchmarkDemo {
    config: SequencerConfig,
    sequencer: Option<Sequencer>,
    scene: RingScene,
    output: PathBuf,
    rotation: f32,
}

impl BenchmarkDemo {
    pub fn new(config: SequencerConfig, output: PathBuf, texture: Option<Texture>) -> Self {
        log::info!(
            "Benchmark: {} triangle counts x {} combinations, {:?} per measurement",
            config.primitive_counts().len(),
            config.transitions().combination_count(),
            config.measurement_window()
        );
        Self {
            config,
            sequencer: None,
            scene: RingScene::new(texture.unwrap_or_else(checker_texture)),
            output,
            rotation: 0.0,
        }
    }

    pub fn sequencer(&self) -> Option<&Sequencer> {
        self.sequencer.as_ref()
    }
}

impl Demo for BenchmarkDemo {
    fn title(&self) -> String {
        let Some(sequencer) = &self.sequencer else {
            return "Benchmark".to_string();
        };
        match sequencer.state() {
            Some(state) => format!(
                "Benchmark | {} triangles | {} | {:.0} FPS | {}/{}",
                state.primitive_count,
                state.combination,
                sequencer.live_fps(),
                sequencer.log().len(),
                self.config.total_samples()
            ),
            None => "Benchmark | done".to_string(),
        }
    }

    fn setup(&mut self, engine: &mut Engine) {
        RingScene::setup(engine);
    }

    fn resize(&mut self, engine: &mut Engine, _width: u32, _height: u32) {
        RingScene::setup(engine);
    }

    fn update(&mut self, now: Duration, _dt: Duration) -> Result<LoopFeedback, Error> {
        self.rotation = (self.rotation + SPIN_PER_FRAME) % 360.0;

        // The clock starts with the first frame, not at construction.
        let sequencer = self
            .sequencer
            .get_or_insert_with(|| Sequencer::new(self.config.clone(), now));

        match sequencer.tick(now, 1) {
            SequencerAction::Continue => Ok(LoopFeedback::Continue),
            SequencerAction::RecordAndAdvance(sample) => {
                log::info!(
                    "Recorded {} triangles, {}: {:.2} FPS",
                    sample.primitive_count,
                    sample.combination(),
                    sample.frames_per_second
                );
                Ok(LoopFeedback::Continue)
            }
            SequencerAction::Finished(log) => {
                log.save(&self.output)?;
                log::info!("Results saved to {}", self.output.display());
                Ok(LoopFeedback::Exit)
            }
        }
    }

    fn render(&mut self, engine: &mut Engine) {
        let Some(state) = self.sequencer.as_ref().and_then(|s| s.state()) else {
            engine.begin_frame(BACKGROUND);
            return;
        };
        self.scene
            .render(engine, state.primitive_count, state.combination, self.rotation);
    }

    fn target_fps(&self) -> Option<u32> {
        None
    }
}
