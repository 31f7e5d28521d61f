//! Six small scenes demonstrating color handling, cycled with the arrow keys.

use std::time::Duration;

use super::{Demo, LoopFeedback};
use crate::colors::Color;
use crate::engine::{DrawOptions, Engine};
use crate::error::Error;
use crate::light::{Light, Material};
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::mesh::Mesh;
use crate::projection::Projection;
use crate::render::RenderState;
use crate::window::Key;

const BACKGROUND: Color = Color::rgb(0.1, 0.1, 0.1);
const EYE: Vec3 = Vec3::new(0.0, 0.0, 5.0);
const LIGHT_POSITION: Vec3 = Vec3::new(2.0, 2.0, 2.0);

/// One animation step every 16 ms.
const ANIMATION_TICK: Duration = Duration::from_millis(16);
const DEGREES_PER_TICK: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorDemo {
    #[default]
    BasicColors,
    Gradient,
    Transparency,
    ColorFormats,
    Lighting,
    Animation,
}

impl ColorDemo {
    pub const ALL: [ColorDemo; 6] = [
        ColorDemo::BasicColors,
        ColorDemo::Gradient,
        ColorDemo::Transparency,
        ColorDemo::ColorFormats,
        ColorDemo::Lighting,
        ColorDemo::Animation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColorDemo::BasicColors => "basic colors",
            ColorDemo::Gradient => "RGBA gradient",
            ColorDemo::Transparency => "transparency",
            ColorDemo::ColorFormats => "color formats",
            ColorDemo::Lighting => "lighting",
            ColorDemo::Animation => "color animation",
        }
    }

    fn offset(self, step: isize) -> Self {
        let len = Self::ALL.len() as isize;
        Self::ALL[(self as isize + step).rem_euclid(len) as usize]
    }

    pub fn next(self) -> Self {
        self.offset(1)
    }

    pub fn prev(self) -> Self {
        self.offset(-1)
    }
}

/// Meshes shared by the sub-demos, built once.
struct Scene {
    cube: Mesh,
    gradient: Mesh,
    sphere: Mesh,
    lit_sphere: Mesh,
    small_sphere: Mesh,
    torus: Mesh,
    cone: Mesh,
    light: Light,
}

impl Scene {
    fn new() -> Self {
        Self {
            cube: Mesh::cube(1.0, Color::WHITE),
            gradient: Mesh::quad(
                [
                    Vec3::new(-2.0, -1.0, 0.0),
                    Vec3::new(2.0, -1.0, 0.0),
                    Vec3::new(2.0, 1.0, 0.0),
                    Vec3::new(-2.0, 1.0, 0.0),
                ],
                [
                    Color::GREEN,
                    Color::BLUE.with_alpha(0.0),
                    Color::MAGENTA,
                    Color::RED,
                ],
            ),
            sphere: Mesh::sphere(0.8, 20, 20, Color::WHITE),
            lit_sphere: Mesh::sphere(1.2, 30, 30, Color::rgb(0.8, 0.2, 0.2)),
            small_sphere: Mesh::sphere(0.3, 15, 15, Color::WHITE),
            torus: Mesh::torus(0.3, 0.6, 10, 20, Color::WHITE),
            cone: Mesh::cone(0.8, 1.5, 15, Color::WHITE),
            light: Light::omni(LIGHT_POSITION),
        }
    }
}

pub struct ColorsDemo {
    current: ColorDemo,
    blending: bool,
    rotation: f32,
    pending: Duration,
    scene: Scene,
}

impl Default for ColorsDemo {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorsDemo {
    pub fn new() -> Self {
        log::info!("Keys: Left/Right switch demo, B toggles blending");
        Self {
            current: ColorDemo::default(),
            blending: true,
            rotation: 0.0,
            pending: Duration::ZERO,
            scene: Scene::new(),
        }
    }

    pub fn current(&self) -> ColorDemo {
        self.current
    }

    pub fn blending(&self) -> bool {
        self.blending
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    fn render_basic_colors(&self, engine: &mut Engine) {
        let placements = [
            (Color::RED, -2.0, 1.0),
            (Color::GREEN, 0.0, 1.0),
            (Color::BLUE, 2.0, 1.0),
            (Color::WHITE, -1.0, -1.0),
            (Color::BLACK, 1.0, -1.0),
        ];
        for (color, x, y) in placements {
            let model = Mat4::translation(x, y, 0.0);
            engine.draw_mesh(&self.scene.cube, &model, &DrawOptions::colored(color));
        }
        // The black cube would vanish against the background without an outline.
        engine.draw_edges(&self.scene.cube, &Mat4::translation(1.0, -1.0, 0.0), Color::WHITE);
    }

    fn render_gradient(&self, engine: &mut Engine) {
        engine.draw_mesh(&self.scene.gradient, &Mat4::identity(), &DrawOptions::default());
    }

    fn render_transparency(&self, engine: &mut Engine) {
        // Back to front so blending sees what lies behind.
        let spheres = [
            (Color::RED, Vec3::new(-1.5, 0.0, 0.0)),
            (Color::GREEN.with_alpha(0.6), Vec3::new(0.0, 0.0, 0.5)),
            (Color::BLUE.with_alpha(0.3), Vec3::new(1.5, 0.0, 1.0)),
        ];
        for (color, at) in spheres {
            let model = Mat4::translation(at.x, at.y, at.z);
            engine.draw_mesh(&self.scene.sphere, &model, &DrawOptions::colored(color));
        }
    }

    fn render_color_formats(&self, engine: &mut Engine) {
        let spin = Mat4::rotation_axis(self.rotation.to_radians(), Vec3::new(1.0, 1.0, 0.0));
        let shapes = [
            (&self.scene.sphere, Color::from_u8(255, 128, 0), -2.0),
            (&self.scene.torus, Color::from_i32(i32::MAX, 0, i32::MAX), 0.0),
            (&self.scene.cone, Color::from_f64(0.5, 0.8, 1.0), 2.0),
        ];
        for (mesh, color, x) in shapes {
            let model = Mat4::translation(x, 0.0, 0.0) * spin;
            let options = DrawOptions::colored(color).with_light(&self.scene.light, Material::default());
            engine.draw_mesh(mesh, &model, &options);
        }
    }

    fn render_lighting(&self, engine: &mut Engine) {
        let model = Mat4::rotation_axis(self.rotation.to_radians(), Vec3::new(1.0, 1.0, 0.0));
        let material = Material {
            specular: Color::WHITE,
            shininess: 50.0,
        };
        let options = DrawOptions::default().with_light(&self.scene.light, material);
        engine.draw_mesh(&self.scene.lit_sphere, &model, &options);
    }

    fn render_animation(&self, engine: &mut Engine) {
        let time = self.rotation * 0.01;
        for i in 0..8 {
            let phase = i as f32;
            let angle = (45.0 * phase + self.rotation).to_radians();
            let color = Color::rgb(
                ((time + 0.5 * phase).sin() + 1.0) / 2.0,
                ((time + 0.7 * phase).cos() + 1.0) / 2.0,
                ((time + 1.2 * phase).sin() + 1.0) / 2.0,
            );
            let model = Mat4::translation(2.0 * angle.cos(), 2.0 * angle.sin(), 0.0);
            engine.draw_mesh(&self.scene.small_sphere, &model, &DrawOptions::colored(color));
        }
    }
}

impl Demo for ColorsDemo {
    fn title(&self) -> String {
        let index = self.current as usize + 1;
        format!(
            "Colors | {index}/{} {} | blending {}",
            ColorDemo::ALL.len(),
            self.current.name(),
            if self.blending { "on" } else { "off" }
        )
    }

    fn setup(&mut self, engine: &mut Engine) {
        engine.set_projection(Projection::perspective_degrees(
            45.0,
            engine.width() as f32 / engine.height().max(1) as f32,
            0.1,
            100.0,
        ));
        engine.set_view(Mat4::look_at(EYE, Vec3::ZERO, Vec3::UP));
    }

    fn handle_key(&mut self, key: Key) -> LoopFeedback {
        match key {
            Key::Right => self.current = self.current.next(),
            Key::Left => self.current = self.current.prev(),
            Key::Char('b') => {
                self.blending = !self.blending;
                log::info!("Blending {}", if self.blending { "on" } else { "off" });
            }
            _ => return LoopFeedback::Continue,
        }
        log::debug!("Showing {}", self.current.name());
        LoopFeedback::Continue
    }

    fn update(&mut self, _now: Duration, dt: Duration) -> Result<LoopFeedback, Error> {
        self.pending += dt;
        while self.pending >= ANIMATION_TICK {
            self.pending -= ANIMATION_TICK;
            self.rotation += DEGREES_PER_TICK;
            if self.rotation > 360.0 {
                self.rotation -= 360.0;
            }
        }
        Ok(LoopFeedback::Continue)
    }

    fn render(&mut self, engine: &mut Engine) {
        engine.set_render_state(RenderState {
            depth_test: true,
            blending: self.blending,
        });
        engine.begin_frame(BACKGROUND);
        match self.current {
            ColorDemo::BasicColors => self.render_basic_colors(engine),
            ColorDemo::Gradient => self.render_gradient(engine),
            ColorDemo::Transparency => self.render_transparency(engine),
            ColorDemo::ColorFormats => self.render_color_formats(engine),
            ColorDemo::Lighting => self.render_lighting(engine),
            ColorDemo::Animation => self.render_animation(engine),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SIZE: u32 = 96;

    fn render(demo: &mut ColorsDemo) -> Engine {
        let mut engine = Engine::new(SIZE, SIZE);
        demo.setup(&mut engine);
        demo.render(&mut engine);
        engine
    }

    #[test]
    fn test_navigation_wraps() {
        assert_eq!(ColorDemo::BasicColors.prev(), ColorDemo::Animation);
        assert_eq!(ColorDemo::Animation.next(), ColorDemo::BasicColors);
        assert_eq!(ColorDemo::Gradient.next(), ColorDemo::Transparency);

        let mut demo = ColorsDemo::new();
        demo.handle_key(Key::Left);
        assert_eq!(demo.current(), ColorDemo::Animation);
        demo.handle_key(Key::Right);
        demo.handle_key(Key::Right);
        assert_eq!(demo.current(), ColorDemo::Gradient);
        assert!(demo.title().starts_with("Colors | 2/6"));
    }

    #[test]
    fn test_b_toggles_blending() {
        let mut demo = ColorsDemo::new();
        assert!(demo.blending());
        demo.handle_key(Key::Char('b'));
        assert!(!demo.blending());
        assert!(demo.title().ends_with("blending off"));
    }

    #[test]
    fn test_animation_advances_per_tick() {
        let mut demo = ColorsDemo::new();
        demo.update(Duration::ZERO, Duration::from_millis(40)).unwrap();
        assert_relative_eq!(demo.rotation(), 4.0);
        demo.update(Duration::ZERO, Duration::from_millis(8)).unwrap();
        assert_relative_eq!(demo.rotation(), 6.0);

        demo.update(Duration::ZERO, ANIMATION_TICK * 180).unwrap();
        assert!(demo.rotation() <= 360.0);
        assert_relative_eq!(demo.rotation(), 6.0);
    }

    #[test]
    fn test_every_demo_draws_something() {
        let mut demo = ColorsDemo::new();
        let background = BACKGROUND.to_argb();
        for _ in ColorDemo::ALL {
            let engine = render(&mut demo);
            let covered = (0..SIZE)
                .flat_map(|y| (0..SIZE).map(move |x| (x, y)))
                .filter(|&(x, y)| engine.pixel(x, y) != Some(background))
                .count();
            assert!(covered > 0, "{} drew nothing", demo.current().name());
            demo.handle_key(Key::Right);
        }
        assert_eq!(demo.current(), ColorDemo::BasicColors);
    }

    #[test]
    fn test_blending_toggle_changes_transparent_spheres() {
        let mut demo = ColorsDemo::new();
        demo.handle_key(Key::Right);
        demo.handle_key(Key::Right);
        assert_eq!(demo.current(), ColorDemo::Transparency);

        let blended = render(&mut demo);
        demo.handle_key(Key::Char('b'));
        let opaque = render(&mut demo);
        assert_ne!(blended.frame_buffer(), opaque.frame_buffer());
    }
}
