//! Core rendering engine.
//!
//! The [`Engine`] struct is the main entry point for the renderer. It owns the
//! color and depth buffers and runs meshes through the pipeline:
//!
//! 1. Model space -> world space (model matrix), lighting evaluated per vertex
//! 2. World space -> clip space (view and projection matrices)
//! 3. Perspective divide and viewport mapping
//! 4. Rasterization with depth test and blending per [`RenderState`]

use crate::colors::Color;
use crate::light::{Light, Material};
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::mesh::Mesh;
use crate::projection::Projection;
use crate::render::{EdgeFunctionRasterizer, Rasterizer, RenderState, Renderer, Triangle};
use crate::texture::Texture;

const DEFAULT_FOV_DEGREES: f32 = 45.0;
const DEFAULT_Z_NEAR: f32 = 0.1;
const DEFAULT_Z_FAR: f32 = 100.0;

/// Per-draw parameters for [`Engine::draw_mesh`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawOptions<'a> {
    /// Replaces every vertex color when set.
    pub color: Option<Color>,
    pub material: Material,
    /// Lights the mesh when set; vertex colors are used as-is otherwise.
    pub light: Option<&'a Light>,
    /// Modulates the (lit) vertex colors when set.
    pub texture: Option<&'a Texture>,
}

impl<'a> DrawOptions<'a> {
    pub fn colored(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }

    pub fn with_light(mut self, light: &'a Light, material: Material) -> Self {
        self.light = Some(light);
        self.material = material;
        self
    }
}

/// A vertex after projection: screen position (x, y), depth in z.
#[derive(Debug, Clone, Copy)]
struct ScreenVertex {
    point: Vec3,
    color: Color,
}

pub struct Engine {
    renderer: Renderer,
    rasterizer: EdgeFunctionRasterizer,
    projection: Projection,
    view: Mat4,
    eye: Vec3,
    state: RenderState,
}

impl Engine {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            renderer: Renderer::new(width, height),
            rasterizer: EdgeFunctionRasterizer::new(),
            projection: Projection::perspective_degrees(
                DEFAULT_FOV_DEGREES,
                width as f32 / height.max(1) as f32,
                DEFAULT_Z_NEAR,
                DEFAULT_Z_FAR,
            ),
            view: Mat4::identity(),
            eye: Vec3::ZERO,
            state: RenderState::default(),
        }
    }

    /// Resize the buffers; perspective projections follow the new aspect ratio.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.renderer.resize(width, height);
        self.projection = self.projection.with_viewport(width, height);
    }

    pub fn width(&self) -> u32 {
        self.renderer.width()
    }

    pub fn height(&self) -> u32 {
        self.renderer.height()
    }

    /// Clear color and depth for a new frame.
    pub fn begin_frame(&mut self, clear: Color) {
        self.renderer.clear(clear.with_alpha(1.0).to_argb());
        self.renderer.clear_depth();
    }

    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Set the world -> eye transform. The camera position used for specular
    /// highlights is recovered from its inverse.
    pub fn set_view(&mut self, view: Mat4) {
        self.view = view;
        self.eye = view.inverse().map_or(Vec3::ZERO, |inverse| inverse * Vec3::ZERO);
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn set_render_state(&mut self, state: RenderState) {
        self.state = state;
    }

    pub fn render_state(&self) -> RenderState {
        self.state
    }

    fn to_screen(&self, view_projection: &Mat4, world: Vec3) -> Option<Vec3> {
        let clip = *view_projection * Vec4::point(world);

        // w <= 0 means the vertex is behind or on the eye plane.
        if clip.w <= 0.0 {
            return None;
        }

        let ndc = clip.to_ndc();
        Some(Vec3::new(
            (ndc.x + 1.0) * 0.5 * self.width() as f32,
            (1.0 - ndc.y) * 0.5 * self.height() as f32,
            1.0 - ndc.z,
        ))
    }

    /// Draw every face of `mesh` placed by `model`.
    ///
    /// Returns the number of triangles handed to the rasterizer; faces with a
    /// vertex behind the camera are skipped.
    pub fn draw_mesh(&mut self, mesh: &Mesh, model: &Mat4, options: &DrawOptions) -> usize {
        let view_projection = self.projection.matrix() * self.view;
        let normal_matrix = model.normal_matrix();

        let screen: Vec<Option<ScreenVertex>> = mesh
            .vertices()
            .iter()
            .map(|vertex| {
                let world = *model * vertex.position;
                let base = options.color.unwrap_or(vertex.color);
                let color = match options.light {
                    Some(light) => {
                        let normal = normal_matrix.transform_direction(vertex.normal);
                        light.shade(world, normal, self.eye, base, &options.material)
                    }
                    None => base,
                };
                self.to_screen(&view_projection, world)
                    .map(|point| ScreenVertex { point, color })
            })
            .collect();

        let mut drawn = 0;
        let mut fb = self.renderer.as_framebuffer();
        for face in mesh.faces() {
            let [a, b, c] = face.map(|index| screen.get(index as usize).copied().flatten());
            let (Some(a), Some(b), Some(c)) = (a, b, c) else {
                continue;
            };

            let uvs = face.map(|index| mesh.vertices()[index as usize].uv);
            let triangle = Triangle::new([a.point, b.point, c.point], [a.color, b.color, c.color], uvs);
            self.rasterizer
                .fill_triangle(&triangle, &mut fb, options.texture, self.state);
            drawn += 1;
        }
        log::trace!("draw_mesh: {drawn}/{} triangles", mesh.triangle_count());
        drawn
    }

    /// Draw the outline segments of `mesh` as lines.
    pub fn draw_edges(&mut self, mesh: &Mesh, model: &Mat4, color: Color) {
        let view_projection = self.projection.matrix() * self.view;
        for [start, end] in mesh.edges() {
            let start = self.to_screen(&view_projection, *model * *start);
            let end = self.to_screen(&view_projection, *model * *end);
            if let (Some(start), Some(end)) = (start, end) {
                self.renderer.draw_line(
                    (start.x.round() as i32, start.y.round() as i32, start.z),
                    (end.x.round() as i32, end.y.round() as i32, end.z),
                    color,
                    self.state,
                );
            }
        }
    }

    /// Returns the rendered frame as bytes (ARGB8888 format)
    pub fn frame_buffer(&self) -> &[u8] {
        self.renderer.as_bytes()
    }

    /// Packed ARGB color at (x, y), or None if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        self.renderer.pixel(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;

    const SIZE: u32 = 64;

    fn ortho_engine() -> Engine {
        let mut engine = Engine::new(SIZE, SIZE);
        engine.set_projection(Projection::ortho_2d(-1.0, 1.0, -1.0, 1.0));
        engine.begin_frame(Color::BLACK);
        engine
    }

    #[test]
    fn test_square_fills_centre_only() {
        let mut engine = ortho_engine();
        let drawn = engine.draw_mesh(
            &Mesh::square(1.0, Color::RED),
            &Mat4::identity(),
            &DrawOptions::default(),
        );
        assert_eq!(drawn, 2);
        assert_eq!(engine.pixel(SIZE / 2, SIZE / 2), Some(0xFFFF0000));
        assert_eq!(engine.pixel(2, 2), Some(colors::BACKGROUND));
    }

    #[test]
    fn test_model_matrix_moves_the_shape() {
        let mut engine = ortho_engine();
        engine.draw_mesh(
            &Mesh::square(0.5, Color::GREEN),
            &Mat4::translation(0.5, 0.5, 0.0),
            &DrawOptions::default(),
        );
        // Upper right quadrant on screen (y grows downwards).
        assert_eq!(engine.pixel(SIZE * 3 / 4, SIZE / 4), Some(0xFF00FF00));
        assert_eq!(engine.pixel(SIZE / 4, SIZE * 3 / 4), Some(colors::BACKGROUND));
    }

    #[test]
    fn test_depth_test_keeps_nearest_under_perspective() {
        let mut engine = Engine::new(SIZE, SIZE);
        engine.set_view(Mat4::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::UP));
        engine.begin_frame(Color::BLACK);

        let near = Mesh::square(1.0, Color::RED);
        let far = Mesh::square(2.0, Color::BLUE);
        engine.draw_mesh(&near, &Mat4::translation(0.0, 0.0, 1.0), &DrawOptions::default());
        engine.draw_mesh(&far, &Mat4::identity(), &DrawOptions::default());

        assert_eq!(engine.pixel(SIZE / 2, SIZE / 2), Some(0xFFFF0000));
    }

    #[test]
    fn test_behind_camera_is_skipped() {
        let mut engine = Engine::new(SIZE, SIZE);
        engine.set_view(Mat4::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::UP));
        engine.begin_frame(Color::BLACK);
        let drawn = engine.draw_mesh(
            &Mesh::square(1.0, Color::RED),
            &Mat4::translation(0.0, 0.0, 10.0),
            &DrawOptions::default(),
        );
        assert_eq!(drawn, 0);
    }

    #[test]
    fn test_eye_is_recovered_from_view() {
        let mut engine = Engine::new(SIZE, SIZE);
        let eye = Vec3::new(1.0, 2.0, 5.0);
        engine.set_view(Mat4::look_at(eye, Vec3::ZERO, Vec3::UP));
        let recovered = engine.eye();
        assert!((recovered - eye).magnitude() < 1e-4);
    }

    #[test]
    fn test_blended_overlay() {
        let mut engine = ortho_engine();
        engine.set_render_state(RenderState::OVERLAY);
        engine.draw_mesh(
            &Mesh::square(1.0, Color::BLUE),
            &Mat4::identity(),
            &DrawOptions::default(),
        );
        engine.draw_mesh(
            &Mesh::square(1.0, Color::YELLOW),
            &Mat4::identity(),
            &DrawOptions::colored(Color::YELLOW.with_alpha(0.5)),
        );
        assert_eq!(engine.pixel(SIZE / 2, SIZE / 2), Some(0xFF808080));
    }

    #[test]
    fn test_light_behind_surface_leaves_only_ambient() {
        let mut engine = ortho_engine();
        let light = Light::omni(Vec3::new(0.0, 0.0, -5.0)).with_ambient(Color::rgb(0.5, 0.5, 0.5));
        engine.draw_mesh(
            &Mesh::square(1.0, Color::WHITE),
            &Mat4::identity(),
            &DrawOptions::default().with_light(&light, Material::default()),
        );
        assert_eq!(engine.pixel(SIZE / 2, SIZE / 2), Some(0xFF808080));
    }

    #[test]
    fn test_edges_are_drawn() {
        let mut engine = Engine::new(SIZE, SIZE);
        engine.set_view(Mat4::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::UP));
        engine.begin_frame(Color::BLACK);
        engine.draw_edges(&Mesh::cube(1.0, Color::BLACK), &Mat4::identity(), Color::WHITE);
        assert!(engine
            .frame_buffer()
            .chunks_exact(4)
            .any(|px| px == [0xFF, 0xFF, 0xFF, 0xFF]));
    }
}
