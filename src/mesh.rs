//! Indexed triangle meshes and the primitive shapes drawn by the demos.
//!
//! Every constructor builds geometry centred on the origin; placement is the
//! job of the model matrix (or of the manual transform pipeline).

use std::f32::consts::PI;

use crate::colors::Color;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;

/// Area shared by the three interchangeable 2D shapes.
pub const SHAPE_AREA: f32 = 1.0;

/// Side of a square with the given area.
pub fn square_side(area: f32) -> f32 {
    area.sqrt()
}

/// Side of an equilateral triangle with the given area.
pub fn triangle_side(area: f32) -> f32 {
    (4.0 * area / 3f32.sqrt()).sqrt()
}

/// Radius of a circle with the given area.
pub fn circle_radius(area: f32) -> f32 {
    (area / PI).sqrt()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
    pub color: Color,
}

impl Vertex {
    pub const fn new(position: Vec3, normal: Vec3, uv: Vec2, color: Color) -> Self {
        Self {
            position,
            normal,
            uv,
            color,
        }
    }

    /// A vertex in the z = 0 plane facing the viewer.
    fn planar(x: f32, y: f32, uv: Vec2, color: Color) -> Self {
        Self::new(Vec3::new(x, y, 0.0), Vec3::FORWARD, uv, color)
    }
}

/// A triangle mesh: vertices, counter-clockwise index triples, and optional
/// outline segments for wireframe overlays.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    faces: Vec<[u32; 3]>,
    edges: Vec<[Vec3; 2]>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, faces: Vec<[u32; 3]>) -> Self {
        Self {
            vertices,
            faces,
            edges: Vec::new(),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    pub fn edges(&self) -> &[[Vec3; 2]] {
        &self.edges
    }

    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// Copy of this mesh with positions passed through `f`.
    ///
    /// Normals and outline segments are left untouched; this is meant for
    /// planar shapes transformed on the CPU.
    pub fn map_positions(&self, f: impl Fn(Vec3) -> Vec3) -> Self {
        let mut mesh = self.clone();
        mesh.vertices.iter_mut().for_each(|v| v.position = f(v.position));
        mesh
    }

    /// The single RGB triangle instanced by the benchmark.
    pub fn benchmark_triangle() -> Self {
        Self::new(
            vec![
                Vertex::planar(-0.5, -0.5, Vec2::new(0.0, 0.0), Color::RED),
                Vertex::planar(0.5, -0.5, Vec2::new(1.0, 0.0), Color::GREEN),
                Vertex::planar(0.0, 0.5, Vec2::new(0.5, 1.0), Color::BLUE),
            ],
            vec![[0, 1, 2]],
        )
    }

    /// Axis-aligned square centred on the origin.
    pub fn square(side: f32, color: Color) -> Self {
        let h = side / 2.0;
        Self::quad(
            [
                Vec3::new(-h, -h, 0.0),
                Vec3::new(h, -h, 0.0),
                Vec3::new(h, h, 0.0),
                Vec3::new(-h, h, 0.0),
            ],
            [color; 4],
        )
    }

    /// Planar quad from four counter-clockwise corners, each with its own color.
    pub fn quad(corners: [Vec3; 4], colors: [Color; 4]) -> Self {
        let uvs = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        let vertices = (0..4)
            .map(|i| Vertex::new(corners[i], Vec3::FORWARD, uvs[i], colors[i]))
            .collect();
        Self::new(vertices, vec![[0, 1, 2], [0, 2, 3]])
    }

    /// Equilateral triangle pointing up with its centroid at the origin.
    pub fn equilateral_triangle(side: f32, color: Color) -> Self {
        let height = side * 3f32.sqrt() / 2.0;
        let centroid_y = height / 3.0;
        let half_base = side / 2.0;
        Self::new(
            vec![
                Vertex::planar(-half_base, -centroid_y, Vec2::new(0.0, 0.0), color),
                Vertex::planar(half_base, -centroid_y, Vec2::new(1.0, 0.0), color),
                Vertex::planar(0.0, height - centroid_y, Vec2::new(0.5, 1.0), color),
            ],
            vec![[0, 1, 2]],
        )
    }

    /// Disc approximated by a fan of `segments` triangles.
    pub fn circle(radius: f32, segments: u32, color: Color) -> Self {
        let segments = segments.max(3);
        let mut vertices = vec![Vertex::planar(0.0, 0.0, Vec2::new(0.5, 0.5), color)];
        vertices.extend((0..segments).map(|i| {
            let (s, c) = (2.0 * PI * i as f32 / segments as f32).sin_cos();
            Vertex::planar(radius * c, radius * s, Vec2::new(0.5 + 0.5 * c, 0.5 + 0.5 * s), color)
        }));
        let faces = (0..segments)
            .map(|i| [0, i + 1, (i + 1) % segments + 1])
            .collect();
        Self::new(vertices, faces)
    }

    /// Cube of edge `size` with flat per-face normals and its 12 edges as outline.
    pub fn cube(size: f32, color: Color) -> Self {
        let h = size / 2.0;
        let corner = |x: f32, y: f32, z: f32| Vec3::new(x * h, y * h, z * h);
        // (normal, four corners counter-clockwise seen from outside)
        let sides = [
            (Vec3::new(0.0, 0.0, 1.0), [(-1., -1., 1.), (1., -1., 1.), (1., 1., 1.), (-1., 1., 1.)]),
            (Vec3::new(0.0, 0.0, -1.0), [(1., -1., -1.), (-1., -1., -1.), (-1., 1., -1.), (1., 1., -1.)]),
            (Vec3::new(1.0, 0.0, 0.0), [(1., -1., 1.), (1., -1., -1.), (1., 1., -1.), (1., 1., 1.)]),
            (Vec3::new(-1.0, 0.0, 0.0), [(-1., -1., -1.), (-1., -1., 1.), (-1., 1., 1.), (-1., 1., -1.)]),
            (Vec3::new(0.0, 1.0, 0.0), [(-1., 1., 1.), (1., 1., 1.), (1., 1., -1.), (-1., 1., -1.)]),
            (Vec3::new(0.0, -1.0, 0.0), [(-1., -1., -1.), (1., -1., -1.), (1., -1., 1.), (-1., -1., 1.)]),
        ];
        let uvs = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut faces = Vec::with_capacity(12);
        for (normal, corners) in sides {
            let base = vertices.len() as u32;
            for (i, (x, y, z)) in corners.into_iter().enumerate() {
                vertices.push(Vertex::new(corner(x, y, z), normal, uvs[i], color));
            }
            faces.push([base, base + 1, base + 2]);
            faces.push([base, base + 2, base + 3]);
        }

        let mut edges = Vec::with_capacity(12);
        for a in [-1.0f32, 1.0] {
            for b in [-1.0f32, 1.0] {
                edges.push([corner(-1.0, a, b), corner(1.0, a, b)]);
                edges.push([corner(a, -1.0, b), corner(a, 1.0, b)]);
                edges.push([corner(a, b, -1.0), corner(a, b, 1.0)]);
            }
        }

        Self {
            vertices,
            faces,
            edges,
        }
    }

    /// UV sphere with `slices` around the Y axis and `stacks` from pole to pole.
    pub fn sphere(radius: f32, slices: u32, stacks: u32, color: Color) -> Self {
        let slices = slices.max(3);
        let stacks = stacks.max(2);
        let mut vertices = Vec::with_capacity(((slices + 1) * (stacks + 1)) as usize);

        for stack in 0..=stacks {
            let phi = PI * stack as f32 / stacks as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();
            for slice in 0..=slices {
                let theta = 2.0 * PI * slice as f32 / slices as f32;
                let (sin_theta, cos_theta) = theta.sin_cos();
                let normal = Vec3::new(sin_phi * cos_theta, cos_phi, -sin_phi * sin_theta);
                let uv = Vec2::new(slice as f32 / slices as f32, 1.0 - stack as f32 / stacks as f32);
                vertices.push(Vertex::new(normal * radius, normal, uv, color));
            }
        }

        let ring = slices + 1;
        let mut faces = Vec::with_capacity((slices * stacks * 2) as usize);
        for stack in 0..stacks {
            for slice in 0..slices {
                let top = stack * ring + slice;
                let bottom = top + ring;
                if stack != 0 {
                    faces.push([top, bottom, top + 1]);
                }
                if stack != stacks - 1 {
                    faces.push([top + 1, bottom, bottom + 1]);
                }
            }
        }

        Self::new(vertices, faces)
    }

    /// Cone standing on the z = 0 plane with its apex at `z = height`.
    pub fn cone(radius: f32, height: f32, slices: u32, color: Color) -> Self {
        let slices = slices.max(3);
        let slant = (radius * radius + height * height).sqrt();
        let apex = Vec3::new(0.0, 0.0, height);
        let mut vertices = Vec::new();
        let mut faces = Vec::new();

        for i in 0..slices {
            let a0 = 2.0 * PI * i as f32 / slices as f32;
            let a1 = 2.0 * PI * (i + 1) as f32 / slices as f32;
            let mid = (a0 + a1) / 2.0;
            let normal = Vec3::new(height * mid.cos() / slant, height * mid.sin() / slant, radius / slant);
            let base = vertices.len() as u32;
            vertices.push(Vertex::new(Vec3::new(radius * a0.cos(), radius * a0.sin(), 0.0), normal, Vec2::new(0.0, 0.0), color));
            vertices.push(Vertex::new(Vec3::new(radius * a1.cos(), radius * a1.sin(), 0.0), normal, Vec2::new(1.0, 0.0), color));
            vertices.push(Vertex::new(apex, normal, Vec2::new(0.5, 1.0), color));
            faces.push([base, base + 1, base + 2]);
        }

        let center = vertices.len() as u32;
        vertices.push(Vertex::new(Vec3::ZERO, -Vec3::FORWARD, Vec2::new(0.5, 0.5), color));
        for i in 0..slices {
            let a = 2.0 * PI * i as f32 / slices as f32;
            vertices.push(Vertex::new(
                Vec3::new(radius * a.cos(), radius * a.sin(), 0.0),
                -Vec3::FORWARD,
                Vec2::new(0.5 + 0.5 * a.cos(), 0.5 + 0.5 * a.sin()),
                color,
            ));
        }
        for i in 0..slices {
            faces.push([center, center + 1 + (i + 1) % slices, center + 1 + i]);
        }

        Self::new(vertices, faces)
    }

    /// Torus around the Z axis. `inner` is the tube radius, `outer` the
    /// distance from the centre to the middle of the tube.
    pub fn torus(inner: f32, outer: f32, sides: u32, rings: u32, color: Color) -> Self {
        let sides = sides.max(3);
        let rings = rings.max(3);
        let mut vertices = Vec::with_capacity(((sides + 1) * (rings + 1)) as usize);

        for ring in 0..=rings {
            let theta = 2.0 * PI * ring as f32 / rings as f32;
            let (sin_t, cos_t) = theta.sin_cos();
            for side in 0..=sides {
                let phi = 2.0 * PI * side as f32 / sides as f32;
                let (sin_p, cos_p) = phi.sin_cos();
                let normal = Vec3::new(cos_t * cos_p, sin_t * cos_p, sin_p);
                let position = Vec3::new(cos_t * outer, sin_t * outer, 0.0) + normal * inner;
                let uv = Vec2::new(ring as f32 / rings as f32, side as f32 / sides as f32);
                vertices.push(Vertex::new(position, normal, uv, color));
            }
        }

        let stride = sides + 1;
        let mut faces = Vec::with_capacity((sides * rings * 2) as usize);
        for ring in 0..rings {
            for side in 0..sides {
                let a = ring * stride + side;
                let b = a + stride;
                faces.push([a, b, b + 1]);
                faces.push([a, b + 1, a + 1]);
            }
        }

        Self::new(vertices, faces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn area_2d(mesh: &Mesh) -> f32 {
        mesh.faces()
            .iter()
            .map(|&[a, b, c]| {
                let p = |i: u32| mesh.vertices()[i as usize].position;
                let (a, b, c) = (p(a), p(b), p(c));
                (b - a).cross(c - a).z / 2.0
            })
            .sum()
    }

    #[test]
    fn test_equal_area_shapes() {
        let square = Mesh::square(square_side(SHAPE_AREA), Color::RED);
        let triangle = Mesh::equilateral_triangle(triangle_side(SHAPE_AREA), Color::GREEN);
        let circle = Mesh::circle(circle_radius(SHAPE_AREA), 100, Color::BLUE);

        assert_relative_eq!(area_2d(&square), 1.0, epsilon = 1e-5);
        assert_relative_eq!(area_2d(&triangle), 1.0, epsilon = 1e-5);
        // A 100-gon slightly underestimates the disc.
        assert_relative_eq!(area_2d(&circle), 1.0, epsilon = 2e-3);
    }

    #[test]
    fn test_triangle_centroid_at_origin() {
        let triangle = Mesh::equilateral_triangle(1.5, Color::GREEN);
        let sum = triangle
            .vertices()
            .iter()
            .fold(Vec3::ZERO, |acc, v| acc + v.position);
        assert_relative_eq!(sum.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(sum.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_cube_topology() {
        let cube = Mesh::cube(1.0, Color::WHITE);
        assert_eq!(cube.vertices().len(), 24);
        assert_eq!(cube.triangle_count(), 12);
        assert_eq!(cube.edges().len(), 12);
        for [a, b] in cube.edges() {
            assert_relative_eq!((*b - *a).magnitude(), 1.0);
        }
    }

    #[test]
    fn test_cube_faces_wind_outwards() {
        let cube = Mesh::cube(2.0, Color::WHITE);
        for &[a, b, c] in cube.faces() {
            let v = |i: u32| cube.vertices()[i as usize];
            let geometric = (v(b).position - v(a).position).cross(v(c).position - v(a).position);
            assert!(geometric.dot(v(a).normal) > 0.0);
        }
    }

    #[test]
    fn test_sphere_vertices_on_surface() {
        let sphere = Mesh::sphere(0.8, 20, 20, Color::RED);
        for v in sphere.vertices() {
            assert_relative_eq!(v.position.magnitude(), 0.8, epsilon = 1e-5);
        }
        assert_eq!(sphere.triangle_count(), 20 * 20 * 2 - 2 * 20);
    }

    #[test]
    fn test_sphere_faces_wind_outwards() {
        let sphere = Mesh::sphere(1.0, 12, 8, Color::RED);
        for &[a, b, c] in sphere.faces() {
            let p = |i: u32| sphere.vertices()[i as usize].position;
            let geometric = (p(b) - p(a)).cross(p(c) - p(a));
            let centre = (p(a) + p(b) + p(c)) / 3.0;
            assert!(geometric.dot(centre) > 0.0);
        }
    }

    #[test]
    fn test_map_positions_keeps_colors() {
        let square = Mesh::square(1.0, Color::RED);
        let moved = square.map_positions(|p| p + Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(moved.vertices()[0].position, Vec3::new(0.5, -0.5, 0.0));
        assert_eq!(moved.vertices()[0].color, Color::RED);
    }
}
