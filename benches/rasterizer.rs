use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use shapelab::benchmark::DEFAULT_WALK;
use shapelab::bench::{
    checker_texture, EdgeFunctionRasterizer, FrameBuffer, Rasterizer, RenderState, RingScene,
    Triangle,
};
use shapelab::colors::Color;
use shapelab::math::vec2::Vec2;
use shapelab::math::vec3::Vec3;
use shapelab::Engine;

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

fn create_buffers() -> (Vec<u32>, Vec<f32>) {
    let len = (BUFFER_WIDTH * BUFFER_HEIGHT) as usize;
    (vec![0u32; len], vec![0.0f32; len])
}

fn medium_points() -> [Vec3; 3] {
    [
        Vec3::new(100.0, 100.0, 0.5),
        Vec3::new(300.0, 100.0, 0.5),
        Vec3::new(200.0, 300.0, 0.5),
    ]
}

fn benchmark_shaders(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");

    let rasterizer = EdgeFunctionRasterizer::new();
    let texture = checker_texture();
    let uvs = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.5, 1.0)];
    let flat = Triangle::flat(medium_points(), Color::RED);
    let gouraud = Triangle::new(medium_points(), [Color::RED, Color::GREEN, Color::BLUE], uvs);

    for (name, triangle, texture) in [
        ("flat", flat, None),
        ("gouraud", gouraud, None),
        ("textured", gouraud, Some(&texture)),
    ] {
        group.bench_with_input(BenchmarkId::new("edge_function", name), &triangle, |b, tri| {
            let (mut color, mut depth) = create_buffers();
            b.iter(|| {
                let mut fb = FrameBuffer::new(&mut color, &mut depth, BUFFER_WIDTH, BUFFER_HEIGHT);
                rasterizer.fill_triangle(black_box(tri), &mut fb, texture, RenderState::OVERLAY);
            });
        });
    }

    group.finish();
}

fn benchmark_ring_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_frame_1000");

    let scene = RingScene::new(checker_texture());
    let mut engine = Engine::new(BUFFER_WIDTH, BUFFER_HEIGHT);
    RingScene::setup(&mut engine);

    for combination in DEFAULT_WALK {
        group.bench_function(combination.to_string(), |b| {
            b.iter(|| scene.render(&mut engine, black_box(1000), combination, 30.0));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_shaders, benchmark_ring_frame);
criterion_main!(benches);
