//! A CPU-rendered graphics lab: 2D transform demos, color demos and a
//! rendering benchmark that records FPS per feature combination.
//!
//! SDL2 is only used for the window and input; every pixel is produced by the
//! software pipeline in [`engine`] and [`render`].
//!
//! # Quick Start
//!
//! ```ignore
//! use shapelab::prelude::*;
//!
//! let mut demo = TransformDemo::new();
//! shapelab::demos::run(&mut demo, WINDOW_WIDTH, WINDOW_HEIGHT)?;
//! ```

pub mod benchmark;
pub mod colors;
pub mod demos;
pub mod engine;
pub mod error;
pub mod fps;
pub mod light;
pub mod math;
pub mod mesh;
pub mod projection;
pub mod texture;
pub mod transform;
pub mod window;

pub(crate) mod render;

pub use engine::{DrawOptions, Engine};
pub use error::{ConfigError, Error, LogError};
pub use mesh::Mesh;
pub use projection::Projection;

/// Prelude module for convenient imports.
pub mod prelude {
    // Benchmark
    pub use crate::benchmark::{
        BenchmarkLog, BenchmarkReport, BenchmarkSample, FeatureCombination, Sequencer,
        SequencerAction, SequencerConfig, TransitionTable,
    };

    // Demos
    pub use crate::demos::{
        BenchmarkDemo, BlendDemo, ColorsDemo, Demo, LoopFeedback, ShapesDemo, TransformDemo,
    };

    // Engine
    pub use crate::colors::Color;
    pub use crate::engine::{DrawOptions, Engine};
    pub use crate::light::{Light, LightKind, Material};
    pub use crate::mesh::Mesh;
    pub use crate::projection::Projection;
    pub use crate::texture::Texture;

    // Transform
    pub use crate::transform::{PipelineKind, TransformParameters};

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;

    // Window & Input
    pub use crate::window::{Key, Window, WindowEvent, WINDOW_HEIGHT, WINDOW_WIDTH};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::demos::benchmark::{checker_texture, RingScene};
    pub use crate::render::{EdgeFunctionRasterizer, FrameBuffer, Rasterizer, RenderState, Triangle};
}
