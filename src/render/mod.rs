//! Software rendering backend: color/depth buffers and triangle rasterization.

mod framebuffer;
mod rasterizer;
mod renderer;

pub use framebuffer::FrameBuffer;
pub use rasterizer::{EdgeFunctionRasterizer, Rasterizer, Triangle};
pub use renderer::Renderer;

/// Per-draw pixel pipeline state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderState {
    /// Reject fragments behind what is already in the depth buffer.
    pub depth_test: bool,
    /// Blend fragments over the color buffer using their alpha.
    pub blending: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            depth_test: true,
            blending: false,
        }
    }
}

impl RenderState {
    /// Painter's-order drawing for flat 2D scenes: no depth test, alpha blending on.
    pub const OVERLAY: RenderState = RenderState {
        depth_test: false,
        blending: true,
    };
}
