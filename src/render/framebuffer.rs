//! Frame buffer abstraction for 2D pixel access.
//!
//! Provides a safe view into color and depth buffers with bounds-checked access.
//! The depth buffer enables hidden surface removal via the z-buffer algorithm.

use super::RenderState;
use crate::colors::Color;

/// A view into color and depth buffers.
///
/// Wraps 1D slices with width/height metadata to enable safe 2D pixel access.
/// This is a borrowed view, not an owning type - it's meant to be created
/// temporarily when you need to pass buffers + dimensions together.
///
/// # Depth Buffer
///
/// Depth values are `1 - z_ndc`, so they lie in [0, 2] inside the view volume
/// and larger values are closer to the camera. A cleared buffer holds 0.0,
/// the far plane.
pub struct FrameBuffer<'a> {
    color_buffer: &'a mut [u32],
    depth_buffer: &'a mut [f32],
    width: u32,
    height: u32,
}

impl<'a> FrameBuffer<'a> {
    /// Create a new FrameBuffer view from buffer slices and dimensions.
    pub fn new(
        color_buffer: &'a mut [u32],
        depth_buffer: &'a mut [f32],
        width: u32,
        height: u32,
    ) -> Self {
        debug_assert_eq!(
            color_buffer.len(),
            (width * height) as usize,
            "Color buffer size doesn't match dimensions"
        );
        debug_assert_eq!(
            depth_buffer.len(),
            (width * height) as usize,
            "Depth buffer size doesn't match dimensions"
        );
        Self {
            color_buffer,
            depth_buffer,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some((y as u32 * self.width + x as u32) as usize)
        } else {
            None
        }
    }

    /// Write a fragment at (x, y) through the depth test and blend stages.
    ///
    /// Out-of-bounds coordinates are ignored. Without blending the fragment is
    /// written opaque.
    #[inline]
    pub fn plot(&mut self, x: i32, y: i32, depth: f32, color: Color, state: RenderState) {
        let Some(idx) = self.index(x, y) else {
            return;
        };

        if state.depth_test {
            if depth <= self.depth_buffer[idx] {
                return;
            }
            self.depth_buffer[idx] = depth;
        }

        self.color_buffer[idx] = if state.blending {
            color.blend_over(self.color_buffer[idx])
        } else {
            color.with_alpha(1.0).to_argb()
        };
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|idx| self.color_buffer[idx])
    }
}
