//! Low-level rendering primitives.
//!
//! Provides the [`Renderer`] struct which owns the color and depth buffers and
//! implements the line drawing used for outlines.

use super::framebuffer::FrameBuffer;
use super::RenderState;
use crate::colors::{self, Color};

pub struct Renderer {
    color_buffer: Vec<u32>,
    depth_buffer: Vec<f32>,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        Self {
            color_buffer: vec![colors::BACKGROUND; size],
            depth_buffer: vec![0.0; size],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let size = (width * height) as usize;
        self.color_buffer = vec![colors::BACKGROUND; size];
        self.depth_buffer = vec![0.0; size];
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }

    /// Reset every depth to 0.0, the far plane.
    #[inline]
    pub fn clear_depth(&mut self) {
        self.depth_buffer.fill(0.0);
    }

    /// Draws a line with Bresenham's algorithm, interpolating depth linearly
    /// between the end points.
    ///
    /// For each step along the major axis an error term decides whether to
    /// also step along the minor axis, using only integer arithmetic.
    pub fn draw_line(
        &mut self,
        (x0, y0, d0): (i32, i32, f32),
        (x1, y1, d1): (i32, i32, f32),
        color: Color,
        state: RenderState,
    ) {
        // Keeps outlines in front of the faces they border.
        const LINE_DEPTH_BIAS: f32 = 0.001;

        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let steps = dx.max(dy);

        let x_step = if x0 < x1 { 1 } else { -1 };
        let y_step = if y0 < y1 { 1 } else { -1 };

        let mut fb = self.as_framebuffer();
        let mut err = dx - dy;
        let (mut x, mut y) = (x0, y0);
        let mut step = 0;

        loop {
            let t = if steps == 0 { 0.0 } else { step as f32 / steps as f32 };
            let depth = d0 + t * (d1 - d0) + LINE_DEPTH_BIAS;
            fb.plot(x, y, depth, color, state);

            if x == x1 && y == y1 {
                break;
            }
            step += 1;

            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += x_step;
            }
            if e2 < dx {
                err += dx;
                y += y_step;
            }
        }
    }

    /// Get the packed color at (x, y), or None if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.color_buffer[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: u32 has no padding and any byte pattern is a valid u8; the
        // slice covers exactly the buffer's memory and borrows `self`.
        unsafe {
            std::slice::from_raw_parts(
                self.color_buffer.as_ptr() as *const u8,
                self.color_buffer.len() * 4,
            )
        }
    }

    /// Get a mutable FrameBuffer view into the color and depth buffers.
    pub fn as_framebuffer(&mut self) -> FrameBuffer<'_> {
        FrameBuffer::new(
            &mut self.color_buffer,
            &mut self.depth_buffer,
            self.width,
            self.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_line() {
        let mut renderer = Renderer::new(8, 4);
        renderer.draw_line((1, 2, 1.0), (6, 2, 1.0), Color::WHITE, RenderState::default());
        for x in 1..=6 {
            assert_eq!(renderer.pixel(x, 2), Some(0xFFFFFFFF));
        }
        assert_eq!(renderer.pixel(0, 2), Some(colors::BACKGROUND));
        assert_eq!(renderer.pixel(7, 2), Some(colors::BACKGROUND));
    }

    #[test]
    fn test_diagonal_line_reaches_both_ends() {
        let mut renderer = Renderer::new(8, 8);
        renderer.draw_line((7, 7, 1.0), (0, 0, 1.0), Color::RED, RenderState::default());
        for i in 0..8 {
            assert_eq!(renderer.pixel(i, i), Some(0xFFFF0000));
        }
    }

    #[test]
    fn test_byte_view_length() {
        let renderer = Renderer::new(3, 2);
        assert_eq!(renderer.as_bytes().len(), 3 * 2 * 4);
    }
}
