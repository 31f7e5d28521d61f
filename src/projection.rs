//! Projection parameters.
//!
//! The [`Projection`] enum is the single source of truth for how eye space is
//! mapped to clip space. Demos rebuild it whenever the window is resized.

use crate::math::mat4::Mat4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Perspective {
        /// Vertical field of view in radians.
        fov_y: f32,
        aspect_ratio: f32,
        z_near: f32,
        z_far: f32,
    },
    Orthographic {
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        z_near: f32,
        z_far: f32,
    },
}

impl Projection {
    /// Perspective projection with the field of view given in degrees.
    pub fn perspective_degrees(fov_y_degrees: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Projection::Perspective {
            fov_y: fov_y_degrees.to_radians(),
            aspect_ratio,
            z_near,
            z_far,
        }
    }

    /// Planar orthographic projection with depth range [-1, 1].
    pub fn ortho_2d(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        Projection::Orthographic {
            left,
            right,
            bottom,
            top,
            z_near: -1.0,
            z_far: 1.0,
        }
    }

    /// Orthographic projection showing at least `[-half_extent, half_extent]`
    /// on both axes; the longer window axis is widened to keep the aspect.
    pub fn fit_ortho(half_extent: f32, width: u32, height: u32) -> Self {
        let aspect = width as f32 / height.max(1) as f32;
        if aspect >= 1.0 {
            Self::ortho_2d(-half_extent * aspect, half_extent * aspect, -half_extent, half_extent)
        } else {
            Self::ortho_2d(-half_extent, half_extent, -half_extent / aspect, half_extent / aspect)
        }
    }

    /// Returns a copy whose aspect ratio follows a new viewport size.
    ///
    /// Orthographic projections are returned unchanged.
    pub fn with_viewport(self, width: u32, height: u32) -> Self {
        match self {
            Projection::Perspective {
                fov_y,
                z_near,
                z_far,
                ..
            } => Projection::Perspective {
                fov_y,
                aspect_ratio: width as f32 / height.max(1) as f32,
                z_near,
                z_far,
            },
            ortho => ortho,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        match *self {
            Projection::Perspective {
                fov_y,
                aspect_ratio,
                z_near,
                z_far,
            } => Mat4::perspective(fov_y, aspect_ratio, z_near, z_far),
            Projection::Orthographic {
                left,
                right,
                bottom,
                top,
                z_near,
                z_far,
            } => Mat4::orthographic(left, right, bottom, top, z_near, z_far),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_ortho_landscape() {
        assert_eq!(
            Projection::fit_ortho(2.0, 800, 400),
            Projection::ortho_2d(-4.0, 4.0, -2.0, 2.0)
        );
    }

    #[test]
    fn test_fit_ortho_portrait() {
        assert_eq!(
            Projection::fit_ortho(2.0, 400, 800),
            Projection::ortho_2d(-2.0, 2.0, -4.0, 4.0)
        );
    }

    #[test]
    fn test_fit_ortho_zero_height() {
        // Minimised windows report a zero height.
        assert_eq!(
            Projection::fit_ortho(1.0, 10, 0),
            Projection::ortho_2d(-10.0, 10.0, -1.0, 1.0)
        );
    }

    #[test]
    fn test_with_viewport_updates_aspect() {
        let p = Projection::perspective_degrees(45.0, 1.0, 0.1, 100.0).with_viewport(1280, 720);
        match p {
            Projection::Perspective { aspect_ratio, .. } => assert_eq!(aspect_ratio, 1280.0 / 720.0),
            other => panic!("unexpected projection {other:?}"),
        }
    }
}
