//! 2D affine transforms for the planar demos.
//!
//! Two interchangeable paths place a shape on screen:
//!
//! - the manual pipeline: [`rotate`], [`scale`], [`reflect`] and [`translate`]
//!   applied point by point, composed by [`apply_all`];
//! - the matrix path: [`TransformParameters::to_matrix`] hands a single
//!   [`Mat4`] to the engine.
//!
//! Both use the same fixed order (rotate, then scale, then reflect, then
//! translate) and agree within floating-point tolerance.

use std::fmt;

use crate::math::{mat4::Mat4, vec2::Vec2};

/// Distance moved per translate command.
pub const TRANSLATE_STEP: f32 = 0.1;
/// Scale change per scale command, applied to both axes.
pub const SCALE_STEP: f32 = 0.1;
/// Rotation per rotate command, in degrees.
pub const ROTATION_STEP: f32 = 5.0;
/// Smallest scale factor reachable through [`TransformParameters::scale_by`].
pub const MIN_SCALE: f32 = 0.1;

/// Rotate `p` counter-clockwise about the origin.
pub fn rotate(p: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos)
}

pub fn scale(p: Vec2, sx: f32, sy: f32) -> Vec2 {
    Vec2::new(p.x * sx, p.y * sy)
}

/// Mirror `p` about the X axis (negating y) and/or the Y axis (negating x).
pub fn reflect(p: Vec2, about_x: bool, about_y: bool) -> Vec2 {
    Vec2::new(
        if about_y { -p.x } else { p.x },
        if about_x { -p.y } else { p.y },
    )
}

pub fn translate(p: Vec2, tx: f32, ty: f32) -> Vec2 {
    Vec2::new(p.x + tx, p.y + ty)
}

/// Run `p` through the whole pipeline: rotate, scale, reflect, translate.
pub fn apply_all(p: Vec2, params: &TransformParameters) -> Vec2 {
    let p = rotate(p, params.rotation_degrees);
    let p = scale(p, params.scale.x, params.scale.y);
    let p = reflect(p, params.reflect_about_x, params.reflect_about_y);
    translate(p, params.translate.x, params.translate.y)
}

/// User-controlled placement of the active shape.
///
/// Mutating methods return `&mut Self` for chaining:
///
/// ```ignore
/// params.translate_by(0.1, 0.0).rotate_by(5.0).toggle_reflect_x();
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformParameters {
    pub translate: Vec2,
    pub scale: Vec2,
    pub rotation_degrees: f32,
    pub reflect_about_x: bool,
    pub reflect_about_y: bool,
}

impl Default for TransformParameters {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            scale: Vec2::ONE,
            rotation_degrees: 0.0,
            reflect_about_x: false,
            reflect_about_y: false,
        }
    }
}

impl TransformParameters {
    /// Identity parameters.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate_by(&mut self, dx: f32, dy: f32) -> &mut Self {
        self.translate = self.translate + Vec2::new(dx, dy);
        self
    }

    /// Add `delta` to both scale factors, never going below [`MIN_SCALE`].
    pub fn scale_by(&mut self, delta: f32) -> &mut Self {
        self.scale.x = (self.scale.x + delta).max(MIN_SCALE);
        self.scale.y = (self.scale.y + delta).max(MIN_SCALE);
        self
    }

    pub fn rotate_by(&mut self, degrees: f32) -> &mut Self {
        self.rotation_degrees += degrees;
        self
    }

    pub fn toggle_reflect_x(&mut self) -> &mut Self {
        self.reflect_about_x = !self.reflect_about_x;
        self
    }

    pub fn toggle_reflect_y(&mut self) -> &mut Self {
        self.reflect_about_y = !self.reflect_about_y;
        self
    }

    pub fn reset(&mut self) -> &mut Self {
        *self = Self::default();
        self
    }

    /// Matrix equivalent of [`apply_all`].
    ///
    /// Order: Translation * Reflection * Scale * RotationZ
    /// (rotation applied first, translation last)
    pub fn to_matrix(&self) -> Mat4 {
        let reflect_x = if self.reflect_about_y { -1.0 } else { 1.0 };
        let reflect_y = if self.reflect_about_x { -1.0 } else { 1.0 };
        Mat4::translation(self.translate.x, self.translate.y, 0.0)
            * Mat4::scaling(reflect_x, reflect_y, 1.0)
            * Mat4::scaling(self.scale.x, self.scale.y, 1.0)
            * Mat4::rotation_z(self.rotation_degrees.to_radians())
    }
}

impl fmt::Display for TransformParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "T({:.1}, {:.1}) S({:.1}, {:.1}) R({:.0}°)",
            self.translate.x, self.translate.y, self.scale.x, self.scale.y, self.rotation_degrees
        )?;
        if self.reflect_about_x {
            f.write_str(" RefX")?;
        }
        if self.reflect_about_y {
            f.write_str(" RefY")?;
        }
        Ok(())
    }
}

/// Which path turns [`TransformParameters`] into screen positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PipelineKind {
    /// Points are transformed on the CPU with [`apply_all`].
    #[default]
    Manual,
    /// A model matrix is handed to the engine.
    Matrix,
}

impl PipelineKind {
    pub fn toggled(self) -> Self {
        match self {
            PipelineKind::Manual => PipelineKind::Matrix,
            PipelineKind::Matrix => PipelineKind::Manual,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PipelineKind::Manual => "manual",
            PipelineKind::Matrix => "matrix",
        }
    }
}
