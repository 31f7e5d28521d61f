//! Fixed-function style lighting: one point light, optionally restricted to a
//! spot cone, evaluated per vertex.

use std::fmt;
use std::str::FromStr;

use crate::colors::Color;
use crate::math::vec3::Vec3;

/// Which light, if any, illuminates the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LightKind {
    #[default]
    None,
    /// Point light radiating in every direction.
    Omni,
    /// Point light restricted to a cone.
    Spot,
}

impl LightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LightKind::None => "None",
            LightKind::Omni => "Omni",
            LightKind::Spot => "Spot",
        }
    }
}

impl fmt::Display for LightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLightKind(pub String);

impl fmt::Display for UnknownLightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown light kind `{}`", self.0)
    }
}

impl std::error::Error for UnknownLightKind {}

impl FromStr for LightKind {
    type Err = UnknownLightKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "None" => Ok(LightKind::None),
            "Omni" => Ok(LightKind::Omni),
            "Spot" => Ok(LightKind::Spot),
            other => Err(UnknownLightKind(other.to_string())),
        }
    }
}

/// Surface response to the specular term. Ambient and diffuse reflectance
/// follow the vertex color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub specular: Color,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            specular: Color::BLACK,
            shininess: 0.0,
        }
    }
}

/// Spot cutoff meaning "no cone": the light behaves omnidirectionally.
pub const OMNI_CUTOFF_DEGREES: f32 = 180.0;

/// A positional light with ambient, diffuse and specular contributions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    /// Scene-wide ambient term, applied regardless of the light geometry.
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    pub spot_direction: Vec3,
    pub spot_cutoff_degrees: f32,
    pub spot_exponent: f32,
}

impl Light {
    /// Create a white omnidirectional light.
    pub fn omni(position: Vec3) -> Self {
        Self {
            position,
            ambient: Color::rgb(0.2, 0.2, 0.2),
            diffuse: Color::WHITE,
            specular: Color::WHITE,
            spot_direction: Vec3::new(0.0, 0.0, -1.0),
            spot_cutoff_degrees: OMNI_CUTOFF_DEGREES,
            spot_exponent: 0.0,
        }
    }

    /// Create a white spot light. `direction` does not need to be normalized.
    pub fn spot(position: Vec3, direction: Vec3, cutoff_degrees: f32, exponent: f32) -> Self {
        Self {
            spot_direction: direction.normalize(),
            spot_cutoff_degrees: cutoff_degrees,
            spot_exponent: exponent,
            ..Self::omni(position)
        }
    }

    pub fn with_ambient(mut self, ambient: Color) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn kind(&self) -> LightKind {
        if self.spot_cutoff_degrees >= OMNI_CUTOFF_DEGREES {
            LightKind::Omni
        } else {
            LightKind::Spot
        }
    }

    /// Attenuation from the spot cone for a ray travelling from the light to `point`.
    fn spot_factor(&self, point: Vec3) -> f32 {
        if self.spot_cutoff_degrees >= OMNI_CUTOFF_DEGREES {
            return 1.0;
        }
        let ray = (point - self.position).normalize();
        let cos_angle = ray.dot(self.spot_direction);
        if cos_angle < self.spot_cutoff_degrees.to_radians().cos() {
            0.0
        } else {
            cos_angle.max(0.0).powf(self.spot_exponent)
        }
    }

    /// Lit color of a surface point.
    ///
    /// `base` supplies the ambient and diffuse reflectance, `eye` is the viewer
    /// position used for the specular highlight. Alpha is taken from `base`.
    pub fn shade(&self, point: Vec3, normal: Vec3, eye: Vec3, base: Color, material: &Material) -> Color {
        let normal = normal.normalize();
        let to_light = (self.position - point).normalize();
        let ambient = base.modulate(self.ambient);

        let n_dot_l = normal.dot(to_light);
        if n_dot_l <= 0.0 {
            return ambient.with_alpha(base.a);
        }

        let spot = self.spot_factor(point);
        if spot == 0.0 {
            return ambient.with_alpha(base.a);
        }

        let diffuse = base.modulate(self.diffuse) * n_dot_l;

        let half_vector = (to_light + (eye - point).normalize()).normalize();
        let n_dot_h = normal.dot(half_vector).max(0.0);
        let specular = material.specular.modulate(self.specular) * n_dot_h.powf(material.shininess);

        (ambient + (diffuse + specular) * spot).with_alpha(base.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EYE: Vec3 = Vec3::new(0.0, 0.0, 5.0);

    #[test]
    fn test_direct_illumination() {
        let light = Light::omni(Vec3::new(0.0, 0.0, 2.0)).with_ambient(Color::BLACK);
        let lit = light.shade(Vec3::ZERO, Vec3::FORWARD, EYE, Color::RED, &Material::default());
        assert_relative_eq!(lit.r, 1.0, epsilon = 1e-5);
        assert_relative_eq!(lit.g, 0.0);
    }

    #[test]
    fn test_back_facing_gets_only_ambient() {
        let light = Light::omni(Vec3::new(0.0, 0.0, 2.0)).with_ambient(Color::rgb(0.3, 0.3, 0.3));
        let lit = light.shade(Vec3::ZERO, -Vec3::FORWARD, EYE, Color::WHITE, &Material::default());
        assert_relative_eq!(lit.r, 0.3, epsilon = 1e-5);
    }

    #[test]
    fn test_angled_illumination() {
        let light = Light::omni(Vec3::new(0.0, 10.0, 10.0)).with_ambient(Color::BLACK);
        let lit = light.shade(Vec3::ZERO, Vec3::UP, EYE, Color::WHITE, &Material::default());
        assert_relative_eq!(lit.r, 0.707, epsilon = 0.01);
    }

    #[test]
    fn test_spot_cone_excludes_points_outside() {
        let spot = Light::spot(Vec3::new(0.0, 0.0, 2.0), Vec3::new(0.0, 0.0, -1.0), 15.0, 0.0)
            .with_ambient(Color::BLACK);
        let inside = spot.shade(Vec3::ZERO, Vec3::FORWARD, EYE, Color::WHITE, &Material::default());
        let outside = spot.shade(Vec3::new(2.0, 0.0, 0.0), Vec3::FORWARD, EYE, Color::WHITE, &Material::default());
        assert!(inside.r > 0.9);
        assert_eq!(outside.r, 0.0);
        assert_eq!(spot.kind(), LightKind::Spot);
    }

    #[test]
    fn test_specular_highlight_adds_to_diffuse() {
        let light = Light::omni(Vec3::new(0.0, 0.0, 2.0)).with_ambient(Color::BLACK);
        let material = Material {
            specular: Color::rgb(0.5, 0.5, 0.5),
            shininess: 32.0,
        };
        let lit = light.shade(Vec3::ZERO, Vec3::FORWARD, EYE, Color::rgb(0.2, 0.2, 0.2), &material);
        assert_relative_eq!(lit.r, 0.7, epsilon = 1e-4);
    }

    #[test]
    fn test_light_kind_tokens() {
        for kind in [LightKind::None, LightKind::Omni, LightKind::Spot] {
            assert_eq!(kind.as_str().parse::<LightKind>(), Ok(kind));
        }
        assert!("Sem luz".parse::<LightKind>().is_err());
    }
}
