use std::fmt;

use crate::light::LightKind;

/// Rendering features enabled while a measurement window runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FeatureCombination {
    pub lighting: bool,
    pub light_kind: LightKind,
    pub texture: bool,
}

impl FeatureCombination {
    pub const BASE: Self = Self::new(LightKind::None, false);
    pub const OMNI: Self = Self::new(LightKind::Omni, false);
    pub const SPOT: Self = Self::new(LightKind::Spot, false);
    pub const TEXTURE: Self = Self::new(LightKind::None, true);
    pub const TEXTURE_OMNI: Self = Self::new(LightKind::Omni, true);
    pub const TEXTURE_SPOT: Self = Self::new(LightKind::Spot, true);

    /// Lighting is enabled exactly when a light kind other than `None` is given.
    pub const fn new(light_kind: LightKind, texture: bool) -> Self {
        Self {
            lighting: !matches!(light_kind, LightKind::None),
            light_kind,
            texture,
        }
    }
}

impl fmt::Display for FeatureCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let light = match (self.lighting, self.light_kind) {
            (false, _) | (true, LightKind::None) => None,
            (true, LightKind::Omni) => Some("omni light"),
            (true, LightKind::Spot) => Some("spot light"),
        };
        match (self.texture, light) {
            (false, None) => f.write_str("no lighting"),
            (false, Some(light)) => f.write_str(light),
            (true, None) => f.write_str("texture"),
            (true, Some(light)) => write!(f, "texture + {light}"),
        }
    }
}

/// The six combinations measured for every primitive count, in order.
pub const DEFAULT_WALK: [FeatureCombination; 6] = [
    FeatureCombination::BASE,
    FeatureCombination::OMNI,
    FeatureCombination::SPOT,
    FeatureCombination::TEXTURE,
    FeatureCombination::TEXTURE_OMNI,
    FeatureCombination::TEXTURE_SPOT,
];

/// One frame-rate measurement for one configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchmarkSample {
    pub primitive_count: u32,
    pub frames_per_second: f64,
    pub lighting_enabled: bool,
    pub texture_enabled: bool,
    pub light_kind: LightKind,
}

impl BenchmarkSample {
    pub fn new(
        primitive_count: u32,
        frames_per_second: f64,
        combination: FeatureCombination,
    ) -> Self {
        Self {
            primitive_count,
            frames_per_second,
            lighting_enabled: combination.lighting,
            texture_enabled: combination.texture,
            light_kind: combination.light_kind,
        }
    }

    pub fn combination(&self) -> FeatureCombination {
        FeatureCombination {
            lighting: self.lighting_enabled,
            light_kind: self.light_kind,
            texture: self.texture_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lighting_follows_light_kind() {
        assert!(!FeatureCombination::BASE.lighting);
        assert!(FeatureCombination::OMNI.lighting);
        assert!(FeatureCombination::TEXTURE_SPOT.lighting);
        assert!(!FeatureCombination::TEXTURE.lighting);
    }

    #[test]
    fn test_display() {
        let labels: Vec<String> = DEFAULT_WALK.iter().map(|c| c.to_string()).collect();
        assert_eq!(
            labels,
            [
                "no lighting",
                "omni light",
                "spot light",
                "texture",
                "texture + omni light",
                "texture + spot light"
            ]
        );
    }

    #[test]
    fn test_sample_keeps_its_combination() {
        let sample = BenchmarkSample::new(50, 120.0, FeatureCombination::TEXTURE_OMNI);
        assert_eq!(sample.combination(), FeatureCombination::TEXTURE_OMNI);
        assert!(sample.lighting_enabled && sample.texture_enabled);
    }
}
