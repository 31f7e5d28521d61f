//! Summary statistics and a heatmap for a recorded benchmark log.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;

use image::{Rgb, RgbImage};

use super::results::BenchmarkLog;
use super::sample::{BenchmarkSample, FeatureCombination};
use crate::error::LogError;

const HEATMAP_CELL_WIDTH: u32 = 64;
const HEATMAP_CELL_HEIGHT: u32 = 32;
const HEATMAP_MISSING: Rgb<u8> = Rgb([64, 64, 64]);

/// Mean, minimum and maximum of a set of frame rates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FpsStats {
    pub samples: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl FpsStats {
    fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut samples = 0;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in values {
            samples += 1;
            sum += value;
            min = min.min(value);
            max = max.max(value);
        }
        (samples > 0).then(|| Self {
            samples,
            mean: sum / samples as f64,
            min,
            max,
        })
    }
}

/// Lighting / texture pairing used to group samples, ignoring the light kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Configuration {
    pub lighting: bool,
    pub texture: bool,
}

impl Configuration {
    pub const ALL: [Configuration; 4] = [
        Configuration::new(false, false),
        Configuration::new(true, false),
        Configuration::new(false, true),
        Configuration::new(true, true),
    ];

    pub const fn new(lighting: bool, texture: bool) -> Self {
        Self { lighting, texture }
    }

    fn matches(&self, sample: &BenchmarkSample) -> bool {
        sample.lighting_enabled == self.lighting && sample.texture_enabled == self.texture
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match (self.lighting, self.texture) {
            (false, false) => "base",
            (true, false) => "lighting",
            (false, true) => "texture",
            (true, true) => "lighting + texture",
        })
    }
}

/// Spread of the frame rate across configurations for one primitive count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountStats {
    pub primitive_count: u32,
    pub mean: f64,
    /// Sample standard deviation; 0.0 with fewer than two samples.
    pub std_dev: f64,
}

/// Frame-rate loss relative to the base configuration, in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Degradation {
    pub primitive_count: u32,
    pub lighting: Option<f64>,
    pub texture: Option<f64>,
    pub both: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkReport {
    pub overall: Option<FpsStats>,
    pub by_configuration: Vec<(Configuration, FpsStats)>,
    pub by_count: Vec<CountStats>,
    pub degradation: Vec<Degradation>,
}

fn primitive_counts(log: &BenchmarkLog) -> Vec<u32> {
    log.iter()
        .map(|s| s.primitive_count)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn mean_fps<'a>(samples: impl Iterator<Item = &'a BenchmarkSample>) -> Option<f64> {
    FpsStats::from_values(samples.map(|s| s.frames_per_second)).map(|stats| stats.mean)
}

impl BenchmarkReport {
    pub fn from_log(log: &BenchmarkLog) -> Self {
        let overall = FpsStats::from_values(log.iter().map(|s| s.frames_per_second));

        let by_configuration = Configuration::ALL
            .iter()
            .filter_map(|config| {
                let fps = log.iter().filter(|s| config.matches(s)).map(|s| s.frames_per_second);
                FpsStats::from_values(fps).map(|stats| (*config, stats))
            })
            .collect();

        let counts = primitive_counts(log);
        let by_count = counts
            .iter()
            .map(|&primitive_count| {
                let values: Vec<f64> = log
                    .iter()
                    .filter(|s| s.primitive_count == primitive_count)
                    .map(|s| s.frames_per_second)
                    .collect();
                let n = values.len() as f64;
                let mean = values.iter().sum::<f64>() / n;
                let std_dev = if values.len() < 2 {
                    0.0
                } else {
                    (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
                };
                CountStats {
                    primitive_count,
                    mean,
                    std_dev,
                }
            })
            .collect();

        let degradation = counts
            .iter()
            .filter_map(|&primitive_count| {
                let of = |config: Configuration| {
                    mean_fps(
                        log.iter()
                            .filter(|s| s.primitive_count == primitive_count && config.matches(s)),
                    )
                };
                let base = of(Configuration::ALL[0]).filter(|&fps| fps > 0.0)?;
                let loss = |config| of(config).map(|fps| (base - fps) / base * 100.0);
                Some(Degradation {
                    primitive_count,
                    lighting: loss(Configuration::ALL[1]),
                    texture: loss(Configuration::ALL[2]),
                    both: loss(Configuration::ALL[3]),
                })
            })
            .collect();

        Self {
            overall,
            by_configuration,
            by_count,
            degradation,
        }
    }

    /// Write the formatted report to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<(), LogError> {
        fs::write(path, self.to_string()).map_err(|source| LogError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn write_optional_percent(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    value: Option<f64>,
) -> fmt::Result {
    match value {
        Some(value) => write!(f, " | {label}: {value:.1}%"),
        None => write!(f, " | {label}: -"),
    }
}

impl fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(overall) = self.overall else {
            return writeln!(f, "No benchmark samples.");
        };

        writeln!(f, "Samples: {}", overall.samples)?;
        writeln!(f, "Mean FPS: {:.2}", overall.mean)?;
        writeln!(f, "Max FPS: {:.2}", overall.max)?;
        writeln!(f, "Min FPS: {:.2}", overall.min)?;

        writeln!(f, "\nBy configuration:")?;
        for (config, stats) in &self.by_configuration {
            writeln!(
                f,
                "  {:<20} mean {:>10.2}  max {:>10.2}  min {:>10.2}",
                config.to_string(),
                stats.mean,
                stats.max,
                stats.min
            )?;
        }

        writeln!(f, "\nBy triangle count:")?;
        for stats in &self.by_count {
            writeln!(
                f,
                "  {:>6} triangles: mean {:>10.2}  std dev {:>8.2}",
                stats.primitive_count, stats.mean, stats.std_dev
            )?;
        }

        if !self.degradation.is_empty() {
            writeln!(f, "\nDegradation vs. base:")?;
            for entry in &self.degradation {
                write!(f, "  {:>6} triangles", entry.primitive_count)?;
                write_optional_percent(f, "lighting", entry.lighting)?;
                write_optional_percent(f, "texture", entry.texture)?;
                write_optional_percent(f, "both", entry.both)?;
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Map `t` in [0, 1] from red through yellow to green.
fn heat_color(t: f64) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        Rgb([255, (510.0 * t).round() as u8, 0])
    } else {
        Rgb([(510.0 * (1.0 - t)).round() as u8, 255, 0])
    }
}

/// Render a configuration x primitive-count grid of mean frame rates.
///
/// Rows follow the order in which combinations first appear in the log,
/// columns are ascending primitive counts. Slow cells are red, fast cells
/// green, cells without samples gray. Returns `None` for an empty log.
pub fn heatmap(log: &BenchmarkLog) -> Option<RgbImage> {
    let overall = FpsStats::from_values(log.iter().map(|s| s.frames_per_second))?;

    let mut rows: Vec<FeatureCombination> = Vec::new();
    for sample in log.iter() {
        let combination = sample.combination();
        if !rows.contains(&combination) {
            rows.push(combination);
        }
    }
    let columns = primitive_counts(log);

    let cells: Vec<Vec<Option<f64>>> = rows
        .iter()
        .map(|&combination| {
            columns
                .iter()
                .map(|&count| {
                    mean_fps(log.iter().filter(|s| {
                        s.primitive_count == count && s.combination() == combination
                    }))
                })
                .collect()
        })
        .collect();

    let range = overall.max - overall.min;
    let image = RgbImage::from_fn(
        columns.len() as u32 * HEATMAP_CELL_WIDTH,
        rows.len() as u32 * HEATMAP_CELL_HEIGHT,
        |x, y| {
            let row = (y / HEATMAP_CELL_HEIGHT) as usize;
            let column = (x / HEATMAP_CELL_WIDTH) as usize;
            match cells[row][column] {
                Some(fps) if range > 0.0 => heat_color((fps - overall.min) / range),
                Some(_) => heat_color(1.0),
                None => HEATMAP_MISSING,
            }
        },
    );
    Some(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn log() -> BenchmarkLog {
        [
            BenchmarkSample::new(1, 100.0, FeatureCombination::BASE),
            BenchmarkSample::new(1, 80.0, FeatureCombination::OMNI),
            BenchmarkSample::new(1, 60.0, FeatureCombination::SPOT),
            BenchmarkSample::new(1, 50.0, FeatureCombination::TEXTURE),
            BenchmarkSample::new(10, 40.0, FeatureCombination::BASE),
            BenchmarkSample::new(10, 20.0, FeatureCombination::TEXTURE_OMNI),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_overall_and_configuration_stats() {
        let report = BenchmarkReport::from_log(&log());
        let overall = report.overall.unwrap();
        assert_eq!(overall.samples, 6);
        assert_relative_eq!(overall.mean, 350.0 / 6.0);
        assert_relative_eq!(overall.max, 100.0);
        assert_relative_eq!(overall.min, 20.0);

        let lighting = report
            .by_configuration
            .iter()
            .find(|(c, _)| *c == Configuration::new(true, false))
            .map(|(_, stats)| *stats)
            .unwrap();
        assert_eq!(lighting.samples, 2);
        assert_relative_eq!(lighting.mean, 70.0);
    }

    #[test]
    fn test_count_stats_use_sample_std_dev() {
        let report = BenchmarkReport::from_log(&log());
        let ten = report.by_count.iter().find(|c| c.primitive_count == 10).unwrap();
        assert_relative_eq!(ten.mean, 30.0);
        assert_relative_eq!(ten.std_dev, 200f64.sqrt());
    }

    #[test]
    fn test_degradation_relative_to_base() {
        let report = BenchmarkReport::from_log(&log());
        let one = report.degradation[0];
        assert_eq!(one.primitive_count, 1);
        assert_relative_eq!(one.lighting.unwrap(), 30.0);
        assert_relative_eq!(one.texture.unwrap(), 50.0);
        assert_eq!(one.both, None);
        assert_relative_eq!(report.degradation[1].both.unwrap(), 50.0);
    }

    #[test]
    fn test_empty_report() {
        let report = BenchmarkReport::from_log(&BenchmarkLog::new());
        assert!(report.overall.is_none());
        assert_eq!(report.to_string(), "No benchmark samples.\n");
        assert!(heatmap(&BenchmarkLog::new()).is_none());
    }

    #[test]
    fn test_save_writes_printed_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.txt");
        let report = BenchmarkReport::from_log(&log());

        report.save(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, report.to_string());
        assert!(written.starts_with("Samples: 6\n"));

        let missing = dir.path().join("missing").join("summary.txt");
        assert!(matches!(report.save(&missing), Err(LogError::Write { .. })));
    }

    #[test]
    fn test_heatmap_layout_and_colors() {
        let image = heatmap(&log()).unwrap();
        // Five distinct combinations by two counts.
        assert_eq!(image.width(), 2 * HEATMAP_CELL_WIDTH);
        assert_eq!(image.height(), 5 * HEATMAP_CELL_HEIGHT);

        // Fastest cell (base, 1 triangle) is green; slowest is red.
        assert_eq!(*image.get_pixel(0, 0), Rgb([0, 255, 0]));
        let slowest = image.get_pixel(HEATMAP_CELL_WIDTH, 4 * HEATMAP_CELL_HEIGHT);
        assert_eq!(*slowest, Rgb([255, 0, 0]));
        // Spot light was never measured with ten triangles.
        assert_eq!(*image.get_pixel(HEATMAP_CELL_WIDTH, 2 * HEATMAP_CELL_HEIGHT), HEATMAP_MISSING);
    }

    #[test]
    fn test_heatmap_png_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heatmap.png");
        heatmap(&log()).unwrap().save(&path).unwrap();
        let loaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(loaded.dimensions(), (2 * HEATMAP_CELL_WIDTH, 5 * HEATMAP_CELL_HEIGHT));
    }
}
