//! Persisted benchmark results.
//!
//! The log is stored as CSV with one row per sample:
//!
//! ```text
//! Triangles,FPS,Lighting,Texture,LightType
//! 1,1520.33,No,No,None
//! 1,1498.10,Yes,No,Omni
//! ```

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};

use super::sample::BenchmarkSample;
use crate::error::LogError;
use crate::light::LightKind;

pub const CSV_HEADER: &str = "Triangles,FPS,Lighting,Texture,LightType";
const CSV_COLUMNS: [&str; 5] = ["Triangles", "FPS", "Lighting", "Texture", "LightType"];

/// Default location of the benchmark results.
pub const DEFAULT_LOG_PATH: &str = "performance_results.csv";

/// Ordered collection of benchmark samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchmarkLog {
    samples: Vec<BenchmarkSample>,
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn parse_yes_no(token: &str, line: usize, column: &str) -> Result<bool, LogError> {
    match token {
        "Yes" => Ok(true),
        "No" => Ok(false),
        other => Err(LogError::Parse {
            line,
            message: format!("{column} must be Yes or No, got `{other}`"),
        }),
    }
}

impl BenchmarkLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: BenchmarkSample) {
        self.samples.push(sample);
    }

    pub fn samples(&self) -> &[BenchmarkSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BenchmarkSample> {
        self.samples.iter()
    }

    /// Write the header and one row per sample.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), LogError> {
        let mut csv = WriterBuilder::new().from_writer(writer);
        csv.write_record(CSV_COLUMNS)?;
        for sample in &self.samples {
            csv.write_record([
                sample.primitive_count.to_string(),
                format!("{:.2}", sample.frames_per_second),
                yes_no(sample.lighting_enabled).to_string(),
                yes_no(sample.texture_enabled).to_string(),
                sample.light_kind.to_string(),
            ])?;
        }
        csv.flush()?;
        Ok(())
    }

    /// Write the log to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<(), LogError> {
        let with_path = |source| LogError::Write {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(with_path)?;
        self.write_csv(BufWriter::new(file)).map_err(|e| match e {
            LogError::Io(source) => with_path(source),
            other => other,
        })
    }

    /// Parse a log written by [`BenchmarkLog::write_csv`]. Blank lines are skipped.
    pub fn read_csv<R: Read>(reader: R) -> Result<Self, LogError> {
        let mut csv = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let header = csv.headers()?;
        if header.iter().ne(CSV_COLUMNS) {
            return Err(LogError::Header {
                found: header.iter().collect::<Vec<_>>().join(","),
            });
        }

        let mut log = Self::new();
        for record in csv.records() {
            log.push(parse_record(&record?)?);
        }
        Ok(log)
    }

    pub fn load(path: &Path) -> Result<Self, LogError> {
        let file = File::open(path)?;
        Self::read_csv(file)
    }
}

fn parse_record(record: &StringRecord) -> Result<BenchmarkSample, LogError> {
    let line = record.position().map_or(0, |p| p.line() as usize);
    let parse_error = |message: String| LogError::Parse { line, message };

    let fields: Vec<&str> = record.iter().collect();
    let [count, fps, lighting, texture, light_kind] = fields.as_slice() else {
        return Err(parse_error(format!("expected 5 fields, found {}", fields.len())));
    };

    let primitive_count = count
        .parse::<u32>()
        .map_err(|e| parse_error(format!("invalid triangle count `{count}`: {e}")))?;
    let frames_per_second = fps
        .parse::<f64>()
        .map_err(|e| parse_error(format!("invalid FPS `{fps}`: {e}")))?;
    let light_kind = light_kind
        .parse::<LightKind>()
        .map_err(|e| parse_error(e.to_string()))?;

    Ok(BenchmarkSample {
        primitive_count,
        frames_per_second,
        lighting_enabled: parse_yes_no(lighting, line, "Lighting")?,
        texture_enabled: parse_yes_no(texture, line, "Texture")?,
        light_kind,
    })
}

impl FromIterator<BenchmarkSample> for BenchmarkLog {
    fn from_iter<I: IntoIterator<Item = BenchmarkSample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::sample::{FeatureCombination, DEFAULT_WALK};
    use approx::assert_relative_eq;

    fn sample_log() -> BenchmarkLog {
        [1u32, 10]
            .iter()
            .flat_map(|&count| {
                DEFAULT_WALK
                    .iter()
                    .enumerate()
                    .map(move |(i, &c)| BenchmarkSample::new(count, 100.0 / (i + 1) as f64, c))
            })
            .collect()
    }

    #[test]
    fn test_csv_format() {
        let log: BenchmarkLog = [
            BenchmarkSample::new(1, 59.996, FeatureCombination::BASE),
            BenchmarkSample::new(10, 30.5, FeatureCombination::TEXTURE_SPOT),
        ]
        .into_iter()
        .collect();

        let mut out = Vec::new();
        log.write_csv(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Triangles,FPS,Lighting,Texture,LightType\n\
             1,60.00,No,No,None\n\
             10,30.50,Yes,Yes,Spot\n"
        );
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        let log = sample_log();

        log.save(&path).unwrap();
        let loaded = BenchmarkLog::load(&path).unwrap();

        assert_eq!(loaded.len(), log.len());
        for (a, b) in loaded.iter().zip(log.iter()) {
            assert_eq!(a.primitive_count, b.primitive_count);
            assert_eq!(a.combination(), b.combination());
            assert_relative_eq!(a.frames_per_second, b.frames_per_second, epsilon = 0.005);
        }
    }

    #[test]
    fn test_empty_log_writes_header_only() {
        let mut out = Vec::new();
        BenchmarkLog::new().write_csv(&mut out).unwrap();
        let parsed = BenchmarkLog::read_csv(out.as_slice()).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_rejects_wrong_header() {
        let err = BenchmarkLog::read_csv("Triangulos,FPS\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LogError::Header { .. }));
    }

    #[test]
    fn test_reports_bad_line() {
        let csv = format!("{CSV_HEADER}\n1,60.00,No,No,None\n2,fast,No,No,None\n");
        let err = BenchmarkLog::read_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LogError::Parse { line: 3, .. }));

        let csv = format!("{CSV_HEADER}\n1,60.00,Maybe,No,None\n");
        let err = BenchmarkLog::read_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LogError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_reports_short_row_with_its_line() {
        let csv = format!("{CSV_HEADER}\n1,60.00,No,No,None\n\n10,30.00,Yes\n");
        let err = BenchmarkLog::read_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LogError::Parse { line: 4, .. }), "{err}");
    }

    #[test]
    fn test_reads_padded_and_quoted_fields() {
        let csv = format!("{CSV_HEADER}\n 5 , 12.50 ,\"Yes\",No, Omni\n");
        let log = BenchmarkLog::read_csv(csv.as_bytes()).unwrap();
        assert_eq!(log.samples()[0].primitive_count, 5);
        assert_eq!(log.samples()[0].combination(), FeatureCombination::OMNI);
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("results.csv");
        let err = BenchmarkLog::new().save(&path).unwrap_err();
        assert!(matches!(err, LogError::Write { .. }));
    }
}
