use std::path::PathBuf;
use std::time::Duration;

use crate::benchmark::FeatureCombination;

/// Errors surfaced by the `shapelab` binary.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// SDL2 failed to create, update or present the window.
    #[error("Window error: {0}")]
    Window(String),

    /// The benchmark was configured with unusable parameters.
    #[error("Invalid benchmark configuration: {0}")]
    Config(#[from] ConfigError),

    /// Reading or writing the benchmark log failed.
    #[error(transparent)]
    Log(#[from] LogError),

    /// Loading a texture or writing an image failed.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Rejected benchmark sequencer configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("primitive counts must be greater than zero")]
    ZeroPrimitiveCount,

    #[error("primitive counts must be strictly ascending ({previous} is followed by {next})")]
    NotAscending { previous: u32, next: u32 },

    #[error("the feature walk is empty")]
    EmptyWalk,

    #[error("the feature walk visits `{0}` more than once")]
    DuplicateCombination(FeatureCombination),

    #[error("the {name} window must be longer than zero (got {duration:?})")]
    ZeroWindow { name: &'static str, duration: Duration },

    #[error("`{0}` is not a comma-separated list of triangle counts")]
    MalformedCounts(String),
}

/// Errors reading or writing the CSV benchmark log.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot write benchmark log {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unexpected CSV header `{found}`")]
    Header { found: String },

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
}
