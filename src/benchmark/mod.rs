//! Frame-rate benchmarking: the measurement sequencer, its samples, the CSV
//! log and the offline report.

mod results;
mod report;
mod sample;
mod sequencer;

pub use results::{BenchmarkLog, CSV_HEADER, DEFAULT_LOG_PATH};
pub use report::{heatmap, BenchmarkReport, Configuration, CountStats, Degradation, FpsStats};
pub use sample::{BenchmarkSample, FeatureCombination, DEFAULT_WALK};
pub use sequencer::{
    parse_primitive_counts, Sequencer, SequencerAction, SequencerConfig, SequencerState,
    TransitionTable, DEFAULT_DISPLAY_INTERVAL, DEFAULT_MEASUREMENT_WINDOW, DEFAULT_PRIMITIVE_COUNTS,
};
