//! The benchmark state machine.
//!
//! A [`Sequencer`] is driven once per rendered frame with the current time and
//! the number of frames rendered since the previous call. It keeps two clocks:
//!
//! - a display clock reporting the live frame rate every `display_interval`
//!   (logged, and shown in the window title by the benchmark demo);
//! - a measurement clock: every `measurement_window` one [`BenchmarkSample`]
//!   is recorded for the configuration that was active during that window.
//!
//! After each sample the feature combination advances along a
//! [`TransitionTable`]; when the table has no successor the sequencer moves to
//! the next primitive count and starts over at the table's first combination.

use std::collections::HashMap;
use std::collections::HashSet;
use std::time::Duration;

use super::results::BenchmarkLog;
use super::sample::{BenchmarkSample, FeatureCombination, DEFAULT_WALK};
use crate::error::ConfigError;
use crate::fps::FpsCounter;

/// Primitive counts measured when none are configured.
pub const DEFAULT_PRIMITIVE_COUNTS: [u32; 7] = [1, 10, 50, 100, 500, 1000, 5000];
pub const DEFAULT_MEASUREMENT_WINDOW: Duration = Duration::from_secs(3);
pub const DEFAULT_DISPLAY_INTERVAL: Duration = Duration::from_secs(1);

/// Parse a comma-separated list of primitive counts such as `"1,10,50"`.
///
/// A blank list parses to an empty `Vec`. Ordering is checked later by
/// [`SequencerConfig::new`].
pub fn parse_primitive_counts(list: &str) -> Result<Vec<u32>, ConfigError> {
    if list.trim().is_empty() {
        return Ok(Vec::new());
    }
    list.split(',')
        .map(|token| {
            token
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::MalformedCounts(list.to_string()))
        })
        .collect()
}

/// Explicit `current -> next` rules between feature combinations.
///
/// A combination without a rule is the last one for a primitive count.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionTable {
    start: FeatureCombination,
    rules: HashMap<FeatureCombination, FeatureCombination>,
}

impl TransitionTable {
    /// Chain the combinations of `walk` in order.
    pub fn from_walk(walk: &[FeatureCombination]) -> Result<Self, ConfigError> {
        let (&start, _) = walk.split_first().ok_or(ConfigError::EmptyWalk)?;

        let mut seen = HashSet::new();
        for &combination in walk {
            if !seen.insert(combination) {
                return Err(ConfigError::DuplicateCombination(combination));
            }
        }

        let rules = walk.windows(2).map(|pair| (pair[0], pair[1])).collect();
        Ok(Self { start, rules })
    }

    pub fn start(&self) -> FeatureCombination {
        self.start
    }

    pub fn next(&self, current: FeatureCombination) -> Option<FeatureCombination> {
        self.rules.get(&current).copied()
    }

    /// The combinations in visiting order, starting at [`TransitionTable::start`].
    pub fn walk(&self) -> impl Iterator<Item = FeatureCombination> + '_ {
        std::iter::successors(Some(self.start), move |&current| self.next(current))
    }

    /// Number of combinations measured per primitive count.
    pub fn combination_count(&self) -> usize {
        self.rules.len() + 1
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        let rules = DEFAULT_WALK
            .windows(2)
            .map(|pair| (pair[0], pair[1]))
            .collect();
        Self {
            start: DEFAULT_WALK[0],
            rules,
        }
    }
}

/// Validated sequencer parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SequencerConfig {
    primitive_counts: Vec<u32>,
    transitions: TransitionTable,
    measurement_window: Duration,
    display_interval: Duration,
}

impl SequencerConfig {
    /// Check the parameters. An empty `primitive_counts` list is accepted and
    /// produces a run without samples.
    pub fn new(
        primitive_counts: Vec<u32>,
        transitions: TransitionTable,
        measurement_window: Duration,
        display_interval: Duration,
    ) -> Result<Self, ConfigError> {
        if primitive_counts.contains(&0) {
            return Err(ConfigError::ZeroPrimitiveCount);
        }
        if let Some(pair) = primitive_counts.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(ConfigError::NotAscending {
                previous: pair[0],
                next: pair[1],
            });
        }
        if measurement_window.is_zero() {
            return Err(ConfigError::ZeroWindow {
                name: "measurement",
                duration: measurement_window,
            });
        }
        if display_interval.is_zero() {
            return Err(ConfigError::ZeroWindow {
                name: "display",
                duration: display_interval,
            });
        }

        Ok(Self {
            primitive_counts,
            transitions,
            measurement_window,
            display_interval,
        })
    }

    pub fn primitive_counts(&self) -> &[u32] {
        &self.primitive_counts
    }

    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    pub fn measurement_window(&self) -> Duration {
        self.measurement_window
    }

    pub fn display_interval(&self) -> Duration {
        self.display_interval
    }

    /// Number of samples a complete run records.
    pub fn total_samples(&self) -> usize {
        self.primitive_counts.len() * self.transitions.combination_count()
    }
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            primitive_counts: DEFAULT_PRIMITIVE_COUNTS.to_vec(),
            transitions: TransitionTable::default(),
            measurement_window: DEFAULT_MEASUREMENT_WINDOW,
            display_interval: DEFAULT_DISPLAY_INTERVAL,
        }
    }
}

/// Configuration currently being measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequencerState {
    pub primitive_count_index: usize,
    pub primitive_count: u32,
    pub combination: FeatureCombination,
    pub window_start: Duration,
}

/// What the caller should do after a [`Sequencer::tick`].
#[derive(Debug, Clone, PartialEq)]
pub enum SequencerAction {
    /// Keep rendering the current configuration.
    Continue,
    /// A window elapsed: the sample was recorded and the configuration changed.
    RecordAndAdvance(BenchmarkSample),
    /// Every configuration was measured; the complete log is handed over for
    /// persisting. Returned exactly once.
    Finished(BenchmarkLog),
}

pub struct Sequencer {
    config: SequencerConfig,
    /// `None` once the primitive counts are exhausted.
    state: Option<SequencerState>,
    display: FpsCounter,
    window_frames: u64,
    log: BenchmarkLog,
    finished: bool,
}

impl Sequencer {
    pub fn new(config: SequencerConfig, now: Duration) -> Self {
        let state = config
            .primitive_counts
            .first()
            .map(|&primitive_count| SequencerState {
                primitive_count_index: 0,
                primitive_count,
                combination: config.transitions.start(),
                window_start: now,
            });
        if let Some(state) = &state {
            log::info!("=== Benchmark: {} triangles ===", state.primitive_count);
        }

        Self {
            display: FpsCounter::new(config.display_interval, now),
            config,
            state,
            window_frames: 0,
            log: BenchmarkLog::new(),
            finished: false,
        }
    }

    /// Account for `frames` rendered since the previous call.
    pub fn tick(&mut self, now: Duration, frames: u64) -> SequencerAction {
        if self.finished {
            return SequencerAction::Continue;
        }
        let Some(state) = self.state else {
            return self.finish();
        };

        if let Some(fps) = self.display.record(now, frames) {
            log::info!(
                "FPS: {:.0} | Triangles: {} | {}",
                fps,
                state.primitive_count,
                state.combination
            );
        }

        self.window_frames += frames;
        let elapsed = now.saturating_sub(state.window_start);
        if elapsed < self.config.measurement_window {
            return SequencerAction::Continue;
        }

        let fps = self.window_frames as f64 / elapsed.as_secs_f64();
        let sample = BenchmarkSample::new(state.primitive_count, fps, state.combination);
        self.log.push(sample);
        self.window_frames = 0;
        self.advance(state, now);

        if self.state.is_none() {
            self.finish()
        } else {
            SequencerAction::RecordAndAdvance(sample)
        }
    }

    fn advance(&mut self, state: SequencerState, now: Duration) {
        if let Some(combination) = self.config.transitions.next(state.combination) {
            log::info!(">>> {} <<<", combination);
            self.state = Some(SequencerState {
                combination,
                window_start: now,
                ..state
            });
            return;
        }

        let index = state.primitive_count_index + 1;
        self.state = self
            .config
            .primitive_counts
            .get(index)
            .map(|&primitive_count| SequencerState {
                primitive_count_index: index,
                primitive_count,
                combination: self.config.transitions.start(),
                window_start: now,
            });
        if let Some(state) = &self.state {
            log::info!("=== Benchmark: {} triangles ===", state.primitive_count);
        }
    }

    fn finish(&mut self) -> SequencerAction {
        self.finished = true;
        log::info!("Benchmark complete: {} samples", self.log.len());
        SequencerAction::Finished(self.log.clone())
    }

    /// Configuration being measured, `None` once every count was measured.
    pub fn state(&self) -> Option<&SequencerState> {
        self.state.as_ref()
    }

    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    /// Frame rate over the last display interval.
    pub fn live_fps(&self) -> f64 {
        self.display.fps()
    }

    pub fn log(&self) -> &BenchmarkLog {
        &self.log
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
