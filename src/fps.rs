//! Frame-rate measurement over a fixed reporting interval.

use std::time::Duration;

/// Counts frames and reports frames-per-second once per interval.
///
/// Time is passed in by the caller (as elapsed time since program start) so
/// the counter works the same with SDL timer ticks and in tests.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    interval: Duration,
    window_start: Duration,
    frames: u64,
    fps: f64,
}

impl FpsCounter {
    pub fn new(interval: Duration, now: Duration) -> Self {
        Self {
            interval,
            window_start: now,
            frames: 0,
            fps: 0.0,
        }
    }

    /// Add `frames` rendered frames. Returns the new rate when an interval
    /// has elapsed since the last report.
    pub fn record(&mut self, now: Duration, frames: u64) -> Option<f64> {
        self.frames += frames;
        let elapsed = now.saturating_sub(self.window_start);
        if elapsed < self.interval || elapsed.is_zero() {
            return None;
        }

        self.fps = self.frames as f64 / elapsed.as_secs_f64();
        self.frames = 0;
        self.window_start = now;
        Some(self.fps)
    }

    /// Most recently reported rate, 0.0 before the first report.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Drop frames counted so far and start a new interval at `now`.
    pub fn restart(&mut self, now: Duration) {
        self.frames = 0;
        self.window_start = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reports_once_per_interval() {
        let mut counter = FpsCounter::new(Duration::from_secs(1), Duration::ZERO);
        for ms in (100..1000).step_by(100) {
            assert_eq!(counter.record(Duration::from_millis(ms), 6), None);
        }
        let fps = counter.record(Duration::from_millis(1000), 6);
        assert_relative_eq!(fps.unwrap_or_default(), 60.0);
        assert_relative_eq!(counter.fps(), 60.0);

        // Counting starts over after a report.
        assert_eq!(counter.record(Duration::from_millis(1500), 10), None);
        assert_relative_eq!(counter.fps(), 60.0);
    }

    #[test]
    fn test_late_report_uses_real_elapsed_time() {
        let mut counter = FpsCounter::new(Duration::from_secs(1), Duration::ZERO);
        let fps = counter.record(Duration::from_secs(2), 100);
        assert_relative_eq!(fps.unwrap_or_default(), 50.0);
    }

    #[test]
    fn test_restart_discards_frames() {
        let mut counter = FpsCounter::new(Duration::from_secs(1), Duration::ZERO);
        counter.record(Duration::from_millis(500), 1000);
        counter.restart(Duration::from_millis(500));
        let fps = counter.record(Duration::from_millis(1500), 30);
        assert_relative_eq!(fps.unwrap_or_default(), 30.0);
    }
}
