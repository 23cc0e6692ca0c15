//! Poll statistics.
//!
//! Counts what happened on each tick so a host can surface sampling health,
//! for example how often capture fails while the cursor sits over a
//! protected surface, or whether ticks are slow enough to stall its UI.
//!
//! # Example
//!
//! ```no_run
//! use pixprobe::{CursorTracker, DpiContext};
//!
//! let dpi = DpiContext::initialize().unwrap();
//! let mut tracker = CursorTracker::system(&dpi).unwrap();
//! for _ in 0..100 {
//!     tracker.poll();
//! }
//!
//! let stats = tracker.statistics();
//! println!("{}", stats.summary());
//! println!("failure rate: {:.1}%", stats.failure_rate() * 100.0);
//! ```

use crate::display::ScreenPoint;
use crate::tracker::{SampleResult, SampleStatus};
use std::time::Duration;

/// Counters collected from poll results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PollStatistics {
    // Outcome counts
    /// Total number of polls recorded.
    pub polls: u64,
    /// Polls where position and color were both read.
    pub live: u64,
    /// Polls where the pixel could not be captured.
    pub capture_failures: u64,
    /// Polls where the cursor position could not be read.
    pub cursor_failures: u64,

    // Failure streaks
    /// Failures since the last live poll.
    pub consecutive_failures: u64,
    /// Longest run of failures seen.
    pub longest_failure_streak: u64,

    // Timing
    /// Sum of all poll durations.
    pub total_poll_time: Duration,
    /// Slowest single poll.
    pub max_poll_time: Duration,

    // Cursor travel
    /// Total distance the cursor moved between live positions (pixels).
    pub cursor_distance: f64,
    last_position: Option<ScreenPoint>,
}

impl PollStatistics {
    /// Create empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one poll and how long it took.
    pub fn record(&mut self, result: &SampleResult, elapsed: Duration) {
        self.polls += 1;
        self.total_poll_time += elapsed;
        self.max_poll_time = self.max_poll_time.max(elapsed);

        match result.status {
            SampleStatus::Live => {
                self.live += 1;
                self.consecutive_failures = 0;
            }
            SampleStatus::CaptureFailed => {
                self.capture_failures += 1;
                self.bump_streak();
            }
            SampleStatus::CursorUnavailable => {
                self.cursor_failures += 1;
                self.bump_streak();
            }
        }

        if result.status != SampleStatus::CursorUnavailable {
            if let Some(last) = self.last_position {
                let dx = (result.position.x as f64) - (last.x as f64);
                let dy = (result.position.y as f64) - (last.y as f64);
                self.cursor_distance += (dx * dx + dy * dy).sqrt();
            }
            self.last_position = Some(result.position);
        }
    }

    fn bump_streak(&mut self) {
        self.consecutive_failures += 1;
        self.longest_failure_streak = self.longest_failure_streak.max(self.consecutive_failures);
    }

    /// Total number of failed polls.
    pub fn failures(&self) -> u64 {
        self.capture_failures + self.cursor_failures
    }

    /// Fraction of polls that failed (0.0 to 1.0).
    pub fn failure_rate(&self) -> f64 {
        if self.polls == 0 {
            return 0.0;
        }
        self.failures() as f64 / self.polls as f64
    }

    /// Mean poll duration.
    pub fn average_poll_time(&self) -> Duration {
        if self.polls == 0 {
            return Duration::ZERO;
        }
        let nanos = self.total_poll_time.as_nanos() / self.polls as u128;
        Duration::from_nanos(nanos.min(u64::MAX as u128) as u64)
    }

    /// Clear all counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Merge another statistics object into this one.
    ///
    /// Streak and travel continuity are not tracked across the merge.
    pub fn merge(&mut self, other: &PollStatistics) {
        self.polls += other.polls;
        self.live += other.live;
        self.capture_failures += other.capture_failures;
        self.cursor_failures += other.cursor_failures;
        self.longest_failure_streak = self
            .longest_failure_streak
            .max(other.longest_failure_streak);
        self.total_poll_time += other.total_poll_time;
        self.max_poll_time = self.max_poll_time.max(other.max_poll_time);
        self.cursor_distance += other.cursor_distance;
    }

    /// Generate a human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "=== Poll Statistics ===\n\
             Polls: {} ({} live)\n\
             Capture failures: {}\n\
             Cursor failures: {}\n\
             Longest failure streak: {}\n\
             Avg poll time: {:?} (max {:?})\n\
             Cursor travel: {:.0} pixels\n",
            self.polls,
            self.live,
            self.capture_failures,
            self.cursor_failures,
            self.longest_failure_streak,
            self.average_poll_time(),
            self.max_poll_time,
            self.cursor_distance
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn result(x: i32, y: i32, status: SampleStatus) -> SampleResult {
        SampleResult {
            position: ScreenPoint::new(x, y),
            color: Some(Color::BLACK),
            status,
        }
    }

    #[test]
    fn test_statistics_new() {
        let stats = PollStatistics::new();
        assert_eq!(stats.polls, 0);
        assert_eq!(stats.failure_rate(), 0.0);
        assert_eq!(stats.average_poll_time(), Duration::ZERO);
    }

    #[test]
    fn test_outcome_counts_and_streaks() {
        let mut stats = PollStatistics::new();
        let tick = Duration::from_micros(100);

        stats.record(&result(0, 0, SampleStatus::Live), tick);
        stats.record(&result(0, 0, SampleStatus::CaptureFailed), tick);
        stats.record(&result(0, 0, SampleStatus::CursorUnavailable), tick);
        stats.record(&result(0, 0, SampleStatus::CaptureFailed), tick);
        stats.record(&result(0, 0, SampleStatus::Live), tick);
        stats.record(&result(0, 0, SampleStatus::CaptureFailed), tick);

        assert_eq!(stats.polls, 6);
        assert_eq!(stats.live, 2);
        assert_eq!(stats.capture_failures, 3);
        assert_eq!(stats.cursor_failures, 1);
        assert_eq!(stats.longest_failure_streak, 3);
        assert_eq!(stats.consecutive_failures, 1);
        assert!((stats.failure_rate() - 4.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_poll_timing() {
        let mut stats = PollStatistics::new();
        stats.record(&result(0, 0, SampleStatus::Live), Duration::from_micros(100));
        stats.record(&result(0, 0, SampleStatus::Live), Duration::from_micros(300));

        assert_eq!(stats.average_poll_time(), Duration::from_micros(200));
        assert_eq!(stats.max_poll_time, Duration::from_micros(300));
    }

    #[test]
    fn test_cursor_distance_skips_unavailable() {
        let mut stats = PollStatistics::new();
        let tick = Duration::ZERO;

        stats.record(&result(0, 0, SampleStatus::Live), tick);
        stats.record(&result(3, 4, SampleStatus::Live), tick); // 5 pixels
        stats.record(&result(3, 4, SampleStatus::CursorUnavailable), tick);
        stats.record(&result(6, 8, SampleStatus::CaptureFailed), tick); // another 5
        assert!((stats.cursor_distance - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_merge_and_reset() {
        let mut a = PollStatistics::new();
        a.record(&result(0, 0, SampleStatus::Live), Duration::from_micros(50));

        let mut b = PollStatistics::new();
        b.record(&result(0, 0, SampleStatus::CaptureFailed), Duration::from_micros(80));

        a.merge(&b);
        assert_eq!(a.polls, 2);
        assert_eq!(a.capture_failures, 1);
        assert_eq!(a.max_poll_time, Duration::from_micros(80));
        assert!(a.summary().contains("Polls: 2 (1 live)"));

        a.reset();
        assert_eq!(a, PollStatistics::new());
    }
}
