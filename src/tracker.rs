//! Cursor tracking: one cursor read and one pixel sample per tick.

use crate::color::Color;
use crate::cursor::{CursorSource, SystemCursor};
use crate::display::ScreenPoint;
use crate::dpi::DpiContext;
use crate::error::{Error, Result};
use crate::sampler::{PixelSampler, ScreenSampler};
use crate::scheduler::Scheduler;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::ops::ControlFlow;
#[cfg(feature = "statistics")]
use std::time::Instant;

/// Outcome of a single poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SampleStatus {
    /// Position and color were both read this tick.
    Live,
    /// The position is fresh; the pixel could not be captured.
    CaptureFailed,
    /// The cursor position could not be read; nothing was sampled.
    CursorUnavailable,
}

/// A position and the color beneath it, as produced by one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SampleResult {
    /// Cursor position (the last known one when the read failed).
    pub position: ScreenPoint,
    /// Last successfully sampled color, `None` until the first success.
    pub color: Option<Color>,
    /// What happened this tick.
    pub status: SampleStatus,
}

impl SampleResult {
    /// Whether both values were read during this tick.
    pub fn is_live(&self) -> bool {
        self.status == SampleStatus::Live
    }

    /// The color only if it was sampled during this tick.
    pub fn live_color(&self) -> Option<Color> {
        if self.is_live() { self.color } else { None }
    }
}

/// Tracker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackerState {
    /// No tick in flight.
    Idle,
    /// A tick is in progress.
    Sampling,
}

/// Pairs a cursor source with a pixel sampler.
///
/// Failures of either are absorbed: [`poll`](Self::poll) always returns a
/// [`SampleResult`], substituting the last known position and color.
///
/// # Example
///
/// ```no_run
/// use pixprobe::{CursorTracker, DpiContext};
///
/// let dpi = DpiContext::initialize()?;
/// let mut tracker = CursorTracker::system(&dpi)?;
/// let result = tracker.poll();
/// match result.color {
///     Some(color) => println!("{} -> {color}", result.position),
///     None => println!("{} -> unavailable", result.position),
/// }
/// # Ok::<(), pixprobe::Error>(())
/// ```
pub struct CursorTracker<C, S> {
    cursor: C,
    sampler: S,
    dpi: DpiContext,
    state: TrackerState,
    position: ScreenPoint,
    color: Option<Color>,
    last: Option<SampleResult>,
    #[cfg(feature = "statistics")]
    statistics: crate::statistics::PollStatistics,
}

impl CursorTracker<SystemCursor, ScreenSampler> {
    /// Track the OS cursor over the live desktop.
    pub fn system(dpi: &DpiContext) -> Result<Self> {
        Self::new(*dpi, SystemCursor::new(dpi), ScreenSampler::new(dpi))
    }
}

impl<C, S> CursorTracker<C, S>
where
    C: CursorSource,
    S: PixelSampler,
{
    /// Create a tracker.
    ///
    /// Fails with [`Error::CoordinateSpaceMismatch`] unless the cursor source,
    /// the sampler and the process DPI context agree on the coordinate space.
    pub fn new(dpi: DpiContext, cursor: C, sampler: S) -> Result<Self> {
        let expected = dpi.coordinate_space();
        let cursor_space = cursor.coordinate_space();
        let sampler_space = sampler.coordinate_space();
        if cursor_space != expected || sampler_space != expected {
            return Err(Error::CoordinateSpaceMismatch {
                expected,
                cursor: cursor_space,
                sampler: sampler_space,
            });
        }

        Ok(Self {
            cursor,
            sampler,
            dpi,
            state: TrackerState::Idle,
            position: ScreenPoint::ORIGIN,
            color: None,
            last: None,
            #[cfg(feature = "statistics")]
            statistics: crate::statistics::PollStatistics::new(),
        })
    }

    /// Read the cursor, sample the pixel beneath it and return both.
    ///
    /// Never fails: a failed cursor read keeps the last known position and
    /// skips sampling, a failed capture keeps the last good color.
    pub fn poll(&mut self) -> SampleResult {
        self.state = TrackerState::Sampling;
        #[cfg(feature = "statistics")]
        let started = Instant::now();

        let status = match self.cursor.position() {
            Ok(position) => {
                self.position = position;
                // The point goes to the sampler untouched: both sides share
                // the coordinate space checked in `new`.
                match self.sampler.sample(position) {
                    Ok(color) => {
                        self.color = Some(color);
                        SampleStatus::Live
                    }
                    Err(e) => {
                        self.log_failure(SampleStatus::CaptureFailed, &e);
                        SampleStatus::CaptureFailed
                    }
                }
            }
            Err(e) => {
                self.log_failure(SampleStatus::CursorUnavailable, &e);
                SampleStatus::CursorUnavailable
            }
        };

        let result = SampleResult {
            position: self.position,
            color: self.color,
            status,
        };

        if status == SampleStatus::Live
            && self.last.is_some_and(|last| last.status != SampleStatus::Live)
        {
            log::info!("sampling recovered at {}", result.position);
        }
        log::trace!(
            "tick {} -> {}",
            result.position,
            result
                .color
                .map_or_else(|| "unavailable".to_string(), |c| c.to_hex())
        );

        #[cfg(feature = "statistics")]
        self.statistics.record(&result, started.elapsed());

        self.last = Some(result);
        self.state = TrackerState::Idle;
        result
    }

    /// Poll once per scheduler tick and hand each result to `render`.
    ///
    /// Runs until `render` returns [`ControlFlow::Break`] or the scheduler
    /// is stopped.
    pub fn drive<Sch, R>(&mut self, scheduler: &Sch, mut render: R) -> Result<()>
    where
        Sch: Scheduler,
        R: FnMut(&SampleResult) -> ControlFlow<()>,
    {
        scheduler.run(|| {
            let result = self.poll();
            render(&result)
        })
    }

    /// Current state.
    pub fn state(&self) -> TrackerState {
        self.state
    }

    /// The most recent poll result.
    pub fn last_result(&self) -> Option<SampleResult> {
        self.last
    }

    /// The DPI context the tracker was built for.
    pub fn dpi(&self) -> &DpiContext {
        &self.dpi
    }

    /// Poll counters collected so far.
    #[cfg(feature = "statistics")]
    pub fn statistics(&self) -> &crate::statistics::PollStatistics {
        &self.statistics
    }

    /// Consume the tracker, returning its cursor source and sampler.
    pub fn into_parts(self) -> (C, S) {
        (self.cursor, self.sampler)
    }

    // Log the first failure of a kind loudly, then drop to debug so a cursor
    // parked over a protected surface does not flood the log every tick.
    fn log_failure(&self, status: SampleStatus, error: &Error) {
        let repeated = self.last.is_some_and(|last| last.status == status);
        if repeated {
            log::debug!("{status:?} at {}: {error}", self.position);
        } else if error.is_transient() {
            log::warn!("{status:?} at {}: {error}", self.position);
        } else {
            log::error!("{status:?} at {}: {error}; will keep retrying", self.position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::Rect;
    use crate::dpi::{CoordinateSpace, DpiAwareness};
    use crate::synthetic::{ScriptedCursor, SyntheticScreen};
    use std::cell::{Cell, RefCell};

    const RED: Color = Color::new(255, 0, 0);
    const GREY: Color = Color::new(40, 40, 40);

    fn dpi() -> DpiContext {
        DpiContext::assume(DpiAwareness::PerMonitorV2)
    }

    fn screen() -> SyntheticScreen {
        let mut screen = SyntheticScreen::new(Rect::new(-1920, 0, 3840, 1080), GREY);
        screen.fill(Rect::new(100, 100, 50, 50), RED);
        screen
    }

    /// Fails on demand, otherwise delegates.
    struct Flaky<S> {
        inner: S,
        failing: Cell<bool>,
    }

    impl<S: PixelSampler> PixelSampler for Flaky<S> {
        fn sample(&self, point: ScreenPoint) -> Result<Color> {
            if self.failing.get() {
                Err(Error::CaptureFailed("injected".into()))
            } else {
                self.inner.sample(point)
            }
        }
    }

    /// Records every point it is asked to sample.
    struct Recording<S> {
        inner: S,
        points: RefCell<Vec<ScreenPoint>>,
    }

    impl<S: PixelSampler> PixelSampler for Recording<S> {
        fn sample(&self, point: ScreenPoint) -> Result<Color> {
            self.points.borrow_mut().push(point);
            self.inner.sample(point)
        }
    }

    #[test]
    fn test_poll_samples_under_cursor() {
        let cursor = ScriptedCursor::fixed(ScreenPoint::new(120, 130));
        let mut tracker = CursorTracker::new(dpi(), cursor, screen()).unwrap();

        let result = tracker.poll();
        assert_eq!(result.position, ScreenPoint::new(120, 130));
        assert_eq!(result.color, Some(RED));
        assert!(result.is_live());
        assert_eq!(tracker.state(), TrackerState::Idle);
        assert_eq!(tracker.last_result(), Some(result));
    }

    #[test]
    fn test_capture_failure_keeps_previous_color() {
        let cursor = ScriptedCursor::new([
            Ok(ScreenPoint::new(110, 110)),
            Ok(ScreenPoint::new(500, 500)),
        ]);
        let sampler = Flaky {
            inner: screen(),
            failing: Cell::new(false),
        };
        let mut tracker = CursorTracker::new(dpi(), cursor, sampler).unwrap();

        assert_eq!(tracker.poll().color, Some(RED));

        tracker.sampler.failing.set(true);
        let result = tracker.poll();
        assert_eq!(result.status, SampleStatus::CaptureFailed);
        assert_eq!(result.position, ScreenPoint::new(500, 500));
        assert_eq!(result.color, Some(RED));
        assert_eq!(result.live_color(), None);
        assert_eq!(tracker.state(), TrackerState::Idle);

        // Polling continues and recovers once capture works again.
        tracker.sampler.failing.set(false);
        let result = tracker.poll();
        assert!(result.is_live());
        assert_eq!(result.color, Some(GREY));
    }

    #[test]
    fn test_capture_failure_before_any_success() {
        let cursor = ScriptedCursor::fixed(ScreenPoint::new(10, 10));
        let sampler =
            |_: ScreenPoint| -> Result<Color> { Err(Error::CaptureFailed("injected".into())) };
        let mut tracker = CursorTracker::new(dpi(), cursor, sampler).unwrap();

        for _ in 0..3 {
            let result = tracker.poll();
            assert_eq!(result.status, SampleStatus::CaptureFailed);
            assert_eq!(result.color, None);
        }
    }

    #[test]
    fn test_cursor_failure_retains_last_position() {
        let cursor = ScriptedCursor::new([
            Ok(ScreenPoint::new(120, 120)),
            Err(Error::CursorUnavailable("secure desktop".into())),
        ]);
        let sampler = Recording {
            inner: screen(),
            points: RefCell::new(Vec::new()),
        };
        let mut tracker = CursorTracker::new(dpi(), cursor, sampler).unwrap();

        tracker.poll();
        let result = tracker.poll();
        assert_eq!(result.status, SampleStatus::CursorUnavailable);
        assert_eq!(result.position, ScreenPoint::new(120, 120));
        assert_eq!(result.color, Some(RED));

        // No sample is taken without a fresh position.
        assert_eq!(tracker.sampler.points.borrow().len(), 1);
    }

    #[test]
    fn test_cursor_failure_on_first_poll() {
        let cursor =
            || -> Result<ScreenPoint> { Err(Error::CursorUnavailable("no cursor".into())) };
        let mut tracker = CursorTracker::new(dpi(), cursor, screen()).unwrap();

        let result = tracker.poll();
        assert_eq!(result.status, SampleStatus::CursorUnavailable);
        assert_eq!(result.position, ScreenPoint::ORIGIN);
        assert_eq!(result.color, None);
    }

    #[test]
    fn test_point_reaches_sampler_unchanged() {
        let points = [
            ScreenPoint::new(101, 149),
            ScreenPoint::new(-1920, 0),
            ScreenPoint::new(-1, 1079),
            ScreenPoint::new(149, 100),
        ];
        let cursor = ScriptedCursor::new(points.map(Ok));
        let sampler = Recording {
            inner: screen(),
            points: RefCell::new(Vec::new()),
        };
        let mut tracker = CursorTracker::new(dpi(), cursor, sampler).unwrap();

        let results: Vec<_> = (0..points.len()).map(|_| tracker.poll()).collect();

        let (_, sampler) = tracker.into_parts();
        assert_eq!(sampler.points.into_inner(), points.to_vec());
        assert_eq!(results[0].color, Some(RED));
        assert_eq!(results[1].color, Some(GREY));
        assert_eq!(results[3].color, Some(RED));
        for (result, point) in results.iter().zip(points) {
            assert_eq!(result.position, point);
        }
    }

    #[test]
    fn test_coordinate_space_mismatch_rejected() {
        let cursor = ScriptedCursor::fixed(ScreenPoint::ORIGIN)
            .with_coordinate_space(CoordinateSpace::Logical);
        let err = CursorTracker::new(dpi(), cursor, screen())
            .err()
            .expect("mismatch must be rejected");
        assert!(matches!(
            err,
            Error::CoordinateSpaceMismatch {
                expected: CoordinateSpace::Physical,
                cursor: CoordinateSpace::Logical,
                sampler: CoordinateSpace::Physical,
            }
        ));

        // A DPI-unaware process must not be paired with physical sources.
        let cursor = ScriptedCursor::fixed(ScreenPoint::ORIGIN);
        let unaware = DpiContext::assume(DpiAwareness::Unaware);
        assert!(CursorTracker::new(unaware, cursor, screen()).is_err());
    }

    #[cfg(feature = "statistics")]
    #[test]
    fn test_poll_records_statistics() {
        let cursor = ScriptedCursor::new([
            Ok(ScreenPoint::new(110, 110)),
            Ok(ScreenPoint::new(113, 114)),
            Err(Error::CursorUnavailable("secure desktop".into())),
            Ok(ScreenPoint::new(120, 120)),
        ]);
        let sampler = Flaky {
            inner: screen(),
            failing: Cell::new(false),
        };
        let mut tracker = CursorTracker::new(dpi(), cursor, sampler).unwrap();

        assert!(tracker.poll().is_live());
        tracker.sampler.failing.set(true);
        assert_eq!(tracker.poll().status, SampleStatus::CaptureFailed);
        assert_eq!(tracker.poll().status, SampleStatus::CursorUnavailable);
        tracker.sampler.failing.set(false);
        assert!(tracker.poll().is_live());

        let stats = tracker.statistics();
        assert_eq!(stats.polls, 4);
        assert_eq!(stats.live, 2);
        assert_eq!(stats.capture_failures, 1);
        assert_eq!(stats.cursor_failures, 1);
        assert_eq!(stats.failures(), 2);
        assert_eq!(stats.longest_failure_streak, 2);
        assert_eq!(stats.consecutive_failures, 0);
        // (110,110) -> (113,114) is 5 pixels; the unavailable tick adds none.
        assert!(stats.cursor_distance > 5.0);
        assert!(stats.max_poll_time >= stats.average_poll_time());
    }

    #[test]
    fn test_drive_stops_on_break() {
        use crate::scheduler::IntervalScheduler;
        use std::time::Duration;

        let cursor = ScriptedCursor::fixed(ScreenPoint::new(125, 125));
        let mut tracker = CursorTracker::new(dpi(), cursor, screen()).unwrap();
        let scheduler = IntervalScheduler::new(Duration::from_millis(1));

        let mut seen = Vec::new();
        tracker
            .drive(&scheduler, |result| {
                seen.push(*result);
                if seen.len() == 3 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
            .unwrap();

        assert_eq!(seen.len(), 3);
        assert!(seen.iter().all(|r| r.color == Some(RED)));
    }
}
