//! In-memory display and cursor for headless use.
//!
//! [`SyntheticScreen`] and [`ScriptedCursor`] stand in for the desktop and the
//! OS cursor so the tracker, schedulers and front-ends can run without a
//! graphics session.
//!
//! # Example
//!
//! ```
//! use pixprobe::synthetic::{ScriptedCursor, SyntheticScreen};
//! use pixprobe::{Color, CursorTracker, DpiAwareness, DpiContext, Rect, ScreenPoint};
//!
//! let mut screen = SyntheticScreen::new(Rect::new(0, 0, 800, 600), Color::WHITE);
//! screen.fill(Rect::new(10, 10, 20, 20), Color::new(255, 0, 0));
//!
//! let dpi = DpiContext::assume(DpiAwareness::PerMonitorV2);
//! let cursor = ScriptedCursor::fixed(ScreenPoint::new(15, 15));
//! let mut tracker = CursorTracker::new(dpi, cursor, screen).unwrap();
//!
//! assert_eq!(tracker.poll().color, Some(Color::new(255, 0, 0)));
//! ```

use crate::color::Color;
use crate::cursor::CursorSource;
use crate::display::{Rect, ScreenPoint};
use crate::dpi::CoordinateSpace;
use crate::error::{Error, Result};
use crate::sampler::PixelSampler;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

/// A bounded surface with a background color and painted rectangles.
#[derive(Debug, Clone)]
pub struct SyntheticScreen {
    bounds: Rect,
    background: Color,
    fills: Vec<(Rect, Color)>,
    space: CoordinateSpace,
    samples: Cell<u64>,
}

impl SyntheticScreen {
    /// Create a surface covering `bounds`, filled with `background`.
    pub fn new(bounds: Rect, background: Color) -> Self {
        Self {
            bounds,
            background,
            fills: Vec::new(),
            space: CoordinateSpace::Physical,
            samples: Cell::new(0),
        }
    }

    /// Paint a solid rectangle. Later fills cover earlier ones.
    pub fn fill(&mut self, rect: Rect, color: Color) -> &mut Self {
        self.fills.push((rect, color));
        self
    }

    /// Interpret points in a different coordinate space.
    pub fn with_coordinate_space(mut self, space: CoordinateSpace) -> Self {
        self.space = space;
        self
    }

    /// The surface bounds.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Number of `sample` calls served so far.
    pub fn sample_count(&self) -> u64 {
        self.samples.get()
    }

    /// The color at `point`, or `None` outside the bounds.
    pub fn pixel(&self, point: ScreenPoint) -> Option<Color> {
        if !self.bounds.contains(point) {
            return None;
        }
        let color = self
            .fills
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(point))
            .map_or(self.background, |(_, color)| *color);
        Some(color)
    }
}

impl PixelSampler for SyntheticScreen {
    fn sample(&self, point: ScreenPoint) -> Result<Color> {
        self.samples.set(self.samples.get() + 1);
        self.pixel(point).ok_or_else(|| {
            Error::CaptureFailed(format!("{point} is outside the synthetic screen"))
        })
    }

    fn coordinate_space(&self) -> CoordinateSpace {
        self.space
    }
}

/// A cursor that replays a fixed script of positions and failures.
///
/// Entries are consumed one per read; the final entry repeats forever.
#[derive(Debug)]
pub struct ScriptedCursor {
    script: RefCell<VecDeque<Result<ScreenPoint>>>,
    space: CoordinateSpace,
}

impl ScriptedCursor {
    /// Replay `script`. An empty script always reports the cursor unavailable.
    pub fn new(script: impl IntoIterator<Item = Result<ScreenPoint>>) -> Self {
        Self {
            script: RefCell::new(script.into_iter().collect()),
            space: CoordinateSpace::Physical,
        }
    }

    /// A cursor that never moves.
    pub fn fixed(point: ScreenPoint) -> Self {
        Self::new([Ok(point)])
    }

    /// Report positions in a different coordinate space.
    pub fn with_coordinate_space(mut self, space: CoordinateSpace) -> Self {
        self.space = space;
        self
    }

    /// Append entries to the script.
    pub fn push(&self, entry: Result<ScreenPoint>) {
        self.script.borrow_mut().push_back(entry);
    }
}

impl CursorSource for ScriptedCursor {
    fn position(&self) -> Result<ScreenPoint> {
        let mut script = self.script.borrow_mut();
        let entry = if script.len() > 1 {
            script.pop_front()
        } else {
            script.front().map(replay)
        };
        entry.unwrap_or_else(|| Err(Error::CursorUnavailable("cursor script is empty".into())))
    }

    fn coordinate_space(&self) -> CoordinateSpace {
        self.space
    }
}

// `Error` is not `Clone`; rebuild the transient variants when repeating.
fn replay(entry: &Result<ScreenPoint>) -> Result<ScreenPoint> {
    match entry {
        Ok(point) => Ok(*point),
        Err(Error::CursorUnavailable(reason)) => Err(Error::CursorUnavailable(reason.clone())),
        Err(Error::CaptureFailed(reason)) => Err(Error::CaptureFailed(reason.clone())),
        Err(e) => Err(Error::CursorUnavailable(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_red_rectangle() {
        let mut screen = SyntheticScreen::new(Rect::new(0, 0, 640, 480), Color::BLACK);
        screen.fill(Rect::new(200, 100, 40, 30), Color::new(255, 0, 0));

        assert_eq!(
            screen.sample(ScreenPoint::new(220, 115)).unwrap(),
            Color::new(255, 0, 0)
        );
        assert_eq!(
            screen.sample(ScreenPoint::new(240, 115)).unwrap(),
            Color::BLACK
        );
        assert_eq!(screen.sample_count(), 2);
    }

    #[test]
    fn test_later_fill_wins() {
        let mut screen = SyntheticScreen::new(Rect::new(0, 0, 100, 100), Color::BLACK);
        screen
            .fill(Rect::new(0, 0, 50, 50), Color::new(255, 0, 0))
            .fill(Rect::new(25, 25, 50, 50), Color::new(0, 0, 255));

        assert_eq!(screen.pixel(ScreenPoint::new(10, 10)), Some(Color::new(255, 0, 0)));
        assert_eq!(screen.pixel(ScreenPoint::new(30, 30)), Some(Color::new(0, 0, 255)));
        assert_eq!(screen.pixel(ScreenPoint::new(70, 70)), Some(Color::new(0, 0, 255)));
    }

    #[test]
    fn test_out_of_bounds_fails_capture() {
        let screen = SyntheticScreen::new(Rect::new(-100, -100, 200, 200), Color::WHITE);
        assert_eq!(screen.sample(ScreenPoint::new(-100, -100)).unwrap(), Color::WHITE);
        assert!(matches!(
            screen.sample(ScreenPoint::new(100, 0)),
            Err(Error::CaptureFailed(_))
        ));
    }

    #[test]
    fn test_sampling_is_deterministic() {
        let mut screen = SyntheticScreen::new(Rect::new(0, 0, 10, 10), Color::BLACK);
        screen.fill(Rect::new(2, 2, 3, 3), Color::new(12, 34, 56));
        let point = ScreenPoint::new(3, 3);
        assert_eq!(screen.sample(point).unwrap(), screen.sample(point).unwrap());
    }

    #[test]
    fn test_script_replays_then_repeats_last() {
        let cursor = ScriptedCursor::new([
            Ok(ScreenPoint::new(1, 1)),
            Err(Error::CursorUnavailable("gone".into())),
            Ok(ScreenPoint::new(2, 2)),
        ]);

        assert_eq!(cursor.position().unwrap(), ScreenPoint::new(1, 1));
        assert!(cursor.position().is_err());
        assert_eq!(cursor.position().unwrap(), ScreenPoint::new(2, 2));
        assert_eq!(cursor.position().unwrap(), ScreenPoint::new(2, 2));

        cursor.push(Ok(ScreenPoint::new(3, 3)));
        assert_eq!(cursor.position().unwrap(), ScreenPoint::new(2, 2));
        assert_eq!(cursor.position().unwrap(), ScreenPoint::new(3, 3));
    }

    #[test]
    fn test_repeated_failure_stays_failed() {
        let cursor = ScriptedCursor::new([Err(Error::CursorUnavailable("locked".into()))]);
        for _ in 0..3 {
            assert!(matches!(cursor.position(), Err(Error::CursorUnavailable(_))));
        }

        let empty = ScriptedCursor::new([]);
        assert!(empty.position().is_err());
    }
}
