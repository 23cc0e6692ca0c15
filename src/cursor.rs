//! Global cursor position sources.

use crate::display::ScreenPoint;
use crate::dpi::{CoordinateSpace, DpiContext};
use crate::error::Result;

/// Reports the current global cursor position.
pub trait CursorSource {
    /// Read the cursor position in virtual-screen coordinates.
    fn position(&self) -> Result<ScreenPoint>;

    /// The coordinate space positions are reported in.
    fn coordinate_space(&self) -> CoordinateSpace {
        CoordinateSpace::Physical
    }
}

/// Implement CursorSource for closures.
impl<F> CursorSource for F
where
    F: Fn() -> Result<ScreenPoint>,
{
    fn position(&self) -> Result<ScreenPoint> {
        self()
    }
}

/// The OS cursor.
#[derive(Debug, Clone, Copy)]
pub struct SystemCursor {
    space: CoordinateSpace,
}

impl SystemCursor {
    /// Create a cursor source for the coordinate space established by `dpi`.
    pub fn new(dpi: &DpiContext) -> Self {
        Self {
            space: dpi.coordinate_space(),
        }
    }
}

impl CursorSource for SystemCursor {
    fn position(&self) -> Result<ScreenPoint> {
        crate::platform::cursor_position()
    }

    fn coordinate_space(&self) -> CoordinateSpace {
        self.space
    }
}

/// Get the current cursor position.
///
/// Initializes process DPI awareness on first use so the position is in
/// the same space [`sample`](crate::sample) expects.
pub fn cursor_position() -> Result<ScreenPoint> {
    let dpi = DpiContext::initialize()?;
    SystemCursor::new(&dpi).position()
}
