//! Screen geometry and display queries.

use crate::error::Result;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in virtual-screen coordinates.
///
/// The virtual screen spans all monitors with its origin at the primary
/// display's top-left corner, so either coordinate may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScreenPoint {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl ScreenPoint {
    /// The primary display's top-left corner.
    pub const ORIGIN: ScreenPoint = ScreenPoint::new(0, 0);

    /// Create a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for ScreenPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for ScreenPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A rectangle in virtual-screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// Left coordinate.
    pub x: i32,
    /// Top coordinate.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check whether a point is inside this rectangle (right/bottom edges excluded).
    pub fn contains(&self, point: ScreenPoint) -> bool {
        let (x, y) = (point.x as i64, point.y as i64);
        let (left, top) = (self.x as i64, self.y as i64);
        x >= left && y >= top && x < left + self.width as i64 && y < top + self.height as i64
    }

    /// Whether the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Information about a display/monitor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayInfo {
    /// Enumeration-order identifier (best-effort, starts at 1).
    pub id: u32,
    /// Display bounds in virtual-screen coordinates.
    pub bounds: Rect,
    /// Scale factor relative to 96 DPI.
    pub scale_factor: f64,
    /// Whether this is the primary display.
    pub is_primary: bool,
}

/// List all available displays.
pub fn displays() -> Result<Vec<DisplayInfo>> {
    crate::platform::displays()
}

/// Get the primary display.
pub fn primary_display() -> Result<DisplayInfo> {
    crate::platform::primary_display()
}

/// Find the display containing a point.
pub fn display_at_point(point: ScreenPoint) -> Result<Option<DisplayInfo>> {
    Ok(displays()?
        .into_iter()
        .find(|display| display.bounds.contains(point)))
}

/// The bounding rectangle of all monitors.
pub fn virtual_screen() -> Result<Rect> {
    crate::platform::virtual_screen()
}
