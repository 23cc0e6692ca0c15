//! Fallbacks for targets without a capture backend.

use crate::color::Color;
use crate::display::{DisplayInfo, Rect, ScreenPoint};
use crate::dpi::DpiAwareness;
use crate::error::{Error, Result};

const REASON: &str = "screen sampling is only implemented for Windows";

pub fn declare_dpi_awareness() -> Option<DpiAwareness> {
    None
}

pub fn capture_pixel(_point: ScreenPoint) -> Result<Color> {
    Err(Error::NotSupported(REASON.into()))
}

pub fn cursor_position() -> Result<ScreenPoint> {
    Err(Error::NotSupported(REASON.into()))
}

pub fn displays() -> Result<Vec<DisplayInfo>> {
    Err(Error::NotSupported(REASON.into()))
}

pub fn primary_display() -> Result<DisplayInfo> {
    Err(Error::NotSupported(REASON.into()))
}

pub fn virtual_screen() -> Result<Rect> {
    Err(Error::NotSupported(REASON.into()))
}
