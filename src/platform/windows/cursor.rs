//! Windows cursor position via GetCursorPos.

use crate::display::ScreenPoint;
use crate::error::{Error, Result};
use windows::Win32::Foundation::POINT;
use windows::Win32::UI::WindowsAndMessaging::GetCursorPos;

/// Read the global cursor position.
///
/// Reported in physical pixels when the process is per-monitor DPI aware,
/// which is the space `BitBlt` source offsets are taken in.
pub fn cursor_position() -> Result<ScreenPoint> {
    let mut point = POINT::default();
    unsafe { GetCursorPos(&mut point) }
        .map_err(|e| Error::CursorUnavailable(format!("GetCursorPos failed: {e}")))?;
    Ok(ScreenPoint::new(point.x, point.y))
}
