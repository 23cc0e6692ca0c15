//! Windows DPI awareness declaration.

use crate::dpi::DpiAwareness;
use windows::Win32::UI::HiDpi::{
    AreDpiAwarenessContextsEqual, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE,
    DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, DPI_AWARENESS_PER_MONITOR_AWARE,
    DPI_AWARENESS_SYSTEM_AWARE, GetAwarenessFromDpiAwarenessContext,
    GetThreadDpiAwarenessContext, SetProcessDpiAwarenessContext,
};

/// Declare per-monitor v2 awareness, falling back to v1.
///
/// The OS only accepts the first declaration for a process (a manifest
/// counts), so a refusal is not an error: whatever awareness is in effect
/// afterwards is reported.
pub fn declare_dpi_awareness() -> Option<DpiAwareness> {
    // Try V2 first (Windows 10 1703+)
    match unsafe { SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2) } {
        Ok(()) => return Some(DpiAwareness::PerMonitorV2),
        Err(e) => log::debug!("SetProcessDpiAwarenessContext(V2) refused: {e}"),
    }

    if current_awareness() == DpiAwareness::Unaware {
        // Fall back to V1
        if let Err(e) =
            unsafe { SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE) }
        {
            log::debug!("SetProcessDpiAwarenessContext(V1) refused: {e}");
        }
    }

    Some(current_awareness())
}

fn current_awareness() -> DpiAwareness {
    let context = unsafe { GetThreadDpiAwarenessContext() };
    if unsafe { AreDpiAwarenessContextsEqual(context, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2) }
        .as_bool()
    {
        return DpiAwareness::PerMonitorV2;
    }

    let awareness = unsafe { GetAwarenessFromDpiAwarenessContext(context) };
    if awareness == DPI_AWARENESS_PER_MONITOR_AWARE {
        DpiAwareness::PerMonitor
    } else if awareness == DPI_AWARENESS_SYSTEM_AWARE {
        DpiAwareness::System
    } else {
        DpiAwareness::Unaware
    }
}
