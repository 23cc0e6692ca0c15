//! Windows monitor queries.

use crate::display::{DisplayInfo, Rect};
use crate::error::{Error, Result};
use std::mem::size_of;
use windows::Win32::Foundation::{BOOL, LPARAM, RECT};
use windows::Win32::Graphics::Gdi::{
    EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFO,
};
use windows::Win32::UI::HiDpi::{GetDpiForMonitor, GetDpiForSystem, MDT_EFFECTIVE_DPI};
use windows::Win32::UI::WindowsAndMessaging::{
    GetSystemMetrics, MONITORINFOF_PRIMARY, SM_CXVIRTUALSCREEN, SM_CYVIRTUALSCREEN,
    SM_XVIRTUALSCREEN, SM_YVIRTUALSCREEN,
};

pub fn displays() -> Result<Vec<DisplayInfo>> {
    let mut context = MonitorContext {
        displays: Vec::new(),
        next_id: 1,
    };

    let ok = unsafe {
        EnumDisplayMonitors(
            None,
            None,
            Some(monitor_enum_proc),
            LPARAM(&mut context as *mut _ as isize),
        )
    };

    if ok.as_bool() && !context.displays.is_empty() {
        Ok(context.displays)
    } else {
        Err(Error::Platform("EnumDisplayMonitors failed".into()))
    }
}

pub fn primary_display() -> Result<DisplayInfo> {
    displays()?
        .into_iter()
        .find(|display| display.is_primary)
        .ok_or_else(|| Error::Platform("primary display not found".into()))
}

pub fn virtual_screen() -> Result<Rect> {
    let (x, y, width, height) = unsafe {
        (
            GetSystemMetrics(SM_XVIRTUALSCREEN),
            GetSystemMetrics(SM_YVIRTUALSCREEN),
            GetSystemMetrics(SM_CXVIRTUALSCREEN),
            GetSystemMetrics(SM_CYVIRTUALSCREEN),
        )
    };

    if width <= 0 || height <= 0 {
        return Err(Error::Platform("virtual screen has no extent".into()));
    }
    Ok(Rect::new(x, y, width as u32, height as u32))
}

struct MonitorContext {
    displays: Vec<DisplayInfo>,
    next_id: u32,
}

unsafe extern "system" fn monitor_enum_proc(
    hmonitor: HMONITOR,
    _hdc: HDC,
    _lprc: *mut RECT,
    lparam: LPARAM,
) -> BOOL {
    let context = unsafe { &mut *(lparam.0 as *mut MonitorContext) };
    if let Some(display) = display_info(hmonitor, context.next_id) {
        context.next_id += 1;
        context.displays.push(display);
    }
    BOOL(1)
}

fn display_info(hmonitor: HMONITOR, id: u32) -> Option<DisplayInfo> {
    let mut info = MONITORINFO {
        cbSize: size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };
    if !unsafe { GetMonitorInfoW(hmonitor, &mut info) }.as_bool() {
        log::debug!("GetMonitorInfoW failed for monitor {id}");
        return None;
    }

    let rect = info.rcMonitor;
    Some(DisplayInfo {
        id,
        bounds: Rect::new(
            rect.left,
            rect.top,
            (rect.right - rect.left).max(0) as u32,
            (rect.bottom - rect.top).max(0) as u32,
        ),
        scale_factor: monitor_dpi_scale(hmonitor),
        is_primary: (info.dwFlags & MONITORINFOF_PRIMARY) != 0,
    })
}

fn monitor_dpi_scale(hmonitor: HMONITOR) -> f64 {
    let mut dpi_x: u32 = 0;
    let mut dpi_y: u32 = 0;
    let result = unsafe { GetDpiForMonitor(hmonitor, MDT_EFFECTIVE_DPI, &mut dpi_x, &mut dpi_y) };
    if result.is_ok() && dpi_x > 0 {
        return dpi_x as f64 / 96.0;
    }

    match unsafe { GetDpiForSystem() } {
        0 => 1.0,
        dpi => dpi as f64 / 96.0,
    }
}
