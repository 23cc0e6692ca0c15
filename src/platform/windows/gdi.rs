//! Single-pixel capture with BitBlt + GetDIBits.
//!
//! `GetPixel` on the screen DC returns stale or wrong values under some
//! driver, compositor and scaling combinations. Copying a 1x1 block into a
//! memory bitmap makes DWM resolve the composited pixel, and reading the
//! bitmap back as a device-independent bitmap gives a fixed byte layout.
//!
//! Every GDI object lives in a guard that releases it on drop. Locals drop in
//! reverse declaration order, which is also the order GDI requires: deselect
//! the bitmap, delete it, delete the memory DC, release the screen DC.

use crate::color::Color;
use crate::display::ScreenPoint;
use crate::error::{Error, Result};
use std::mem::size_of;
use windows::Win32::Graphics::Gdi::{
    BI_RGB, BITMAPINFO, BITMAPINFOHEADER, BitBlt, CreateCompatibleBitmap, CreateCompatibleDC,
    DIB_RGB_COLORS, DeleteDC, DeleteObject, GetDC, GetDIBits, HBITMAP, HDC, HGDIOBJ, ReleaseDC,
    SRCCOPY, SelectObject,
};

/// Copy the pixel at `point` off the screen and return it as RGB.
pub fn capture_pixel(point: ScreenPoint) -> Result<Color> {
    let screen = ScreenDc::acquire()?;
    let memory = MemoryDc::compatible_with(&screen)?;
    let bitmap = CompatibleBitmap::new(&screen, 1, 1)?;

    {
        let _selection = Selection::select(&memory, &bitmap)?;
        unsafe {
            BitBlt(
                memory.0,
                0,
                0,
                1,
                1,
                Some(screen.0),
                point.x,
                point.y,
                SRCCOPY,
            )
        }
        .map_err(|e| Error::CaptureFailed(format!("BitBlt at {point} failed: {e}")))?;
    }

    // GetDIBits requires the bitmap to be out of any DC, hence the scope above.
    let pixel = read_pixel(&screen, &bitmap)?;
    Ok(Color::from_bgra(pixel))
}

/// Read the single pixel of `bitmap` as 32-bit BGRA.
fn read_pixel(screen: &ScreenDc, bitmap: &CompatibleBitmap) -> Result<[u8; 4]> {
    let mut info = BITMAPINFO {
        bmiHeader: BITMAPINFOHEADER {
            biSize: size_of::<BITMAPINFOHEADER>() as u32,
            biWidth: 1,
            biHeight: -1, // top-down
            biPlanes: 1,
            biBitCount: 32,
            biCompression: BI_RGB.0,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut pixel = [0u8; 4];

    let lines = unsafe {
        GetDIBits(
            screen.0,
            bitmap.0,
            0,
            1,
            Some(pixel.as_mut_ptr().cast()),
            &mut info,
            DIB_RGB_COLORS,
        )
    };
    if lines != 1 {
        return Err(Error::CaptureFailed(format!(
            "GetDIBits copied {lines} scan lines"
        )));
    }
    Ok(pixel)
}

/// The whole-screen device context from `GetDC(NULL)`.
struct ScreenDc(HDC);

impl ScreenDc {
    fn acquire() -> Result<Self> {
        let hdc = unsafe { GetDC(None) };
        if hdc.0.is_null() {
            return Err(Error::CaptureFailed("GetDC(NULL) returned no context".into()));
        }
        Ok(Self(hdc))
    }
}

impl Drop for ScreenDc {
    fn drop(&mut self) {
        if unsafe { ReleaseDC(None, self.0) } == 0 {
            log::error!("ReleaseDC failed; screen DC leaked");
        }
    }
}

/// An in-memory device context.
struct MemoryDc(HDC);

impl MemoryDc {
    fn compatible_with(screen: &ScreenDc) -> Result<Self> {
        let hdc = unsafe { CreateCompatibleDC(Some(screen.0)) };
        if hdc.0.is_null() {
            return Err(Error::CaptureFailed("CreateCompatibleDC failed".into()));
        }
        Ok(Self(hdc))
    }
}

impl Drop for MemoryDc {
    fn drop(&mut self) {
        if !unsafe { DeleteDC(self.0) }.as_bool() {
            log::error!("DeleteDC failed; memory DC leaked");
        }
    }
}

/// A bitmap in the screen's pixel format.
struct CompatibleBitmap(HBITMAP);

impl CompatibleBitmap {
    fn new(screen: &ScreenDc, width: i32, height: i32) -> Result<Self> {
        let bitmap = unsafe { CreateCompatibleBitmap(screen.0, width, height) };
        if bitmap.0.is_null() {
            return Err(Error::CaptureFailed("CreateCompatibleBitmap failed".into()));
        }
        Ok(Self(bitmap))
    }
}

impl Drop for CompatibleBitmap {
    fn drop(&mut self) {
        if !unsafe { DeleteObject(HGDIOBJ(self.0.0)) }.as_bool() {
            log::error!("DeleteObject failed; bitmap leaked");
        }
    }
}

/// A bitmap selected into a memory DC; the previous object is restored on drop.
///
/// Borrows both so neither can be released while the selection is live.
struct Selection<'a> {
    dc: &'a MemoryDc,
    previous: HGDIOBJ,
    _bitmap: &'a CompatibleBitmap,
}

impl<'a> Selection<'a> {
    fn select(dc: &'a MemoryDc, bitmap: &'a CompatibleBitmap) -> Result<Self> {
        let previous = unsafe { SelectObject(dc.0, HGDIOBJ(bitmap.0.0)) };
        // NULL or HGDI_ERROR
        if previous.0.is_null() || previous.0 as isize == -1 {
            return Err(Error::CaptureFailed("SelectObject failed".into()));
        }
        Ok(Self {
            dc,
            previous,
            _bitmap: bitmap,
        })
    }
}

impl Drop for Selection<'_> {
    fn drop(&mut self) {
        unsafe {
            SelectObject(self.dc.0, self.previous);
        }
    }
}
