//! Single-pixel screen sampling.

use crate::color::Color;
use crate::display::ScreenPoint;
use crate::dpi::{CoordinateSpace, DpiContext};
use crate::error::Result;

/// Reads the color of one pixel.
///
/// Implementations must release every resource they acquire before `sample`
/// returns, on success and on failure, so that calling it at a fixed polling
/// rate for the lifetime of the process does not grow resource usage.
pub trait PixelSampler {
    /// Read the color of the pixel at `point`.
    ///
    /// Points outside every monitor may either fail with
    /// [`Error::CaptureFailed`](crate::Error::CaptureFailed) or yield a
    /// background color. Callers treat both as non-fatal.
    fn sample(&self, point: ScreenPoint) -> Result<Color>;

    /// The coordinate space `point` is interpreted in.
    fn coordinate_space(&self) -> CoordinateSpace {
        CoordinateSpace::Physical
    }
}

/// Implement PixelSampler for closures.
impl<F> PixelSampler for F
where
    F: Fn(ScreenPoint) -> Result<Color>,
{
    fn sample(&self, point: ScreenPoint) -> Result<Color> {
        self(point)
    }
}

/// Samples the live desktop through the OS graphics-copy path.
///
/// On Windows each call copies a 1x1 block from the screen device context
/// into a memory bitmap with `BitBlt` and reads it back with `GetDIBits`.
/// This resolves the composited pixel the user sees, which `GetPixel` does
/// not reliably do under DWM composition or non-100% scaling.
#[derive(Debug, Clone, Copy)]
pub struct ScreenSampler {
    space: CoordinateSpace,
}

impl ScreenSampler {
    /// Create a sampler for the coordinate space established by `dpi`.
    pub fn new(dpi: &DpiContext) -> Self {
        Self {
            space: dpi.coordinate_space(),
        }
    }
}

impl PixelSampler for ScreenSampler {
    fn sample(&self, point: ScreenPoint) -> Result<Color> {
        crate::platform::capture_pixel(point)
    }

    fn coordinate_space(&self) -> CoordinateSpace {
        self.space
    }
}

/// Convenience function to sample one pixel of the live desktop.
///
/// Initializes process DPI awareness on first use.
///
/// # Example
///
/// ```no_run
/// use pixprobe::{sample, ScreenPoint};
///
/// let color = sample(ScreenPoint::new(100, 100)).expect("capture failed");
/// println!("{color} = {:?}", color.channels());
/// ```
pub fn sample(point: ScreenPoint) -> Result<Color> {
    let dpi = DpiContext::initialize()?;
    ScreenSampler::new(&dpi).sample(point)
}
