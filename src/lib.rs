//! # pixprobe
//!
//! Read the mouse cursor position and the color of the screen pixel beneath
//! it, on a fixed schedule, with correct coordinates on mixed-DPI setups.
//!
//! ## Features
//!
//! - Per-monitor v2 DPI awareness declared once per process
//! - Composited pixel capture (`BitBlt` into a 1x1 memory bitmap, read back
//!   with `GetDIBits`) instead of `GetPixel`
//! - Every GDI handle released on every path, including failures
//! - Polling that never fails: the last good position and color are kept
//! - Pluggable schedulers, cursor sources and samplers
//!
//! ## Quick Start
//!
//! ```no_run
//! use pixprobe::{Config, CursorTracker, DpiContext, IntervalScheduler};
//! use std::ops::ControlFlow;
//!
//! // Must run before any window or DPI-sensitive call.
//! let dpi = DpiContext::initialize()?;
//! let config = Config::default();
//! config.check_awareness(dpi.awareness())?;
//!
//! let mut tracker = CursorTracker::system(&dpi)?;
//! let scheduler = IntervalScheduler::from_config(&config)?;
//!
//! tracker.drive(&scheduler, |result| {
//!     match result.color {
//!         Some(color) => println!("{} {color} {:?}", result.position, color.channels()),
//!         None => println!("{} unavailable", result.position),
//!     }
//!     ControlFlow::Continue(())
//! })?;
//! # Ok::<(), pixprobe::Error>(())
//! ```
//!
//! ## Coordinates
//!
//! After [`DpiContext::initialize`] succeeds the cursor position and the
//! capture both use physical pixels on the virtual desktop. Points left of or
//! above the primary monitor are negative. [`CursorTracker::new`] refuses
//! sources that disagree on the coordinate space, so a point is never scaled
//! between reading and sampling.
//!
//! Off Windows every OS-backed call returns [`Error::NotSupported`]; the
//! [`synthetic`] module provides stand-ins for headless use.

pub mod color;
pub mod config;
pub mod cursor;
pub mod display;
pub mod dpi;
pub mod error;
pub mod sampler;
pub mod scheduler;
#[cfg(feature = "statistics")]
pub mod statistics;
pub mod synthetic;
pub mod tracker;

mod platform;

// Re-exports
pub use color::Color;
pub use config::Config;
pub use cursor::{CursorSource, SystemCursor, cursor_position};
pub use display::{
    DisplayInfo, Rect, ScreenPoint, display_at_point, displays, primary_display, virtual_screen,
};
pub use dpi::{CoordinateSpace, DpiAwareness, DpiContext};
pub use error::{Error, Result};
pub use sampler::{PixelSampler, ScreenSampler, sample};
#[cfg(feature = "tokio")]
pub use scheduler::run_async;
pub use scheduler::{IntervalScheduler, Scheduler, StopHandle};
#[cfg(feature = "statistics")]
pub use statistics::PollStatistics;
pub use tracker::{CursorTracker, SampleResult, SampleStatus, TrackerState};
