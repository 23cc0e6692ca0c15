//! Process-wide DPI awareness.
//!
//! Windows virtualizes coordinates and scales captured pixels for processes
//! that are not DPI aware. A cursor position read in one coordinate space and
//! sampled in another lands on the wrong physical pixel on any monitor whose
//! scale factor is not 100%. The process therefore declares per-monitor (v2)
//! awareness exactly once, before any window or capture exists, and the
//! resulting [`DpiContext`] is handed to every component that reads or
//! consumes screen coordinates.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::error::{Error, Result};

/// Effective DPI awareness of the process.
///
/// Variants are ordered from coarsest to finest, so `a >= b` reads as
/// "`a` is at least as precise as `b`".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DpiAwareness {
    /// Coordinates and bitmaps are scaled to 96 DPI on every monitor.
    Unaware,
    /// Coordinates are exact only on monitors matching the system DPI.
    System,
    /// Per-monitor aware (Windows 8.1 semantics).
    PerMonitor,
    /// Per-monitor aware v2 (Windows 10 1703+).
    PerMonitorV2,
}

impl DpiAwareness {
    /// The coordinate space the OS reports points in under this awareness.
    pub fn coordinate_space(self) -> CoordinateSpace {
        match self {
            DpiAwareness::PerMonitor | DpiAwareness::PerMonitorV2 => CoordinateSpace::Physical,
            DpiAwareness::System | DpiAwareness::Unaware => CoordinateSpace::Logical,
        }
    }
}

/// How screen coordinates relate to physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CoordinateSpace {
    /// One unit is one physical pixel on every monitor.
    Physical,
    /// Units are scaled by the OS compatibility layer on some monitors.
    Logical,
}

/// The process DPI awareness actually in effect.
static PROCESS_AWARENESS: OnceLock<Option<DpiAwareness>> = OnceLock::new();

/// Immutable record of the process DPI configuration.
///
/// Obtain one with [`DpiContext::initialize`] at startup and pass it to the
/// cursor source and sampler constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DpiContext {
    awareness: DpiAwareness,
}

impl DpiContext {
    /// Declare per-monitor v2 DPI awareness for the process.
    ///
    /// Only the first call talks to the OS; later calls return the same
    /// context. If the OS refuses the declaration (for example because an
    /// application manifest already fixed it) the awareness in effect is
    /// reported instead, and a warning is logged when it is not per-monitor.
    pub fn initialize() -> Result<DpiContext> {
        let awareness = PROCESS_AWARENESS.get_or_init(|| {
            let awareness = crate::platform::declare_dpi_awareness();
            match awareness {
                Some(DpiAwareness::PerMonitorV2) => {
                    log::debug!("process is per-monitor v2 DPI aware");
                }
                Some(other) => {
                    log::warn!(
                        "process DPI awareness is {other:?}; coordinates may be {:?}",
                        other.coordinate_space()
                    );
                }
                None => {}
            }
            awareness
        });

        (*awareness)
            .map(|awareness| DpiContext { awareness })
            .ok_or_else(|| Error::NotSupported("DPI awareness requires Windows".into()))
    }

    /// Build a context for an assumed awareness without touching the OS.
    ///
    /// Used with synthetic cursor sources and samplers, and by hosts that
    /// configured DPI awareness themselves.
    pub const fn assume(awareness: DpiAwareness) -> DpiContext {
        DpiContext { awareness }
    }

    /// The awareness in effect.
    pub fn awareness(&self) -> DpiAwareness {
        self.awareness
    }

    /// The coordinate space cursor positions and capture offsets share.
    pub fn coordinate_space(&self) -> CoordinateSpace {
        self.awareness.coordinate_space()
    }

    /// Whether the process runs with per-monitor v2 awareness.
    pub fn is_per_monitor_v2(&self) -> bool {
        self.awareness == DpiAwareness::PerMonitorV2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_space_by_awareness() {
        assert_eq!(
            DpiAwareness::PerMonitorV2.coordinate_space(),
            CoordinateSpace::Physical
        );
        assert_eq!(
            DpiAwareness::PerMonitor.coordinate_space(),
            CoordinateSpace::Physical
        );
        assert_eq!(
            DpiAwareness::System.coordinate_space(),
            CoordinateSpace::Logical
        );
        assert_eq!(
            DpiAwareness::Unaware.coordinate_space(),
            CoordinateSpace::Logical
        );
    }

    #[test]
    fn test_awareness_ordering() {
        assert!(DpiAwareness::Unaware < DpiAwareness::System);
        assert!(DpiAwareness::System < DpiAwareness::PerMonitor);
        assert!(DpiAwareness::PerMonitor < DpiAwareness::PerMonitorV2);
    }

    #[test]
    fn test_assumed_context() {
        let context = DpiContext::assume(DpiAwareness::PerMonitorV2);
        assert!(context.is_per_monitor_v2());
        assert_eq!(context.coordinate_space(), CoordinateSpace::Physical);

        let context = DpiContext::assume(DpiAwareness::System);
        assert!(!context.is_per_monitor_v2());
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let first = DpiContext::initialize();
        let second = DpiContext::initialize();
        match (first, second) {
            (Ok(a), Ok(b)) => assert_eq!(a, b),
            (Err(Error::NotSupported(_)), Err(Error::NotSupported(_))) => {}
            (a, b) => panic!("inconsistent initialization: {a:?} vs {b:?}"),
        }
    }
}
