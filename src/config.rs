//! Tracker configuration.

use crate::dpi::DpiAwareness;
use crate::error::{Error, Result};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default tick period.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(200);

/// Shortest accepted tick period.
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_millis(1);

/// Longest accepted tick period.
pub const MAX_REFRESH_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Settings shared by the tracker and its scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Time between polls.
    pub refresh_interval: Duration,
    /// Minimum DPI awareness the host requires. Startup fails when the
    /// process ends up with a coarser awareness.
    pub dpi_awareness: DpiAwareness,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            dpi_awareness: DpiAwareness::PerMonitorV2,
        }
    }
}

impl Config {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the time between polls.
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Set the minimum DPI awareness.
    pub fn with_dpi_awareness(mut self, awareness: DpiAwareness) -> Self {
        self.dpi_awareness = awareness;
        self
    }

    /// Check that every value is in range.
    pub fn validate(&self) -> Result<()> {
        if self.refresh_interval < MIN_REFRESH_INTERVAL {
            return Err(Error::InvalidConfig(format!(
                "refresh interval {:?} is below the {:?} minimum",
                self.refresh_interval, MIN_REFRESH_INTERVAL
            )));
        }
        if self.refresh_interval > MAX_REFRESH_INTERVAL {
            return Err(Error::InvalidConfig(format!(
                "refresh interval {:?} exceeds the {:?} maximum",
                self.refresh_interval, MAX_REFRESH_INTERVAL
            )));
        }
        Ok(())
    }

    /// Check that the effective process awareness satisfies this configuration.
    ///
    /// Accepts the required awareness or any finer one.
    pub fn check_awareness(&self, effective: DpiAwareness) -> Result<()> {
        if effective >= self.dpi_awareness {
            Ok(())
        } else {
            Err(Error::Platform(format!(
                "process DPI awareness is {effective:?}, at least {:?} required",
                self.dpi_awareness
            )))
        }
    }
}
