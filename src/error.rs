//! Error types for cursor tracking and pixel sampling.

use crate::dpi::CoordinateSpace;
use thiserror::Error;

/// Result type alias for pixprobe operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while tracking the cursor or sampling pixels.
#[derive(Debug, Error)]
pub enum Error {
    /// The OS graphics calls did not yield pixel data.
    #[error("pixel capture failed: {0}")]
    CaptureFailed(String),

    /// The OS cursor position query failed.
    #[error("cursor position unavailable: {0}")]
    CursorUnavailable(String),

    /// A cursor source and a sampler disagree on the coordinate space.
    #[error(
        "coordinate space mismatch: process is {expected:?}, cursor reports {cursor:?}, sampler expects {sampler:?}"
    )]
    CoordinateSpaceMismatch {
        /// Space implied by the process DPI awareness.
        expected: CoordinateSpace,
        /// Space the cursor source reports points in.
        cursor: CoordinateSpace,
        /// Space the sampler interprets points in.
        sampler: CoordinateSpace,
    },

    /// A scheduler is already running.
    #[error("scheduler is already running")]
    AlreadyRunning,

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The requested feature is not supported on this platform.
    #[error("not supported: {0}")]
    NotSupported(String),

    /// Platform-specific error.
    #[error("platform error: {0}")]
    Platform(String),
}

impl Error {
    /// Whether this error describes a condition that may clear on its own,
    /// such as a protected surface under the cursor or a locked desktop.
    ///
    /// The tracker keeps polling after any error; this only decides how
    /// loudly the first occurrence is logged.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::CaptureFailed(_) | Error::CursorUnavailable(_))
    }
}
