//! Platform-specific implementations.

#[cfg(target_os = "windows")]
mod windows;
#[cfg(target_os = "windows")]
pub use windows::*;

// Other targets build the platform-independent core so it can be tested
// headlessly; every OS-backed query reports `NotSupported`.
#[cfg(not(target_os = "windows"))]
mod unsupported;
#[cfg(not(target_os = "windows"))]
pub use unsupported::*;
