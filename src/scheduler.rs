//! Fixed-period tick scheduling.
//!
//! The tracker has no dependency on any UI toolkit. A host either calls
//! [`CursorTracker::poll`](crate::CursorTracker::poll) from its own timer, or
//! lets a [`Scheduler`] own the cadence. Ticks run synchronously on the
//! calling thread; there are no background threads.

use crate::config::{Config, MAX_REFRESH_INTERVAL};
use crate::error::{Error, Result};
use std::ops::ControlFlow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// A timer that invokes a callback once per tick.
pub trait Scheduler {
    /// Invoke `tick` once per period until it returns [`ControlFlow::Break`]
    /// or the scheduler is stopped. Blocks the calling thread.
    fn run<F>(&self, tick: F) -> Result<()>
    where
        F: FnMut() -> ControlFlow<()>;
}

/// Cloneable handle that stops a running scheduler.
///
/// Stopping takes effect before the next tick; a tick already in progress
/// finishes normally.
#[derive(Debug, Clone)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    /// Create a handle that is not yet stopped.
    pub fn new() -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request the scheduler to stop.
    ///
    /// A stop requested while no run is in progress ends the next run before
    /// its first tick. [`IntervalScheduler`] clears the flag whenever a run
    /// returns.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    /// Whether a stop was requested.
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    fn reset(&self) {
        self.stopped.store(false, Ordering::SeqCst);
    }
}

impl Default for StopHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Blocking fixed-rate scheduler running on the caller's thread.
///
/// Deadlines advance by whole periods from the start of the run. When a tick
/// overruns, the missed deadlines are skipped instead of firing in a burst.
#[derive(Debug)]
pub struct IntervalScheduler {
    period: Duration,
    running: AtomicBool,
    stop: StopHandle,
}

impl IntervalScheduler {
    /// Create a scheduler with the given tick period.
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            running: AtomicBool::new(false),
            stop: StopHandle::new(),
        }
    }

    /// Create a scheduler using the configured refresh interval.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.refresh_interval))
    }

    /// The tick period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// A handle that stops this scheduler, usable from a signal handler.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Check if the scheduler is currently running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Scheduler for IntervalScheduler {
    fn run<F>(&self, mut tick: F) -> Result<()>
    where
        F: FnMut() -> ControlFlow<()>,
    {
        check_period(self.period)?;
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(Error::AlreadyRunning);
        }
        // Cleared even if `tick` panics.
        let _running = RunGuard {
            running: &self.running,
            stop: &self.stop,
        };
        log::debug!("scheduler started, period {:?}", self.period);

        let mut deadline = Instant::now();
        let mut skipped: u64 = 0;
        while !self.stop.is_stopped() {
            if tick().is_break() {
                break;
            }

            deadline = deadline
                .checked_add(self.period)
                .ok_or_else(|| Error::InvalidConfig("tick deadline out of range".into()))?;
            let now = Instant::now();
            if deadline <= now {
                let period = self.period.as_nanos();
                let behind = now.duration_since(deadline).as_nanos();
                deadline = now + Duration::from_nanos((period - behind % period) as u64);
                skipped += (behind / period + 1) as u64;
            }
            std::thread::sleep(deadline.saturating_duration_since(Instant::now()));
        }

        if skipped > 0 {
            log::debug!("scheduler stopped, {skipped} ticks skipped after overruns");
        } else {
            log::debug!("scheduler stopped");
        }
        Ok(())
    }
}

struct RunGuard<'a> {
    running: &'a AtomicBool,
    stop: &'a StopHandle,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.stop.reset();
        self.running.store(false, Ordering::SeqCst);
    }
}

fn check_period(period: Duration) -> Result<()> {
    if period.is_zero() {
        return Err(Error::InvalidConfig("tick period must be non-zero".into()));
    }
    if period > MAX_REFRESH_INTERVAL {
        return Err(Error::InvalidConfig(format!(
            "tick period {period:?} exceeds the {MAX_REFRESH_INTERVAL:?} maximum"
        )));
    }
    Ok(())
}

/// Run `tick` on a tokio interval until it breaks or `stop` is triggered.
///
/// For hosts whose UI loop already lives on a tokio runtime. The tick itself
/// is still synchronous.
///
/// # Example
///
/// ```ignore
/// use pixprobe::scheduler::{run_async, StopHandle};
/// use std::ops::ControlFlow;
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() {
///     let stop = StopHandle::new();
///     run_async(Duration::from_millis(50), stop, || ControlFlow::Continue(()))
///         .await
///         .unwrap();
/// }
/// ```
#[cfg(feature = "tokio")]
pub async fn run_async<F>(period: Duration, stop: StopHandle, mut tick: F) -> Result<()>
where
    F: FnMut() -> ControlFlow<()>,
{
    use tokio::time::{MissedTickBehavior, interval};

    check_period(period)?;

    let mut interval = interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    while !stop.is_stopped() {
        interval.tick().await;
        if stop.is_stopped() || tick().is_break() {
            break;
        }
    }
    Ok(())
}
