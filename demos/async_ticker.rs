//! Drive the tracker from a tokio interval.
//!
//! Usage:
//!   cargo run --example async_ticker --features tokio
//!
//! Press Ctrl+C to stop.

use pixprobe::{Config, CursorTracker, DpiContext, StopHandle, run_async};
use std::ops::ControlFlow;
use std::time::Duration;

#[tokio::main]
async fn main() -> pixprobe::Result<()> {
    tracing_subscriber::fmt().init();

    let dpi = DpiContext::initialize()?;
    let config = Config::new().with_refresh_interval(Duration::from_millis(100));
    config.validate()?;

    let mut tracker = CursorTracker::system(&dpi)?;
    let stop = StopHandle::new();
    let handle = stop.clone();
    ctrlc::set_handler(move || handle.stop()).expect("Error setting Ctrl-C handler");

    let mut last = None;
    run_async(config.refresh_interval, stop, || {
        let result = tracker.poll();
        // Only print changes.
        if last != Some(result) {
            match result.color {
                Some(color) => println!("{} {color}", result.position),
                None => println!("{} unavailable", result.position),
            }
            last = Some(result);
        }
        ControlFlow::Continue(())
    })
    .await
}
