//! Print the cursor position and the color beneath it on every tick.
//!
//! Usage:
//!   cargo run --example cursor_color
//!   RUST_LOG=pixprobe=debug cargo run --example cursor_color --features statistics
//!
//! Press Ctrl+C to stop.

use pixprobe::{Config, CursorTracker, DpiContext, IntervalScheduler, SampleStatus};
use std::ops::ControlFlow;
use tracing_subscriber::EnvFilter;

fn main() -> pixprobe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pixprobe=info")),
        )
        .init();

    // Before any window exists.
    let dpi = DpiContext::initialize()?;
    let config = Config::default();
    config.check_awareness(dpi.awareness())?;

    let mut tracker = CursorTracker::system(&dpi)?;
    let scheduler = IntervalScheduler::from_config(&config)?;

    let stop = scheduler.stop_handle();
    ctrlc::set_handler(move || stop.stop()).expect("Error setting Ctrl-C handler");

    println!(
        "Sampling every {:?} ({:?} DPI awareness). Press Ctrl+C to stop.\n",
        scheduler.period(),
        dpi.awareness()
    );

    tracker.drive(&scheduler, |result| {
        let color = match result.color {
            Some(color) => {
                let [r, g, b] = color.channels();
                format!("{color}  rgb({r}, {g}, {b})")
            }
            None => "unavailable".to_string(),
        };
        let marker = match result.status {
            SampleStatus::Live => "",
            SampleStatus::CaptureFailed => "  [capture failed]",
            SampleStatus::CursorUnavailable => "  [cursor unavailable]",
        };
        println!("{:>14}  {color}{marker}", result.position.to_string());
        ControlFlow::Continue(())
    })?;

    #[cfg(feature = "statistics")]
    println!("\n{}", tracker.statistics().summary());

    Ok(())
}
