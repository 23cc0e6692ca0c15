#![cfg(feature = "tokio")]

use pixprobe::synthetic::{ScriptedCursor, SyntheticScreen};
use pixprobe::{
    Color, CursorTracker, DpiAwareness, DpiContext, Error, Rect, ScreenPoint, StopHandle,
    run_async,
};
use std::ops::ControlFlow;
use std::time::Duration;

#[tokio::test]
async fn test_run_async_drives_tracker() {
    let mut screen = SyntheticScreen::new(Rect::new(0, 0, 100, 100), Color::BLACK);
    screen.fill(Rect::new(0, 0, 10, 10), Color::WHITE);
    let cursor = ScriptedCursor::new([
        Ok(ScreenPoint::new(5, 5)),
        Ok(ScreenPoint::new(50, 50)),
    ]);
    let dpi = DpiContext::assume(DpiAwareness::PerMonitorV2);
    let mut tracker = CursorTracker::new(dpi, cursor, screen).unwrap();

    let mut colors = Vec::new();
    run_async(Duration::from_millis(1), StopHandle::new(), || {
        colors.push(tracker.poll().color);
        if colors.len() == 3 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })
    .await
    .unwrap();

    assert_eq!(
        colors,
        vec![Some(Color::WHITE), Some(Color::BLACK), Some(Color::BLACK)]
    );
}

#[tokio::test]
async fn test_run_async_honors_stop() {
    let stop = StopHandle::new();
    let handle = stop.clone();
    let mut ticks = 0;
    run_async(Duration::from_millis(1), stop, || {
        ticks += 1;
        handle.stop();
        ControlFlow::Continue(())
    })
    .await
    .unwrap();
    assert_eq!(ticks, 1);
}

#[tokio::test]
async fn test_run_async_rejects_zero_period() {
    let result = run_async(Duration::ZERO, StopHandle::new(), || ControlFlow::Continue(())).await;
    assert!(matches!(result, Err(Error::InvalidConfig(_))));
}
