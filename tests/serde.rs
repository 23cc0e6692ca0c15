#![cfg(feature = "serde")]

use pixprobe::{Color, Config, DpiAwareness, SampleResult, SampleStatus, ScreenPoint};
use std::time::Duration;

#[test]
fn test_sample_result_json() {
    let result = SampleResult {
        position: ScreenPoint::new(-1280, 40),
        color: Some(Color::new(255, 128, 0)),
        status: SampleStatus::Live,
    };

    let json = serde_json::to_value(result).unwrap();
    assert_eq!(json["position"]["x"], -1280);
    assert_eq!(json["color"]["g"], 128);
    assert_eq!(json["status"], "Live");

    let unavailable = SampleResult {
        color: None,
        status: SampleStatus::CaptureFailed,
        ..result
    };
    let json = serde_json::to_value(unavailable).unwrap();
    assert!(json["color"].is_null());
}

#[test]
fn test_config_fills_missing_fields() {
    let config: Config = serde_json::from_str(r#"{ "dpi_awareness": "PerMonitor" }"#).unwrap();
    assert_eq!(config.dpi_awareness, DpiAwareness::PerMonitor);
    assert_eq!(config.refresh_interval, Duration::from_millis(200));

    let back: Config = serde_json::from_str(&serde_json::to_string(&config).unwrap()).unwrap();
    assert_eq!(back, config);
}
