//! Tests for decoding backend payloads (requires the `serde` feature)

#![cfg(feature = "serde")]

use journey_analytics::{
    compute_journey_summary, MapViewOptions, ReductionConfig, Sample, Timestamp,
};

#[test]
fn test_decode_mixed_timestamps() {
    let payload = r#"[
        {"latitude": 12.9716, "longitude": 77.5946, "timestamp": "2024-05-01T08:00:00Z", "speed": 0.0},
        {"latitude": 12.9750, "longitude": 77.5990, "speed": 24.0},
        {"latitude": 12.9790, "longitude": 77.6050, "timestamp": 1714551300000}
    ]"#;
    let samples: Vec<Sample> = serde_json::from_str(payload).unwrap();

    assert_eq!(samples.len(), 3);
    assert_eq!(samples[1].timestamp, None);
    assert_eq!(samples[2].speed, None);
    assert_eq!(samples[2].timestamp, Some(Timestamp::EpochMillis(1_714_551_300_000)));

    let summary = compute_journey_summary(&samples);
    assert_eq!(summary.duration_minutes, Some(15.0));
    assert_eq!(summary.stop_count, 1);
}

#[test]
fn test_partial_config_uses_defaults() {
    let config: ReductionConfig = serde_json::from_str(r#"{"max_markers": 12}"#).unwrap();
    assert_eq!(config.max_markers, 12);
    assert_eq!(config.max_path_points, ReductionConfig::default().max_path_points);

    let options: MapViewOptions = serde_json::from_str(r#"{"style": "RideHailing"}"#).unwrap();
    assert!(options.show_waypoints);
}

#[test]
fn test_summary_serializes() {
    let summary = compute_journey_summary(&[Sample::new(0.0, 0.0), Sample::new(0.0, 1.0)]);
    let json = serde_json::to_value(&summary).unwrap();
    assert!(json["total_distance_km"].as_f64().unwrap() > 111.0);
    assert!(json["duration_minutes"].is_null());
}
