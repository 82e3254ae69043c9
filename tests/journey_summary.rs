//! Tests for journey summary module

use journey_analytics::geo_utils::haversine_distance_km;
use journey_analytics::{compute_journey_summary, Sample};

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

fn city_drive() -> Vec<Sample> {
    vec![
        Sample::new(12.9716, 77.5946).with_speed(0.0).with_timestamp("2024-05-01T08:00:00Z"),
        Sample::new(12.9750, 77.5990).with_speed(24.0),
        Sample::new(12.9790, 77.6050).with_speed(41.5),
        Sample::new(12.9790, 77.6050).with_speed(0.0),
        Sample::new(12.9830, 77.6100),
        Sample::new(12.9880, 77.6180).with_speed(35.0).with_timestamp("2024-05-01T08:20:00Z"),
    ]
}

#[test]
fn test_identical_coordinates_zero_distance() {
    let a = Sample::new(-33.8688, 151.2093);
    let b = Sample::new(-33.8688, 151.2093).with_speed(12.0);
    assert_eq!(haversine_distance_km(&a, &b), 0.0);
}

#[test]
fn test_three_points_along_equator() {
    let journey = vec![
        Sample::new(0.0, 0.0),
        Sample::new(0.0, 1.0),
        Sample::new(0.0, 2.0),
    ];
    let summary = compute_journey_summary(&journey);
    assert!(approx_eq(summary.total_distance_km, 222.4, 0.1));
}

#[test]
fn test_all_zero_speed_journey() {
    let journey: Vec<Sample> = (0..5)
        .map(|i| Sample::new(51.5, -0.12 + i as f64 * 0.0001).with_speed(0.0))
        .collect();
    let summary = compute_journey_summary(&journey);
    assert_eq!(summary.stop_count, 5);
    assert_eq!(summary.average_speed, 0.0);
    assert_eq!(summary.max_speed, 0.0);
}

#[test]
fn test_city_drive_summary() {
    let summary = compute_journey_summary(&city_drive());

    assert!(summary.total_distance_km > 0.0);
    assert_eq!(summary.duration_minutes, Some(20.0));
    assert_eq!(summary.stop_count, 2);
    assert_eq!(summary.sample_count, 6);
    assert_eq!(summary.speed_sample_count, 5);
    assert!(approx_eq(summary.average_speed, 100.5 / 5.0, 1e-9));
    assert_eq!(summary.max_speed, 41.5);
    assert!(!summary.has_data_quality_issues());
}

#[test]
fn test_summary_is_idempotent() {
    let journey = city_drive();
    let first = compute_journey_summary(&journey);
    let second = compute_journey_summary(&journey);
    assert_eq!(first, second);
    assert_eq!(
        first.total_distance_km.to_bits(),
        second.total_distance_km.to_bits()
    );
}

#[test]
fn test_distance_is_direction_independent() {
    let journey = city_drive();
    let mut reversed = journey.clone();
    reversed.reverse();

    let forward = compute_journey_summary(&journey).total_distance_km;
    let backward = compute_journey_summary(&reversed).total_distance_km;
    assert_eq!(forward.to_bits(), backward.to_bits());
}

#[test]
fn test_long_journeys_reverse_to_identical_distance() {
    // Irregular steps so segment lengths vary widely and rounding would show
    for seed in 0..50u64 {
        let journey: Vec<Sample> = (0..50u64)
            .map(|i| {
                let step = ((seed * 31 + i * 17) % 97) as f64;
                Sample::new(
                    -45.0 + seed as f64 + i as f64 * 0.013 * step,
                    -170.0 + seed as f64 * 6.3 + ((i * i + seed) % 89) as f64 * 0.37,
                )
            })
            .collect();
        let mut reversed = journey.clone();
        reversed.reverse();

        let forward = compute_journey_summary(&journey).total_distance_km;
        let backward = compute_journey_summary(&reversed).total_distance_km;
        assert_eq!(forward.to_bits(), backward.to_bits(), "seed {}", seed);
    }
}

#[test]
fn test_malformed_samples_do_not_abort() {
    let mut journey = city_drive();
    journey.insert(2, Sample::new(95.0, 77.6));
    journey.push(Sample::new(12.99, f64::INFINITY));

    let summary = compute_journey_summary(&journey);
    assert!(summary.total_distance_km > 0.0);
    assert_eq!(summary.skipped_segments, 3);
    // The last sample has no timestamp
    assert_eq!(summary.duration_minutes, None);
}

#[test]
fn test_epoch_and_iso_timestamps_mix() {
    let journey = vec![
        Sample::new(0.0, 0.0).with_timestamp(1_714_550_400_000_i64), // 2024-05-01T08:00:00Z
        Sample::new(0.0, 0.1).with_timestamp("2024-05-01T09:30:00Z"),
    ];
    assert_eq!(compute_journey_summary(&journey).duration_minutes, Some(90.0));
}

#[test]
fn test_negative_speeds_are_ignored() {
    let journey = vec![
        Sample::new(0.0, 0.0).with_speed(-5.0),
        Sample::new(0.0, 0.1).with_speed(10.0),
    ];
    let summary = compute_journey_summary(&journey);
    assert_eq!(summary.speed_sample_count, 1);
    assert_eq!(summary.average_speed, 10.0);
    assert!(summary.max_speed >= 0.0);
}
