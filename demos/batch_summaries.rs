//! Summarize a fleet's journeys in parallel.
//!
//! Run with: cargo run --example batch_summaries --features parallel

use std::time::Instant;

use journey_analytics::{summarize_journeys, Sample};

fn main() {
    env_logger::init();

    let fleet: Vec<Vec<Sample>> = (0..200)
        .map(|device| {
            let base_lat = 40.0 + device as f64 * 0.01;
            (0..3000)
                .map(|i| {
                    Sample::new(base_lat + i as f64 * 0.0001, -74.0 + (i % 17) as f64 * 0.0001)
                        .with_speed(((i + device) % 90) as f64)
                })
                .collect()
        })
        .collect();

    let start = Instant::now();
    let summaries = summarize_journeys(&fleet);
    let elapsed = start.elapsed();

    let total_km: f64 = summaries.iter().map(|s| s.total_distance_km).sum();
    let stops: usize = summaries.iter().map(|s| s.stop_count).sum();

    println!("Summarized {} journeys in {:?}", summaries.len(), elapsed);
    println!("Fleet distance: {:.1} km, stops: {}", total_km, stops);
}
