//! Summarize a journey and render it into a console "map".
//!
//! Run with: cargo run --example journey_overview

use journey_analytics::{
    cluster_markers, compute_journey_summary, Bounds, JourneyMapView, MapRenderer, MapStyle,
    MapViewOptions, Marker, PathStyle, Sample,
};

/// Prints what a map widget would be asked to draw.
struct ConsoleMap;

impl MapRenderer for ConsoleMap {
    fn draw_path(&mut self, path: &[Sample], style: &PathStyle) {
        println!(
            "   path: {} points, weight {}, speed colors: {}",
            path.len(),
            style.weight,
            style.color_by_speed
        );
    }

    fn set_markers(&mut self, markers: &[Marker]) {
        for m in markers {
            println!(
                "   marker {:?} at ({:.4}, {:.4}) [{}]",
                m.kind, m.sample.latitude, m.sample.longitude, m.speed_band
            );
        }
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        println!(
            "   bounds: {:.4}..{:.4} N, {:.4}..{:.4} E",
            bounds.min_lat, bounds.max_lat, bounds.min_lng, bounds.max_lng
        );
    }
}

fn main() {
    env_logger::init();

    // A 30 minute delivery run around Bengaluru, one sample per second,
    // with a parked stretch in the middle.
    let start_ms: i64 = 1_714_550_400_000;
    let journey: Vec<Sample> = (0..1800)
        .map(|i| {
            let parked = (900..960).contains(&i);
            let speed = if parked { 0.0 } else { 20.0 + (i % 30) as f64 };
            Sample::new(12.9716 + i as f64 * 0.00004, 77.5946 + (i % 60) as f64 * 0.00002)
                .with_speed(speed)
                .with_timestamp(start_ms + i as i64 * 1000)
        })
        .collect();

    let summary = compute_journey_summary(&journey);
    println!("Journey Summary\n");
    println!("   distance: {:.2} km", summary.total_distance_km);
    println!("   duration: {:?} min", summary.duration_minutes);
    println!("   stops:    {}", summary.stop_count);
    println!("   avg/max:  {} / {} km/h\n", summary.display_average_speed(), summary.max_speed);

    for style in [MapStyle::Clean, MapStyle::Detailed] {
        println!("{:?} map:", style);
        let options = MapViewOptions {
            style,
            ..MapViewOptions::default()
        };
        let view = match JourneyMapView::new(options) {
            Ok(view) => view,
            Err(e) => {
                eprintln!("   bad options: {}", e);
                continue;
            }
        };
        let mut map = ConsoleMap;
        match view.render(&journey, &mut map) {
            Ok(stats) if stats.is_empty() => println!("   no data"),
            Ok(_) => {}
            Err(e) => eprintln!("   render failed: {}", e),
        }
        println!();
    }

    match cluster_markers(&journey, 500.0) {
        Ok(clusters) => println!("{} marker clusters at 500m", clusters.len()),
        Err(e) => eprintln!("clustering failed: {}", e),
    }
}
