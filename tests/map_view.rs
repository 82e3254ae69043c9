//! Tests for the journey map view

use journey_analytics::{
    Bounds, JourneyMapView, MapRenderer, MapStyle, MapViewOptions, Marker, MarkerKind, PathStyle,
    ReductionConfig, Sample, SampleIndex, SpeedBand,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Renderer that keeps the last frame, the way a map widget would.
#[derive(Default)]
struct Frame {
    bounds: Option<Bounds>,
    path: Vec<Sample>,
    markers: Vec<Marker>,
    renders: usize,
}

impl MapRenderer for Frame {
    fn draw_path(&mut self, path: &[Sample], _style: &PathStyle) {
        self.path = path.to_vec();
        self.renders += 1;
    }

    fn set_markers(&mut self, markers: &[Marker]) {
        self.markers = markers.to_vec();
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.bounds = Some(bounds);
    }
}

fn delivery_run() -> Vec<Sample> {
    (0..2000)
        .map(|i| {
            let speed = if i % 250 == 0 { 0.0 } else { 15.0 + (i % 50) as f64 };
            Sample::new(19.0760 + i as f64 * 0.00005, 72.8777 + (i % 40) as f64 * 0.00003)
                .with_speed(speed)
        })
        .collect()
}

#[test]
fn test_every_style_respects_budgets() {
    init_logging();
    let journey = delivery_run();

    for style in [MapStyle::Clean, MapStyle::Detailed, MapStyle::RideHailing] {
        let options = MapViewOptions {
            style,
            reduction: ReductionConfig {
                max_path_points: 120,
                max_markers: 8,
                ..ReductionConfig::default()
            },
            ..MapViewOptions::default()
        };
        let view = JourneyMapView::new(options).unwrap();
        let mut frame = Frame::default();
        let stats = view.render(&journey, &mut frame).unwrap();

        assert!(stats.drawn_points <= 120, "{:?}", style);
        assert!(stats.markers <= 8, "{:?}", style);
        assert_eq!(frame.path.first(), journey.first());
        assert_eq!(frame.path.last(), journey.last());
        assert_eq!(frame.renders, 1);
    }
}

#[test]
fn test_bounds_cover_journey() {
    init_logging();
    let journey = delivery_run();
    let view = JourneyMapView::new(MapViewOptions::default()).unwrap();
    let mut frame = Frame::default();
    view.render(&journey, &mut frame).unwrap();

    let bounds = frame.bounds.unwrap();
    assert!(journey.iter().all(|s| bounds.contains(s.latitude, s.longitude)));
}

#[test]
fn test_markers_start_end_and_waypoints() {
    init_logging();
    let journey = delivery_run();
    let view = JourneyMapView::new(MapViewOptions::default()).unwrap();
    let mut frame = Frame::default();
    view.render(&journey, &mut frame).unwrap();

    let kinds: Vec<MarkerKind> = frame.markers.iter().map(|m| m.kind).collect();
    assert_eq!(kinds.first(), Some(&MarkerKind::Start));
    assert_eq!(kinds.last(), Some(&MarkerKind::End));
    assert!(kinds[1..kinds.len() - 1].iter().all(|k| *k == MarkerKind::Waypoint));
    assert_eq!(frame.markers[0].speed_band, SpeedBand::Stopped);
}

#[test]
fn test_only_invalid_samples_is_no_data() {
    init_logging();
    let journey = vec![Sample::new(f64::NAN, 1.0), Sample::new(100.0, 1.0)];
    let view = JourneyMapView::new(MapViewOptions::default()).unwrap();
    let mut frame = Frame::default();
    let stats = view.render(&journey, &mut frame).unwrap();

    assert!(stats.is_empty());
    assert_eq!(stats.skipped_samples, 2);
    assert!(frame.bounds.is_none());
}

#[test]
fn test_hover_lookup_on_rendered_path() {
    let journey = delivery_run();
    let index = SampleIndex::new(&journey);
    let hovered = index.nearest(journey[1234].latitude, journey[1234].longitude);
    assert_eq!(hovered, Some(1234));
}
