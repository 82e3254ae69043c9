//! # Geographic Utilities
//!
//! Core geographic computation utilities for journey telemetry.
//!
//! ## Overview
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`haversine_distance`] | Great-circle distance between two samples, in meters |
//! | [`haversine_distance_km`] | Same, in kilometers |
//! | [`polyline_length_km`] | Total length of a journey in kilometers |
//! | [`compute_bounds`] | Bounding box of a journey |
//! | [`compute_center`] | Centroid of a journey |
//! | [`meters_to_degrees`] | Convert meters to approximate degrees at a latitude |
//!
//! ## Example
//!
//! ```rust
//! use journey_analytics::{Sample, geo_utils};
//!
//! let track = vec![
//!     Sample::new(51.5074, -0.1278),  // London
//!     Sample::new(51.5080, -0.1290),
//!     Sample::new(51.5090, -0.1300),
//! ];
//!
//! let length = geo_utils::polyline_length_km(&track);
//! println!("Track length: {:.2} km", length);
//!
//! let bounds = geo_utils::compute_bounds(&track).unwrap();
//! println!("Bounds: {:.4}N to {:.4}N", bounds.min_lat, bounds.max_lat);
//! ```
//!
//! ## Algorithm Notes
//!
//! ### Haversine Formula
//!
//! `a = sin²(Δlat/2) + cos(lat1)·cos(lat2)·sin²(Δlon/2)`,
//! `d = 2·R·atan2(√a, √(1−a))` with the IUGG mean Earth radius, R = 6371.0088 km.
//! Delegated to the `geo` crate's [`Haversine`] metric space.
//!
//! Reference: [Haversine formula (Wikipedia)](https://en.wikipedia.org/wiki/Haversine_formula)
//!
//! ### Coordinate System
//!
//! All functions expect WGS84 coordinates (latitude/longitude in degrees).

use geo::{Distance, Haversine, Point};

use crate::{Bounds, Sample};

// =============================================================================
// Distance Functions
// =============================================================================

/// Great-circle distance between two samples in meters.
///
/// Does not check validity; see [`segment_distance_km`] for the checked form.
///
/// # Example
///
/// ```rust
/// use journey_analytics::{Sample, geo_utils};
///
/// let london = Sample::new(51.5074, -0.1278);
/// let paris = Sample::new(48.8566, 2.3522);
///
/// let distance = geo_utils::haversine_distance(&london, &paris);
/// assert!((distance - 343_560.0).abs() < 1000.0); // ~344 km
/// ```
#[inline]
pub fn haversine_distance(p1: &Sample, p2: &Sample) -> f64 {
    let point1 = Point::new(p1.longitude, p1.latitude);
    let point2 = Point::new(p2.longitude, p2.latitude);
    // geo uses the IUGG mean Earth radius, 6371.0088 km, not a rounded 6371 km
    Haversine::distance(point1, point2)
}

/// Great-circle distance between two samples in kilometers.
#[inline]
pub fn haversine_distance_km(p1: &Sample, p2: &Sample) -> f64 {
    haversine_distance(p1, p2) / 1000.0
}

/// Distance of one journey segment in kilometers, or `None` if either end
/// has invalid coordinates.
#[inline]
pub fn segment_distance_km(p1: &Sample, p2: &Sample) -> Option<f64> {
    if p1.is_valid() && p2.is_valid() {
        Some(haversine_distance_km(p1, p2))
    } else {
        None
    }
}

/// Total length of a journey in kilometers.
///
/// Sums the haversine distance between consecutive samples. Segments touching
/// an invalid sample count as zero. Empty or single-sample journeys return 0.0.
pub fn polyline_length_km(samples: &[Sample]) -> f64 {
    samples
        .windows(2)
        .filter_map(|w| segment_distance_km(&w[0], &w[1]))
        .sum()
}

/// Convert meters to approximate degrees at a given latitude.
///
/// Returns a single value suitable for bounding box queries where a square
/// search area is acceptable.
#[inline]
pub fn meters_to_degrees(meters: f64, latitude: f64) -> f64 {
    // At the equator, 1 degree ≈ 111,320 meters; shrinks with cos(latitude)
    let lat_rad = latitude.to_radians();
    let meters_per_degree = 111_320.0 * lat_rad.cos().max(0.1);
    meters / meters_per_degree
}

// =============================================================================
// Bounding Box / Center
// =============================================================================

/// Compute the bounding box of the valid samples in a journey.
///
/// Returns `None` when there are no valid samples.
#[inline]
pub fn compute_bounds(samples: &[Sample]) -> Option<Bounds> {
    Bounds::from_samples(samples)
}

/// Arithmetic mean of the valid coordinates, as `(latitude, longitude)`.
///
/// Suitable for small areas; journeys crossing the antimeridian average badly.
pub fn compute_center(samples: &[Sample]) -> Option<(f64, f64)> {
    let (sum_lat, sum_lng, n) = samples
        .iter()
        .filter(|s| s.is_valid())
        .fold((0.0, 0.0, 0usize), |(lat, lng, n), s| {
            (lat + s.latitude, lng + s.longitude, n + 1)
        });

    if n == 0 {
        return None;
    }
    Some((sum_lat / n as f64, sum_lng / n as f64))
}

// =============================================================================
// Unit Tests
// =============================================================================
