//! Nearest-sample lookup for map hover and tap.
//!
//! Samples are bulk-loaded into an R-tree in an equirectangular projection
//! anchored at the journey's mean latitude, so plain Euclidean queries are a
//! close proxy for ground distance within one journey. Radius queries are
//! confirmed with the haversine distance.

use rstar::primitives::GeomWithData;
use rstar::RTree;

use crate::geo_utils::{compute_center, haversine_distance};
use crate::Sample;

const METERS_PER_DEGREE: f64 = 111_320.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct IndexedSample {
    index: usize,
    latitude: f64,
    longitude: f64,
}

type IndexedPoint = GeomWithData<[f64; 2], IndexedSample>;

/// Spatial index over the valid samples of one journey.
pub struct SampleIndex {
    tree: RTree<IndexedPoint>,
    lng_scale: f64,
    /// Largest |latitude| among the indexed samples
    max_abs_lat: f64,
}

impl SampleIndex {
    /// Build an index over the valid samples. Invalid samples are left out.
    pub fn new(samples: &[Sample]) -> Self {
        let ref_lat = compute_center(samples).map_or(0.0, |(lat, _)| lat);
        let lng_scale = ref_lat.to_radians().cos().max(0.01);
        let max_abs_lat = samples
            .iter()
            .filter(|s| s.is_valid())
            .map(|s| s.latitude.abs())
            .fold(0.0, f64::max);

        let points: Vec<IndexedPoint> = samples
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_valid())
            .map(|(index, s)| {
                GeomWithData::new(
                    [s.longitude * lng_scale, s.latitude],
                    IndexedSample {
                        index,
                        latitude: s.latitude,
                        longitude: s.longitude,
                    },
                )
            })
            .collect();

        Self {
            tree: RTree::bulk_load(points),
            lng_scale,
            max_abs_lat,
        }
    }

    /// Number of indexed (valid) samples.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Index of the sample closest to the given coordinate.
    pub fn nearest(&self, latitude: f64, longitude: f64) -> Option<usize> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return None;
        }
        self.tree
            .nearest_neighbor(&[longitude * self.lng_scale, latitude])
            .map(|p| p.data.index)
    }

    /// Indices of all samples within `radius_meters` of the coordinate, in journey order.
    pub fn within(&self, latitude: f64, longitude: f64, radius_meters: f64) -> Vec<usize> {
        if !latitude.is_finite()
            || !longitude.is_finite()
            || radius_meters.is_nan()
            || radius_meters < 0.0
        {
            return Vec::new();
        }

        // Away from the reference latitude a meter spans more longitude than the
        // projection assumes. Stretch the search radius by the worst case over
        // the indexed latitudes and the query; the haversine check below is exact.
        let worst_lat = self.max_abs_lat.max(latitude.abs()).min(89.0);
        let stretch = (self.lng_scale / worst_lat.to_radians().cos()).max(1.0);
        let radius_deg = radius_meters / METERS_PER_DEGREE * stretch * 1.1;
        let origin = Sample::new(latitude, longitude);

        let mut hits: Vec<usize> = self
            .tree
            .locate_within_distance(
                [longitude * self.lng_scale, latitude],
                radius_deg * radius_deg,
            )
            .filter(|p| {
                let candidate = Sample::new(p.data.latitude, p.data.longitude);
                haversine_distance(&origin, &candidate) <= radius_meters
            })
            .map(|p| p.data.index)
            .collect();
        hits.sort_unstable();
        hits
    }
}
