//! Path reduction and marker selection for map rendering.
//!
//! Large journeys are cut down to a bounded number of points before they
//! reach the map layer:
//!
//! - [`simplify_path`] picks an evenly strided subsequence for the route line
//! - [`select_markers`] picks a bounded set of waypoint pins the same way
//! - [`simplify_path_with_tolerance`] runs Douglas-Peucker first, then caps
//! - [`cluster_markers`] groups samples into grid cells for pin clustering
//!
//! Stride reductions keep the first and last sample so the start and end of
//! the journey stay visible; the Douglas-Peucker variant keeps the first and
//! last valid sample. All functions are pure and deterministic.

use std::collections::HashMap;

use geo::{algorithm::simplify::SimplifyIdx, Coord, LineString};
use log::debug;

use crate::error::{AnalyticsError, Result};
use crate::{ReductionConfig, Sample};

// ============================================================================
// Stride Sampling
// ============================================================================

/// Reduce a journey to at most `max_points` samples for drawing the route line.
///
/// Returns a copy of the input when it already fits. Otherwise samples every
/// `ceil(len / max_points)`-th point and forces the final sample in.
///
/// # Errors
///
/// [`AnalyticsError::InvalidBudget`] when `max_points` is 0.
///
/// # Example
/// ```
/// use journey_analytics::{Sample, simplify_path};
///
/// let journey: Vec<Sample> = (0..1000).map(|i| Sample::new(0.0, i as f64 * 0.001)).collect();
/// let path = simplify_path(&journey, 100).unwrap();
/// assert_eq!(path.len(), 100);
/// assert_eq!(path[0], journey[0]);
/// assert_eq!(path[99], journey[999]);
/// ```
pub fn simplify_path(samples: &[Sample], max_points: usize) -> Result<Vec<Sample>> {
    stride_select(samples, max_points, "max_points")
}

/// Choose at most `max_markers` samples to pin on the map.
///
/// Uses the same stride policy as [`simplify_path`]; first and last sample
/// are kept whenever the budget allows two markers.
///
/// # Errors
///
/// [`AnalyticsError::InvalidBudget`] when `max_markers` is 0.
pub fn select_markers(samples: &[Sample], max_markers: usize) -> Result<Vec<Sample>> {
    stride_select(samples, max_markers, "max_markers")
}

fn stride_select(
    samples: &[Sample],
    budget: usize,
    parameter: &'static str,
) -> Result<Vec<Sample>> {
    if budget == 0 {
        return Err(AnalyticsError::InvalidBudget {
            parameter,
            value: budget,
        });
    }

    let indices = stride_indices(samples.len(), budget);
    if indices.len() < samples.len() {
        debug!(
            "Reduced {} samples to {} ({} = {})",
            samples.len(),
            indices.len(),
            parameter,
            budget
        );
    }
    Ok(indices.into_iter().map(|i| samples[i].clone()).collect())
}

/// Indices of an evenly strided subsequence of `0..len` with at most `budget`
/// entries, always starting at 0 and, for budgets of 2 or more, ending at `len - 1`.
pub(crate) fn stride_indices(len: usize, budget: usize) -> Vec<usize> {
    if len <= budget {
        return (0..len).collect();
    }
    if budget <= 1 {
        // Not enough room for both ends; the start wins.
        return vec![0];
    }

    let stride = len.div_ceil(budget);
    let mut indices: Vec<usize> = (0..len).step_by(stride).take(budget).collect();

    let last = len - 1;
    if indices.last() != Some(&last) {
        if indices.len() == budget {
            indices.pop();
        }
        indices.push(last);
    }
    indices
}

// ============================================================================
// Douglas-Peucker
// ============================================================================

/// Simplify a journey with Douglas-Peucker, then cap it at `max_path_points`.
///
/// Samples with invalid coordinates are dropped before simplification, so the
/// kept endpoints are the first and last *valid* samples: an invalid leading
/// or trailing sample never reaches the map. The returned samples are the
/// original ones (timestamps and speeds intact).
pub fn simplify_path_with_tolerance(
    samples: &[Sample],
    config: &ReductionConfig,
) -> Result<Vec<Sample>> {
    config.validate()?;

    let valid: Vec<&Sample> = samples.iter().filter(|s| s.is_valid()).collect();
    let kept: Vec<usize> = if valid.len() < 3 {
        (0..valid.len()).collect()
    } else {
        let line: LineString = valid
            .iter()
            .map(|s| Coord {
                x: s.longitude,
                y: s.latitude,
            })
            .collect();
        line.simplify_idx(&config.simplification_tolerance)
    };
    debug!(
        "Douglas-Peucker kept {} of {} valid samples (tolerance {})",
        kept.len(),
        valid.len(),
        config.simplification_tolerance
    );

    Ok(stride_indices(kept.len(), config.max_path_points)
        .into_iter()
        .map(|i| valid[kept[i]].clone())
        .collect())
}

// ============================================================================
// Grid Clustering
// ============================================================================

/// A group of nearby samples shown as a single pin.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerCluster {
    /// Mean latitude of the members
    pub center_lat: f64,
    /// Mean longitude of the members
    pub center_lng: f64,
    /// Number of samples in the cluster
    pub count: usize,
    /// Index (in the input journey) of the earliest member
    pub first_index: usize,
    /// Index of the latest member
    pub last_index: usize,
    /// The earliest member, used for tooltips
    pub representative: Sample,
}

#[derive(Debug)]
struct ClusterBuilder {
    sum_lat: f64,
    sum_lng: f64,
    count: usize,
    first_index: usize,
    last_index: usize,
}

/// Grid coordinate
type CellCoord = (i64, i64);

/// Square grid anchored at the latitude of the first valid sample.
struct ClusterGrid {
    cell_size_meters: f64,
    lat_meters_per_deg: f64,
    lng_meters_per_deg: f64,
}

impl ClusterGrid {
    fn new(cell_size_meters: f64, ref_lat: f64) -> Self {
        let lat_meters_per_deg = 111_320.0;
        // Keep longitude cells finite near the poles
        let lng_meters_per_deg = 111_320.0 * ref_lat.to_radians().cos().max(0.01);
        Self {
            cell_size_meters,
            lat_meters_per_deg,
            lng_meters_per_deg,
        }
    }

    fn cell_of(&self, lat: f64, lng: f64) -> CellCoord {
        let row = (lat * self.lat_meters_per_deg / self.cell_size_meters).floor() as i64;
        let col = (lng * self.lng_meters_per_deg / self.cell_size_meters).floor() as i64;
        (row, col)
    }
}

/// Group samples that fall into the same `cell_size_meters` grid cell.
///
/// Clusters are returned in order of their first member. Invalid samples
/// are ignored.
///
/// # Errors
///
/// [`AnalyticsError::InvalidCellSize`] when the cell size is not positive and finite.
pub fn cluster_markers(samples: &[Sample], cell_size_meters: f64) -> Result<Vec<MarkerCluster>> {
    if !cell_size_meters.is_finite() || cell_size_meters <= 0.0 {
        return Err(AnalyticsError::InvalidCellSize(cell_size_meters));
    }

    let Some(anchor) = samples.iter().find(|s| s.is_valid()) else {
        return Ok(Vec::new());
    };
    let grid = ClusterGrid::new(cell_size_meters, anchor.latitude);

    let mut cells: HashMap<CellCoord, ClusterBuilder> = HashMap::new();
    for (i, s) in samples.iter().enumerate().filter(|(_, s)| s.is_valid()) {
        let cell = cells
            .entry(grid.cell_of(s.latitude, s.longitude))
            .or_insert(ClusterBuilder {
                sum_lat: 0.0,
                sum_lng: 0.0,
                count: 0,
                first_index: i,
                last_index: i,
            });
        cell.sum_lat += s.latitude;
        cell.sum_lng += s.longitude;
        cell.count += 1;
        cell.last_index = i;
    }

    let mut clusters: Vec<MarkerCluster> = cells
        .into_values()
        .map(|b| MarkerCluster {
            center_lat: b.sum_lat / b.count as f64,
            center_lng: b.sum_lng / b.count as f64,
            count: b.count,
            first_index: b.first_index,
            last_index: b.last_index,
            representative: samples[b.first_index].clone(),
        })
        .collect();
    clusters.sort_by_key(|c| c.first_index);

    debug!(
        "Clustered {} samples into {} cells of {}m",
        samples.len(),
        clusters.len(),
        cell_size_meters
    );
    Ok(clusters)
}
