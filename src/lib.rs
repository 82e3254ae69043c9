//! # Journey Analytics
//!
//! Journey statistics and path reduction for device-tracking dashboards.
//!
//! This library provides:
//! - Journey summaries (haversine distance, duration, stops, average/max speed)
//! - Stride-based path reduction and marker selection for map rendering
//! - Grid marker clustering and nearest-sample lookup
//! - A renderer-agnostic journey map view driven through the [`MapRenderer`] trait
//!
//! ## Features
//!
//! - **`parallel`** - Summarize many journeys in parallel with rayon
//! - **`serde`** - Serialize/deserialize samples, summaries and config
//! - **`full`** - Enable all features
//!
//! ## Quick Start
//!
//! ```rust
//! use journey_analytics::{Sample, compute_journey_summary, simplify_path};
//!
//! let journey = vec![
//!     Sample::new(0.0, 0.0).with_speed(40.0).with_timestamp("2024-05-01T08:00:00Z"),
//!     Sample::new(0.0, 1.0).with_speed(0.0),
//!     Sample::new(0.0, 2.0).with_speed(55.0).with_timestamp("2024-05-01T11:00:00Z"),
//! ];
//!
//! let summary = compute_journey_summary(&journey);
//! assert!((summary.total_distance_km - 222.4).abs() < 0.5);
//! assert_eq!(summary.duration_minutes, Some(180.0));
//! assert_eq!(summary.stop_count, 1);
//!
//! let path = simplify_path(&journey, 2).unwrap();
//! assert_eq!(path.len(), 2);
//! ```

use chrono::{DateTime, NaiveDateTime, Utc};

// Unified error handling
pub mod error;
pub use error::{AnalyticsError, Result};

// Geographic utilities (distance, bounds, center calculations)
pub mod geo_utils;

// Journey statistics
pub mod summary;
pub use summary::{compute_journey_summary, summarize_journeys, JourneySummary};

// Path reduction and marker selection
pub mod reduction;
pub use reduction::{
    cluster_markers, select_markers, simplify_path, simplify_path_with_tolerance, MarkerCluster,
};

// Explicit display classification (speed bands, column value categories)
pub mod classify;
pub use classify::{SpeedBand, ValueCategory};

// Nearest-sample lookup for hover/tap
pub mod spatial;
pub use spatial::SampleIndex;

// Map rendering capability and the consolidated journey map view
pub mod render;
pub use render::{
    JourneyMapView, MapRenderer, MapStyle, MapViewOptions, Marker, MarkerKind, PathStyle,
    RenderStats,
};

// ============================================================================
// Core Types
// ============================================================================

/// Timestamp attached to a telemetry sample.
///
/// The analytics backend delivers either ISO-8601 strings or epoch
/// milliseconds, so both are kept as received and parsed on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Timestamp {
    /// Milliseconds since the Unix epoch
    EpochMillis(i64),
    /// ISO-8601 / RFC 3339 string, e.g. `2024-05-01T08:00:00Z`
    Iso8601(String),
}

impl Timestamp {
    /// Parse into a UTC instant. Returns `None` when the value is unparsable.
    ///
    /// ISO strings without an offset are read as UTC.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Timestamp::EpochMillis(ms) => DateTime::from_timestamp_millis(*ms),
            Timestamp::Iso8601(raw) => {
                let raw = raw.trim();
                if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
                    return Some(dt.with_timezone(&Utc));
                }
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                    .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
                    .ok()
                    .map(|naive| naive.and_utc())
            }
        }
    }
}

impl From<i64> for Timestamp {
    fn from(ms: i64) -> Self {
        Timestamp::EpochMillis(ms)
    }
}

impl From<&str> for Timestamp {
    fn from(raw: &str) -> Self {
        Timestamp::Iso8601(raw.to_string())
    }
}

impl From<String> for Timestamp {
    fn from(raw: String) -> Self {
        Timestamp::Iso8601(raw)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Timestamp::EpochMillis(dt.timestamp_millis())
    }
}

/// One telemetry observation for a tracked device.
///
/// # Example
/// ```
/// use journey_analytics::Sample;
/// let sample = Sample::new(51.5074, -0.1278).with_speed(32.5);
/// assert!(sample.is_valid());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    pub latitude: f64,
    pub longitude: f64,
    /// Absent when the device did not report a time
    #[cfg_attr(feature = "serde", serde(default))]
    pub timestamp: Option<Timestamp>,
    /// Speed in km/h. `None` means "not reported", which is not the same as stopped.
    #[cfg_attr(feature = "serde", serde(default))]
    pub speed: Option<f64>,
}

impl Sample {
    /// Create a sample with coordinates only.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            timestamp: None,
            speed: None,
        }
    }

    /// Attach a speed in km/h.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Attach a timestamp (ISO string, epoch millis or `DateTime<Utc>`).
    pub fn with_timestamp(mut self, timestamp: impl Into<Timestamp>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Check if the sample has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }

    /// Reported speed, if it is a usable (finite, non-negative) value.
    pub fn valid_speed(&self) -> Option<f64> {
        self.speed.filter(|s| s.is_finite() && *s >= 0.0)
    }

    /// Parsed timestamp, if present and parsable.
    pub fn time(&self) -> Option<DateTime<Utc>> {
        self.timestamp.as_ref().and_then(Timestamp::to_datetime)
    }
}

/// Bounding box for a journey.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Create bounds from the valid samples of a journey.
    ///
    /// Returns `None` if no sample has valid coordinates.
    pub fn from_samples(samples: &[Sample]) -> Option<Self> {
        let mut valid = samples.iter().filter(|s| s.is_valid()).peekable();
        valid.peek()?;

        let mut bounds = Self {
            min_lat: f64::MAX,
            max_lat: f64::MIN,
            min_lng: f64::MAX,
            max_lng: f64::MIN,
        };
        for s in valid {
            bounds.min_lat = bounds.min_lat.min(s.latitude);
            bounds.max_lat = bounds.max_lat.max(s.latitude);
            bounds.min_lng = bounds.min_lng.min(s.longitude);
            bounds.max_lng = bounds.max_lng.max(s.longitude);
        }
        Some(bounds)
    }

    /// Get the center point of the bounds as `(latitude, longitude)`.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    /// Check whether a coordinate lies inside the bounds (inclusive).
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        latitude >= self.min_lat
            && latitude <= self.max_lat
            && longitude >= self.min_lng
            && longitude <= self.max_lng
    }
}

/// Configuration for path reduction and marker selection.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReductionConfig {
    /// Maximum number of points drawn for the route line.
    /// Default: 500
    pub max_path_points: usize,

    /// Maximum number of waypoint markers.
    /// Default: 50
    pub max_markers: usize,

    /// Tolerance for Douglas-Peucker simplification (in degrees).
    /// Smaller values preserve more detail. Default: 0.0001 (~11 meters)
    pub simplification_tolerance: f64,

    /// Grid cell size for marker clustering, in meters.
    /// Default: 250.0
    pub cluster_cell_meters: f64,
}

impl Default for ReductionConfig {
    fn default() -> Self {
        Self {
            max_path_points: 500,
            max_markers: 50,
            simplification_tolerance: 0.0001,
            cluster_cell_meters: 250.0,
        }
    }
}

impl ReductionConfig {
    /// Reject budgets and tolerances that would produce empty or unbounded output.
    pub fn validate(&self) -> Result<()> {
        if self.max_path_points == 0 {
            return Err(AnalyticsError::InvalidBudget {
                parameter: "max_path_points",
                value: 0,
            });
        }
        if self.max_markers == 0 {
            return Err(AnalyticsError::InvalidBudget {
                parameter: "max_markers",
                value: 0,
            });
        }
        if !self.simplification_tolerance.is_finite() || self.simplification_tolerance < 0.0 {
            return Err(AnalyticsError::InvalidConfig(format!(
                "simplification_tolerance must be a finite, non-negative number of degrees (got {})",
                self.simplification_tolerance
            )));
        }
        if !self.cluster_cell_meters.is_finite() || self.cluster_cell_meters <= 0.0 {
            return Err(AnalyticsError::InvalidCellSize(self.cluster_cell_meters));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
