//! Journey map view.
//!
//! One configurable view replaces the per-variant journey maps. Drawing is
//! delegated to a [`MapRenderer`] supplied by the host (a Leaflet bridge, a
//! tile renderer, a test recorder), so the statistics and reduction logic
//! never touch a map library directly.
//!
//! ```
//! use journey_analytics::{
//!     Bounds, JourneyMapView, MapRenderer, MapViewOptions, Marker, PathStyle, Sample,
//! };
//!
//! #[derive(Default)]
//! struct Counter { points: usize, markers: usize }
//!
//! impl MapRenderer for Counter {
//!     fn draw_path(&mut self, path: &[Sample], _style: &PathStyle) { self.points = path.len(); }
//!     fn set_markers(&mut self, markers: &[Marker]) { self.markers = markers.len(); }
//!     fn fit_bounds(&mut self, _bounds: Bounds) {}
//! }
//!
//! let journey: Vec<Sample> = (0..10)
//!     .map(|i| Sample::new(12.97, 77.59 + i as f64 * 0.01))
//!     .collect();
//! let view = JourneyMapView::new(MapViewOptions::default()).unwrap();
//! let mut counter = Counter::default();
//! let stats = view.render(&journey, &mut counter).unwrap();
//! assert_eq!(stats.markers, counter.markers);
//! ```

use log::debug;

use crate::classify::SpeedBand;
use crate::error::Result;
use crate::reduction::{select_markers, simplify_path, simplify_path_with_tolerance};
use crate::{Bounds, ReductionConfig, Sample};

// ============================================================================
// Rendering Capability
// ============================================================================

/// Drawing surface the map view renders into.
pub trait MapRenderer {
    /// Draw the route line. Called at most once per render.
    fn draw_path(&mut self, path: &[Sample], style: &PathStyle);

    /// Replace all markers on the map.
    fn set_markers(&mut self, markers: &[Marker]);

    /// Move the viewport so the bounds are visible.
    fn fit_bounds(&mut self, bounds: Bounds);
}

/// Visual variant of the journey map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MapStyle {
    /// Smoothed single-color route
    #[default]
    Clean,
    /// Every strided sample, colored by speed
    Detailed,
    /// Smoothed route colored by speed, thick line
    RideHailing,
}

impl MapStyle {
    fn path_style(self, animate: bool) -> PathStyle {
        match self {
            MapStyle::Clean => PathStyle {
                weight: 4.0,
                color_by_speed: false,
                animate,
            },
            MapStyle::Detailed => PathStyle {
                weight: 3.0,
                color_by_speed: true,
                animate,
            },
            MapStyle::RideHailing => PathStyle {
                weight: 6.0,
                color_by_speed: true,
                animate,
            },
        }
    }

    /// Whether the route line is smoothed with Douglas-Peucker before capping.
    fn smooths_path(self) -> bool {
        !matches!(self, MapStyle::Detailed)
    }
}

/// How the route line should be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStyle {
    /// Line width in pixels
    pub weight: f32,
    /// Color segments by [`SpeedBand`] instead of a single color
    pub color_by_speed: bool,
    /// Animate the line being drawn from start to end
    pub animate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Start,
    End,
    Waypoint,
}

/// A pin on the journey map.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub sample: Sample,
    pub speed_band: SpeedBand,
}

impl Marker {
    fn new(kind: MarkerKind, sample: Sample) -> Self {
        let speed_band = SpeedBand::from_speed(sample.speed);
        Self {
            kind,
            sample,
            speed_band,
        }
    }
}

// ============================================================================
// Map View
// ============================================================================

/// Options for [`JourneyMapView`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapViewOptions {
    /// Default: [`MapStyle::Clean`]
    pub style: MapStyle,
    /// Pin intermediate waypoints besides start and end. Default: true
    pub show_waypoints: bool,
    /// Default: false
    pub animate: bool,
    pub reduction: ReductionConfig,
}

impl Default for MapViewOptions {
    fn default() -> Self {
        Self {
            style: MapStyle::Clean,
            show_waypoints: true,
            animate: false,
            reduction: ReductionConfig::default(),
        }
    }
}

/// What a render call produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    pub input_samples: usize,
    /// Samples left out because their coordinates were invalid
    pub skipped_samples: usize,
    pub drawn_points: usize,
    pub markers: usize,
}

impl RenderStats {
    /// True when nothing was drawn and the host should show its "no data" state.
    pub fn is_empty(&self) -> bool {
        self.drawn_points == 0
    }
}

/// Renderer-agnostic journey map.
#[derive(Debug, Clone)]
pub struct JourneyMapView {
    options: MapViewOptions,
}

impl JourneyMapView {
    pub fn new(options: MapViewOptions) -> Result<Self> {
        options.reduction.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &MapViewOptions {
        &self.options
    }

    /// Render a journey: fit bounds, draw the reduced path, then set markers.
    ///
    /// A journey without valid samples renders nothing.
    pub fn render<R>(&self, samples: &[Sample], renderer: &mut R) -> Result<RenderStats>
    where
        R: MapRenderer + ?Sized,
    {
        let valid: Vec<Sample> = samples.iter().filter(|s| s.is_valid()).cloned().collect();
        let mut stats = RenderStats {
            input_samples: samples.len(),
            skipped_samples: samples.len() - valid.len(),
            ..RenderStats::default()
        };

        let Some(bounds) = Bounds::from_samples(&valid) else {
            debug!("No valid samples among {}; nothing to render", samples.len());
            return Ok(stats);
        };

        let reduction = &self.options.reduction;
        let path = if self.options.style.smooths_path() {
            simplify_path_with_tolerance(&valid, reduction)?
        } else {
            simplify_path(&valid, reduction.max_path_points)?
        };
        let markers = self.build_markers(&valid)?;

        renderer.fit_bounds(bounds);
        renderer.draw_path(&path, &self.options.style.path_style(self.options.animate));
        renderer.set_markers(&markers);

        stats.drawn_points = path.len();
        stats.markers = markers.len();
        debug!(
            "Rendered {:?} map: {} points, {} markers ({} samples skipped)",
            self.options.style, stats.drawn_points, stats.markers, stats.skipped_samples
        );
        Ok(stats)
    }

    /// Start and end markers plus, when enabled, strided waypoints between them.
    ///
    /// The waypoint selection shares the `max_markers` budget with the
    /// endpoints, so the total never exceeds it.
    fn build_markers(&self, valid: &[Sample]) -> Result<Vec<Marker>> {
        let budget = self.options.reduction.max_markers;
        let selected = if self.options.show_waypoints {
            select_markers(valid, budget)?
        } else {
            select_markers(valid, budget.min(2))?
        };

        let last = selected.len().saturating_sub(1);
        Ok(selected
            .into_iter()
            .enumerate()
            .map(|(i, sample)| {
                let kind = match i {
                    0 => MarkerKind::Start,
                    i if i == last => MarkerKind::End,
                    _ => MarkerKind::Waypoint,
                };
                Marker::new(kind, sample)
            })
            .collect())
    }
}
