//! Journey statistics.
//!
//! Aggregates an ordered journey into a [`JourneySummary`]: haversine
//! distance, duration between the first and last sample, stop count, and
//! average/max speed. Malformed samples degrade the result instead of
//! failing it; the number of skipped distance segments is reported so the
//! caller can flag the journey.

use log::{debug, warn};

use crate::geo_utils::segment_distance_km;
use crate::Sample;

/// Aggregate metrics for one journey.
///
/// Derived and immutable: recompute from the samples instead of patching it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JourneySummary {
    /// Sum of haversine distances between consecutive samples, in km
    pub total_distance_km: f64,
    /// Last minus first timestamp in minutes; `None` if either is missing or unparsable
    pub duration_minutes: Option<f64>,
    /// Samples with a reported speed of exactly 0
    pub stop_count: usize,
    /// Mean of all reported speeds (km/h), zeros included
    pub average_speed: f64,
    /// Highest reported speed (km/h), 0 when none reported
    pub max_speed: f64,
    /// Number of samples in the journey
    pub sample_count: usize,
    /// Number of samples that carried a usable speed
    pub speed_sample_count: usize,
    /// Consecutive pairs skipped because a sample had invalid coordinates
    pub skipped_segments: usize,
}

impl JourneySummary {
    /// True when any distance segment had to be skipped.
    pub fn has_data_quality_issues(&self) -> bool {
        self.skipped_segments > 0
    }

    /// Average speed rounded to one decimal, for display.
    pub fn display_average_speed(&self) -> f64 {
        (self.average_speed * 10.0).round() / 10.0
    }
}

/// Compute the summary of a journey.
///
/// # Example
/// ```
/// use journey_analytics::{Sample, compute_journey_summary};
///
/// let journey: Vec<Sample> = (0..5)
///     .map(|i| Sample::new(0.0, i as f64 * 0.01).with_speed(0.0))
///     .collect();
/// let summary = compute_journey_summary(&journey);
/// assert_eq!(summary.stop_count, 5);
/// assert_eq!(summary.average_speed, 0.0);
/// assert_eq!(summary.max_speed, 0.0);
/// ```
pub fn compute_journey_summary(samples: &[Sample]) -> JourneySummary {
    let mut segments: Vec<f64> = Vec::with_capacity(samples.len().saturating_sub(1));
    let mut skipped_segments = 0;
    for w in samples.windows(2) {
        match segment_distance_km(&w[0], &w[1]) {
            Some(d) => segments.push(d),
            None => skipped_segments += 1,
        }
    }
    // Summation order must not depend on travel direction, so a reversed
    // journey yields the same bits.
    segments.sort_by(f64::total_cmp);
    let total_distance_km: f64 = segments.iter().sum();
    if skipped_segments > 0 {
        warn!(
            "Skipped {} of {} segments with invalid coordinates",
            skipped_segments,
            samples.len().saturating_sub(1)
        );
    }

    let mut stop_count = 0;
    let mut speed_sum = 0.0;
    let mut speed_sample_count = 0;
    let mut max_speed: f64 = 0.0;
    for speed in samples.iter().filter_map(Sample::valid_speed) {
        if speed == 0.0 {
            stop_count += 1;
        }
        speed_sum += speed;
        speed_sample_count += 1;
        max_speed = max_speed.max(speed);
    }
    let average_speed = if speed_sample_count > 0 {
        speed_sum / speed_sample_count as f64
    } else {
        0.0
    };

    let summary = JourneySummary {
        total_distance_km,
        duration_minutes: journey_duration_minutes(samples),
        stop_count,
        average_speed,
        max_speed,
        sample_count: samples.len(),
        speed_sample_count,
        skipped_segments,
    };

    debug!(
        "Summarized {} samples: {:.2} km, {:?} min, {} stops",
        summary.sample_count,
        summary.total_distance_km,
        summary.duration_minutes,
        summary.stop_count
    );

    summary
}

/// Minutes between the first and last sample, ignoring everything in between.
fn journey_duration_minutes(samples: &[Sample]) -> Option<f64> {
    let (first, last) = (samples.first()?, samples.last()?);
    let start = first.time();
    let end = last.time();

    match (start, end) {
        (Some(start), Some(end)) => {
            let millis = (end - start).num_milliseconds();
            Some(millis as f64 / 60_000.0)
        }
        _ => {
            if (first.timestamp.is_some() && start.is_none())
                || (last.timestamp.is_some() && end.is_none())
            {
                warn!("Journey endpoint timestamp could not be parsed; duration unavailable");
            }
            None
        }
    }
}

/// Summarize many journeys at once.
///
/// Output order matches input order. With the `parallel` feature the work
/// is spread over the rayon thread pool.
pub fn summarize_journeys(journeys: &[Vec<Sample>]) -> Vec<JourneySummary> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        journeys
            .par_iter()
            .map(|j| compute_journey_summary(j))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        journeys.iter().map(|j| compute_journey_summary(j)).collect()
    }
}
