//! Explicit classification for dashboard display.
//!
//! Speed color bands and table column categories are decided by
//! enumerated rules so the same input always lands in the same bucket.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Speed band used for color-coding route segments and markers.
///
/// A sample without a reported speed is [`SpeedBand::Unknown`], never
/// [`SpeedBand::Stopped`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpeedBand {
    Unknown,
    Stopped,
    /// Under 20 km/h
    Slow,
    /// 20 to 60 km/h
    Moderate,
    /// 60 km/h and above
    Fast,
}

impl SpeedBand {
    pub const SLOW_LIMIT_KMH: f64 = 20.0;
    pub const MODERATE_LIMIT_KMH: f64 = 60.0;

    pub fn from_speed(speed: Option<f64>) -> Self {
        match speed {
            Some(s) if !s.is_finite() || s < 0.0 => SpeedBand::Unknown,
            Some(s) if s == 0.0 => SpeedBand::Stopped,
            Some(s) if s < Self::SLOW_LIMIT_KMH => SpeedBand::Slow,
            Some(s) if s < Self::MODERATE_LIMIT_KMH => SpeedBand::Moderate,
            Some(_) => SpeedBand::Fast,
            None => SpeedBand::Unknown,
        }
    }
}

impl fmt::Display for SpeedBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeedBand::Unknown => write!(f, "unknown"),
            SpeedBand::Stopped => write!(f, "stopped"),
            SpeedBand::Slow => write!(f, "slow"),
            SpeedBand::Moderate => write!(f, "moderate"),
            SpeedBand::Fast => write!(f, "fast"),
        }
    }
}

/// Category of a raw value shown in a dashboard table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueCategory {
    Empty,
    Boolean,
    /// Device/connection status words such as `online` or `idle`
    Status,
    Timestamp,
    /// A `lat,lon` pair
    Coordinate,
    /// A number followed by `%`, e.g. battery level
    Percentage,
    Numeric,
    Text,
}

const STATUS_WORDS: &[&str] = &[
    "online", "offline", "active", "inactive", "idle", "moving", "stopped", "parked", "charging",
    "connected", "disconnected", "unknown",
];

impl ValueCategory {
    /// Classify a single raw value. Rules are checked in declaration order.
    pub fn classify(raw: &str) -> Self {
        let value = raw.trim();
        if value.is_empty() {
            return ValueCategory::Empty;
        }

        let lower = value.to_ascii_lowercase();
        if lower == "true" || lower == "false" {
            return ValueCategory::Boolean;
        }
        if STATUS_WORDS.contains(&lower.as_str()) {
            return ValueCategory::Status;
        }
        if is_timestamp(value) {
            return ValueCategory::Timestamp;
        }
        if is_coordinate(value) {
            return ValueCategory::Coordinate;
        }
        if let Some(number) = value.strip_suffix('%') {
            if number.trim().parse::<f64>().is_ok_and(f64::is_finite) {
                return ValueCategory::Percentage;
            }
        }
        if value.parse::<f64>().is_ok_and(f64::is_finite) {
            return ValueCategory::Numeric;
        }
        ValueCategory::Text
    }

    /// Category shared by every non-empty value in a column.
    ///
    /// Mixed columns are [`ValueCategory::Text`]; all-empty columns are
    /// [`ValueCategory::Empty`].
    pub fn classify_column<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut category = ValueCategory::Empty;
        for value in values {
            match (category, Self::classify(value)) {
                (_, ValueCategory::Empty) => {}
                (ValueCategory::Empty, next) => category = next,
                (current, next) if current == next => {}
                _ => return ValueCategory::Text,
            }
        }
        category
    }
}

fn is_timestamp(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f").is_ok()
        || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

fn is_coordinate(value: &str) -> bool {
    let Some((lat, lon)) = value.split_once(',') else {
        return false;
    };
    match (lat.trim().parse::<f64>(), lon.trim().parse::<f64>()) {
        (Ok(lat), Ok(lon)) => (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_bands() {
        assert_eq!(SpeedBand::from_speed(None), SpeedBand::Unknown);
        assert_eq!(SpeedBand::from_speed(Some(0.0)), SpeedBand::Stopped);
        assert_eq!(SpeedBand::from_speed(Some(5.0)), SpeedBand::Slow);
        assert_eq!(SpeedBand::from_speed(Some(20.0)), SpeedBand::Moderate);
        assert_eq!(SpeedBand::from_speed(Some(60.0)), SpeedBand::Fast);
        assert_eq!(SpeedBand::from_speed(Some(-1.0)), SpeedBand::Unknown);
        assert_eq!(SpeedBand::from_speed(Some(f64::NAN)), SpeedBand::Unknown);
    }

    #[test]
    fn test_classify_values() {
        assert_eq!(ValueCategory::classify("  "), ValueCategory::Empty);
        assert_eq!(ValueCategory::classify("TRUE"), ValueCategory::Boolean);
        assert_eq!(ValueCategory::classify("Online"), ValueCategory::Status);
        assert_eq!(ValueCategory::classify("2024-05-01T08:00:00Z"), ValueCategory::Timestamp);
        assert_eq!(ValueCategory::classify("2024-05-01"), ValueCategory::Timestamp);
        assert_eq!(ValueCategory::classify("12.97, 77.59"), ValueCategory::Coordinate);
        assert_eq!(ValueCategory::classify("87%"), ValueCategory::Percentage);
        assert_eq!(ValueCategory::classify("42.5"), ValueCategory::Numeric);
        assert_eq!(ValueCategory::classify("NaN"), ValueCategory::Text);
        assert_eq!(ValueCategory::classify("Truck 7"), ValueCategory::Text);
    }

    #[test]
    fn test_out_of_range_pair_is_not_a_coordinate() {
        assert_eq!(ValueCategory::classify("120,10"), ValueCategory::Text);
    }

    #[test]
    fn test_classify_column() {
        assert_eq!(
            ValueCategory::classify_column(["12", "", "13.5"]),
            ValueCategory::Numeric
        );
        assert_eq!(
            ValueCategory::classify_column(["12", "idle"]),
            ValueCategory::Text
        );
        assert_eq!(ValueCategory::classify_column(["", " "]), ValueCategory::Empty);
    }
}
