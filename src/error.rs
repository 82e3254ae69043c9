//! Error types.
//!
//! Only caller mistakes (bad budgets, bad configuration) are errors.
//! Data-quality problems inside a journey degrade the result instead.

use thiserror::Error;

/// Errors returned by journey analytics operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyticsError {
    /// A point or marker budget that cannot produce a bounded, non-empty result.
    #[error("invalid {parameter}: {value} (must be at least 1)")]
    InvalidBudget {
        parameter: &'static str,
        value: usize,
    },

    /// Grid cell size for marker clustering is not a positive, finite length.
    #[error("invalid cluster cell size: {0} meters")]
    InvalidCellSize(f64),

    /// Any other configuration value out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AnalyticsError::InvalidBudget {
            parameter: "max_points",
            value: 0,
        };
        assert!(err.to_string().contains("max_points"));
        assert!(err.to_string().contains("at least 1"));

        let err = AnalyticsError::InvalidCellSize(-5.0);
        assert!(err.to_string().contains("-5"));
    }
}
