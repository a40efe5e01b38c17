//! Error types for capcurve
//!
//! Errors can only arise while the static dataset is loaded and validated at
//! startup. The render-path API (interpolation, domain computation, jitter,
//! ticks, frontier lookup) is total: out-of-range dates clamp and missing
//! data degrades to documented fallbacks instead of surfacing errors.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// capcurve error types
#[derive(Error, Debug)]
pub enum Error {
    /// Metric series points are not strictly ascending by date
    #[error("metric series '{id}' is not strictly ascending by date at index {index}")]
    UnsortedSeries {
        /// Offending metric identifier
        id: String,
        /// Index of the first out-of-order point
        index: usize,
    },

    /// Metric series has no points
    #[error("metric series '{id}' has no points")]
    EmptySeries {
        /// Offending metric identifier
        id: String,
    },

    /// Frontier model entries are not ascending by effective date
    #[error("frontier timeline is not ascending by date at index {index}")]
    UnsortedTimeline {
        /// Index of the first out-of-order entry
        index: usize,
    },

    /// Two metrics in one dataset share an identifier
    #[error("duplicate metric id '{0}' in dataset")]
    DuplicateMetric(String),

    /// Dataset JSON parse error
    #[error("dataset parse error: {0}")]
    Json(#[from] serde_json::Error),
}
