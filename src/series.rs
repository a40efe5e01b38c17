//! Metric series store and date interpolation
//!
//! A [`MetricSeries`] is an immutable, chronologically sorted run of
//! `(date, value)` samples for one tracked metric (training compute in
//! log10 FLOP, a benchmark percentage, a capability index, a task duration
//! in minutes). Series are built once at startup from the static dataset
//! and never mutated; every other component holds read references.
//!
//! ## Timestamp cache
//!
//! Interpolation needs each sample date as an epoch-millisecond number.
//! That array is built lazily on the first [`MetricSeries::value_at`] call
//! and cached in a field owned by the series itself, so cache lifetime is
//! exactly the series lifetime and no identity-keyed side table is needed.
//! After the one-time O(n) build, every lookup is O(log n).

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Convert a calendar date to epoch milliseconds at midnight UTC.
pub(crate) fn epoch_ms(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

/// Identifier of a tracked metric (e.g. `"training_compute"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricId(String);

impl MetricId {
    /// View the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MetricId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for MetricId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for MetricId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unit of a series' stored values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueKind {
    /// Training compute stored as a log10 FLOP exponent
    Log10Flop,
    /// Benchmark score in percent
    Percentage,
    /// Dimensionless capability index
    Index,
    /// Autonomous task duration in minutes
    Minutes,
}

impl ValueKind {
    /// Convert a stored value to display-space units.
    ///
    /// `Log10Flop` series store exponents; the displayed quantity is the
    /// FLOP count itself. All other kinds are already in display units.
    #[must_use]
    pub fn display_value(self, value: f64) -> f64 {
        match self {
            Self::Log10Flop => 10f64.powf(value),
            Self::Percentage | Self::Index | Self::Minutes => value,
        }
    }

    /// Whether series of this kind anchor the axis domain by default.
    ///
    /// Compute-like quantities determine the axis range; overlay kinds
    /// rendered on the same axis do not.
    #[must_use]
    pub const fn anchors_domain_by_default(self) -> bool {
        matches!(self, Self::Log10Flop)
    }
}

/// A single dated sample within a metric series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricPoint {
    date: NaiveDate,
    value: f64,
}

impl MetricPoint {
    /// Create a new sample.
    #[must_use]
    pub const fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }

    /// Sample date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Sample value, in the owning series' [`ValueKind`] units.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }
}

/// An immutable, strictly-ascending-by-date run of metric samples.
///
/// # Example
///
/// ```rust
/// use capcurve::series::{MetricPoint, MetricSeries, ValueKind};
/// use chrono::NaiveDate;
///
/// let series = MetricSeries::new(
///     "training_compute",
///     ValueKind::Log10Flop,
///     vec![
///         MetricPoint::new(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(), 23.0),
///         MetricPoint::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 26.0),
///     ],
/// )?;
///
/// // Dates outside the sampled range clamp to the nearest endpoint.
/// let early = NaiveDate::from_ymd_opt(2015, 6, 1).unwrap();
/// assert!((series.value_at(early) - 23.0).abs() < f64::EPSILON);
/// # Ok::<(), capcurve::Error>(())
/// ```
#[derive(Debug)]
pub struct MetricSeries {
    id: MetricId,
    value_kind: ValueKind,
    anchors_domain: bool,
    points: Vec<MetricPoint>,
    /// Lazily built epoch-millisecond mirror of `points`, same order.
    timestamps: OnceLock<Vec<i64>>,
}

impl MetricSeries {
    /// Create a series from pre-validated static data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySeries`] for a zero-point list and
    /// [`Error::UnsortedSeries`] if dates are not strictly ascending.
    /// Static datasets are expected to satisfy both, so a failure here is
    /// a programming error in the dataset, not a runtime condition.
    pub fn new(
        id: impl Into<MetricId>,
        value_kind: ValueKind,
        points: Vec<MetricPoint>,
    ) -> Result<Self> {
        let id = id.into();
        if points.is_empty() {
            return Err(Error::EmptySeries {
                id: id.as_str().to_string(),
            });
        }
        for (index, pair) in points.windows(2).enumerate() {
            if pair[1].date <= pair[0].date {
                return Err(Error::UnsortedSeries {
                    id: id.as_str().to_string(),
                    index: index + 1,
                });
            }
        }
        Ok(Self {
            id,
            value_kind,
            anchors_domain: value_kind.anchors_domain_by_default(),
            points,
            timestamps: OnceLock::new(),
        })
    }

    /// Override whether this series anchors the axis domain.
    ///
    /// Construction-time flag; overlay metrics rendered on a shared axis
    /// set this to `false` so they never skew the computed domain.
    #[must_use]
    pub const fn with_domain_anchor(mut self, anchors_domain: bool) -> Self {
        self.anchors_domain = anchors_domain;
        self
    }

    /// Metric identifier.
    #[must_use]
    pub const fn id(&self) -> &MetricId {
        &self.id
    }

    /// Unit of the stored values.
    #[must_use]
    pub const fn value_kind(&self) -> ValueKind {
        self.value_kind
    }

    /// Whether this series participates in domain computation.
    #[must_use]
    pub const fn anchors_domain(&self) -> bool {
        self.anchors_domain
    }

    /// The ordered samples.
    #[must_use]
    pub fn points(&self) -> &[MetricPoint] {
        &self.points
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: construction rejects empty series.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Earliest sample date.
    #[must_use]
    pub fn min_date(&self) -> NaiveDate {
        self.points[0].date
    }

    /// Latest sample date.
    #[must_use]
    pub fn max_date(&self) -> NaiveDate {
        self.points[self.points.len() - 1].date
    }

    /// Smallest sample value over the full series.
    #[must_use]
    pub fn min_value(&self) -> f64 {
        self.points.iter().map(MetricPoint::value).fold(f64::INFINITY, f64::min)
    }

    /// Largest sample value over the full series.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.points
            .iter()
            .map(MetricPoint::value)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Epoch-millisecond timestamps, one per point, built on first use.
    fn timestamps(&self) -> &[i64] {
        self.timestamps
            .get_or_init(|| self.points.iter().map(|p| epoch_ms(p.date)).collect())
    }

    /// Value of the metric at an arbitrary date.
    ///
    /// Dates at or before the first sample return the first value; dates
    /// at or after the last sample return the last value. In between, the
    /// two bracketing samples are found by binary search and linearly
    /// interpolated. Clamping is deliberate policy: claims older or newer
    /// than the dataset still render sensibly.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // epoch ms values are far below 2^53
    pub fn value_at(&self, date: NaiveDate) -> f64 {
        let timestamps = self.timestamps();
        let t = epoch_ms(date);

        if t <= timestamps[0] {
            return self.points[0].value;
        }
        let last = timestamps.len() - 1;
        if t >= timestamps[last] {
            return self.points[last].value;
        }

        // Largest i with timestamps[i] <= t; the early returns above
        // guarantee 0 <= i < last.
        let i = timestamps.partition_point(|&ts| ts <= t) - 1;
        let t0 = timestamps[i] as f64;
        let t1 = timestamps[i + 1] as f64;
        let v0 = self.points[i].value;
        let v1 = self.points[i + 1].value;
        v0 + (t as f64 - t0) / (t1 - t0) * (v1 - v0)
    }

    /// Interpolated value rescaled to `[0, 1]` by the full-series range.
    ///
    /// Used for non-domain-critical overlays. The rescale always uses the
    /// whole series' min/max, never the visible range, so overlay shapes
    /// stay put while the axis domain changes underneath them. A
    /// value-constant series maps everywhere to `0.5`.
    #[must_use]
    pub fn normalized_value_at(&self, date: NaiveDate) -> f64 {
        let min = self.min_value();
        let span = self.max_value() - min;
        if span <= 0.0 {
            return 0.5;
        }
        ((self.value_at(date) - min) / span).clamp(0.0, 1.0)
    }
}

/// Owner of all metric series, keyed by identifier.
///
/// Populated once at startup from the static dataset; read-only afterwards.
#[derive(Debug, Default)]
pub struct SeriesStore {
    series: HashMap<MetricId, MetricSeries>,
}

impl SeriesStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a series to the store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateMetric`] if a series with the same id is
    /// already present.
    pub fn insert(&mut self, series: MetricSeries) -> Result<()> {
        if self.series.contains_key(series.id().as_str()) {
            return Err(Error::DuplicateMetric(series.id().as_str().to_string()));
        }
        self.series.insert(series.id().clone(), series);
        Ok(())
    }

    /// Look up a series by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&MetricSeries> {
        self.series.get(id)
    }

    /// Number of series in the store.
    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Whether the store holds no series.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Iterate over all series in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &MetricSeries> {
        self.series.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn compute_series() -> MetricSeries {
        MetricSeries::new(
            "training_compute",
            ValueKind::Log10Flop,
            vec![
                MetricPoint::new(date(2018, 1, 1), 21.0),
                MetricPoint::new(date(2020, 1, 1), 23.0),
                MetricPoint::new(date(2022, 1, 1), 24.5),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_construction_rejects_empty() {
        let err = MetricSeries::new("x", ValueKind::Index, vec![]).unwrap_err();
        assert!(matches!(err, Error::EmptySeries { .. }));
    }

    #[test]
    fn test_construction_rejects_unsorted() {
        let err = MetricSeries::new(
            "x",
            ValueKind::Index,
            vec![
                MetricPoint::new(date(2021, 1, 1), 1.0),
                MetricPoint::new(date(2020, 1, 1), 2.0),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnsortedSeries { index: 1, .. }));
    }

    #[test]
    fn test_construction_rejects_duplicate_dates() {
        let err = MetricSeries::new(
            "x",
            ValueKind::Index,
            vec![
                MetricPoint::new(date(2020, 1, 1), 1.0),
                MetricPoint::new(date(2020, 1, 1), 2.0),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnsortedSeries { index: 1, .. }));
    }

    #[test]
    fn test_value_at_exact_hits() {
        let series = compute_series();
        for point in series.points() {
            assert!((series.value_at(point.date()) - point.value()).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_value_at_clamps_outside_range() {
        let series = compute_series();
        assert!((series.value_at(date(2000, 1, 1)) - 21.0).abs() < f64::EPSILON);
        assert!((series.value_at(date(2030, 1, 1)) - 24.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_value_at_midpoint_interpolates() {
        let series = MetricSeries::new(
            "mid",
            ValueKind::Index,
            vec![
                MetricPoint::new(date(2020, 1, 1), 0.0),
                MetricPoint::new(date(2020, 1, 11), 10.0),
            ],
        )
        .unwrap();
        let got = series.value_at(date(2020, 1, 6));
        assert!((got - 5.0).abs() < 1e-9, "got {got}");
    }

    #[test]
    fn test_single_point_series_is_constant() {
        let series = MetricSeries::new(
            "one",
            ValueKind::Minutes,
            vec![MetricPoint::new(date(2023, 6, 1), 42.0)],
        )
        .unwrap();
        assert!((series.value_at(date(2020, 1, 1)) - 42.0).abs() < f64::EPSILON);
        assert!((series.value_at(date(2023, 6, 1)) - 42.0).abs() < f64::EPSILON);
        assert!((series.value_at(date(2025, 1, 1)) - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_normalized_uses_full_series_range() {
        let series = compute_series();
        assert!((series.normalized_value_at(date(2018, 1, 1)) - 0.0).abs() < f64::EPSILON);
        assert!((series.normalized_value_at(date(2022, 1, 1)) - 1.0).abs() < f64::EPSILON);
        let mid = series.normalized_value_at(date(2020, 1, 1));
        assert!((mid - (23.0 - 21.0) / 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_normalized_constant_series() {
        let series = MetricSeries::new(
            "flat",
            ValueKind::Index,
            vec![
                MetricPoint::new(date(2020, 1, 1), 7.0),
                MetricPoint::new(date(2021, 1, 1), 7.0),
            ],
        )
        .unwrap();
        assert!((series.normalized_value_at(date(2020, 7, 1)) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_domain_anchor_defaults() {
        assert!(compute_series().anchors_domain());
        let overlay = MetricSeries::new(
            "bench",
            ValueKind::Percentage,
            vec![MetricPoint::new(date(2020, 1, 1), 50.0)],
        )
        .unwrap();
        assert!(!overlay.anchors_domain());
    }

    #[test]
    fn test_store_insert_and_get() {
        let mut store = SeriesStore::new();
        assert!(store.is_empty());
        store.insert(compute_series()).unwrap();
        assert_eq!(store.series_count(), 1);
        assert!(store.get("training_compute").is_some());
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_store_rejects_duplicate_id() {
        let mut store = SeriesStore::new();
        store.insert(compute_series()).unwrap();
        let err = store.insert(compute_series()).unwrap_err();
        assert!(matches!(err, Error::DuplicateMetric(_)));
    }
}
