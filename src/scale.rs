//! Log/linear axis domain computation
//!
//! Given the set of active metrics and the visible date range, produce the
//! display-space value domain `[min, max]` an axis should map onto pixels.
//! Only series flagged as domain anchors participate; overlay metrics that
//! share the axis in a different visual unit never skew the bounds.

use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::series::{MetricSeries, SeriesStore};

/// Domain returned when no active metric anchors the axis.
///
/// Wide enough to cover the plausible training-compute range so the chart
/// still renders instead of failing.
pub const DEFAULT_FLOP_DOMAIN: [f64; 2] = [1e20, 1e27];

/// Log-space padding applied per side, in orders of magnitude.
const LOG_PAD_EXPONENT: f64 = 1.0;

/// Linear padding per side, as a fraction of the value span.
const LINEAR_PAD_FRACTION: f64 = 0.05;

/// Compute the logarithmic display-space domain for the active metrics
/// over the visible date range.
///
/// Policy, per anchoring series:
/// - points are filtered to `[start, end]` by date;
/// - an empty filter falls back to the series' full sample set, so the
///   domain is never empty;
/// - stored values are converted to display units (`Log10Flop` exponents
///   become FLOP counts) before the min/max is taken.
///
/// The combined bounds are padded by one order of magnitude per side so no
/// data point renders flush against an axis edge. With no anchoring metric
/// active the fixed [`DEFAULT_FLOP_DOMAIN`] is returned; unknown metric ids
/// are skipped. This function never fails.
#[must_use]
pub fn compute_domain(
    store: &SeriesStore,
    active: &[&str],
    start: NaiveDate,
    end: NaiveDate,
) -> [f64; 2] {
    let (lo, hi) = match exponent_bounds(store, active, start, end) {
        Some(bounds) => bounds,
        None => {
            debug!(?active, "no domain-anchoring metric active, using default domain");
            return DEFAULT_FLOP_DOMAIN;
        }
    };
    [
        10f64.powf(lo - LOG_PAD_EXPONENT),
        10f64.powf(hi + LOG_PAD_EXPONENT),
    ]
}

/// Compute a linear display-space domain with proportional padding.
///
/// Same filter and fallback policy as [`compute_domain`], but bounds are
/// padded by 5% of the value span per side (one display unit when the span
/// collapses to zero), suitable for a linear position-mapping function.
#[must_use]
pub fn compute_linear_domain(
    store: &SeriesStore,
    active: &[&str],
    start: NaiveDate,
    end: NaiveDate,
) -> [f64; 2] {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for series in anchoring(store, active) {
        for value in windowed_display_values(series, start, end) {
            min = min.min(value);
            max = max.max(value);
        }
    }
    if !min.is_finite() || !max.is_finite() {
        debug!(?active, "no domain-anchoring metric active, using default domain");
        return DEFAULT_FLOP_DOMAIN;
    }
    let pad = ((max - min) * LINEAR_PAD_FRACTION).max(if max > min { 0.0 } else { 1.0 });
    [min - pad, max + pad]
}

/// Min/max display-space exponents over all anchoring series, or `None`
/// when no active metric anchors the domain.
fn exponent_bounds(
    store: &SeriesStore,
    active: &[&str],
    start: NaiveDate,
    end: NaiveDate,
) -> Option<(f64, f64)> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    let mut found = false;
    for series in anchoring(store, active) {
        found = true;
        for value in windowed_display_values(series, start, end) {
            // Display values are positive for every supported kind, so the
            // log-space position is well defined.
            let exponent = value.log10();
            lo = lo.min(exponent);
            hi = hi.max(exponent);
        }
    }
    (found && lo.is_finite()).then_some((lo, hi))
}

/// Active series that participate in domain computation.
fn anchoring<'a>(
    store: &'a SeriesStore,
    active: &'a [&'a str],
) -> impl Iterator<Item = &'a MetricSeries> {
    active
        .iter()
        .filter_map(|id| store.get(id))
        .filter(|series| series.anchors_domain())
}

/// Display-space values of the samples inside the date window, falling
/// back to the full series when the window is empty.
fn windowed_display_values(
    series: &MetricSeries,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<f64> {
    let kind = series.value_kind();
    let windowed: Vec<f64> = series
        .points()
        .iter()
        .filter(|p| p.date() >= start && p.date() <= end)
        .map(|p| kind.display_value(p.value()))
        .collect();
    if windowed.is_empty() {
        trace!(id = %series.id(), "no samples in window, falling back to full series");
        series
            .points()
            .iter()
            .map(|p| kind.display_value(p.value()))
            .collect()
    } else {
        windowed
    }
}
