//! Property-based tests for capcurve
//!
//! Mathematical invariants of the interpolation, domain, jitter, and tick
//! components. Run with `ProptestConfig::with_cases(100)` so the suite
//! stays fast enough for a pre-commit hook.

use capcurve::jitter::{jitter, log_offset_multiplier};
use capcurve::scale::compute_domain;
use capcurve::series::{MetricPoint, MetricSeries, SeriesStore, ValueKind};
use capcurve::ticks::{visible_ticks, FLOP_TICK_LADDER};
use chrono::{Days, NaiveDate};
use proptest::prelude::*;

// ============================================================================
// Property Test Generators (Strategies)
// ============================================================================

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()
}

/// Strictly ascending dates built from positive day gaps, paired with the
/// given value strategy.
fn arb_points(
    values: impl Strategy<Value = f64> + Clone,
    max_points: usize,
) -> impl Strategy<Value = Vec<MetricPoint>> {
    proptest::collection::vec((1u64..365, values), 1..max_points).prop_map(|gaps| {
        let mut day = base_date();
        let mut points = Vec::with_capacity(gaps.len());
        for (gap, value) in gaps {
            day = day + Days::new(gap);
            points.push(MetricPoint::new(day, value));
        }
        points
    })
}

fn arb_series(max_points: usize) -> impl Strategy<Value = MetricSeries> {
    arb_points(-50.0f64..50.0, max_points)
        .prop_map(|points| MetricSeries::new("prop", ValueKind::Index, points).unwrap())
}

/// Series whose values are non-decreasing in date.
fn arb_monotonic_series(max_points: usize) -> impl Strategy<Value = MetricSeries> {
    arb_points(-50.0f64..50.0, max_points).prop_map(|mut points| {
        let mut values: Vec<f64> = points.iter().map(MetricPoint::value).collect();
        values.sort_by(f64::total_cmp);
        for (point, value) in points.iter_mut().zip(values) {
            *point = MetricPoint::new(point.date(), value);
        }
        MetricSeries::new("monotonic", ValueKind::Index, points).unwrap()
    })
}

/// Log10-FLOP series with plausible exponents.
fn arb_compute_series(max_points: usize) -> impl Strategy<Value = MetricSeries> {
    arb_points(15.0f64..30.0, max_points)
        .prop_map(|points| MetricSeries::new("compute", ValueKind::Log10Flop, points).unwrap())
}

fn arb_claim_id() -> impl Strategy<Value = String> {
    "[a-z0-9-]{0,24}"
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ========================================================================
    // Interpolation Properties
    // ========================================================================

    /// Property: value_at clamps to the endpoint values outside the range
    #[test]
    fn prop_value_at_clamps(series in arb_series(30), days_out in 1u64..5000) {
        let first = series.points()[0];
        let last = series.points()[series.len() - 1];

        let before = series.min_date() - Days::new(days_out);
        let after = series.max_date() + Days::new(days_out);

        prop_assert!((series.value_at(before) - first.value()).abs() < f64::EPSILON);
        prop_assert!((series.value_at(after) - last.value()).abs() < f64::EPSILON);
    }

    /// Property: value_at reproduces every sample exactly
    #[test]
    fn prop_value_at_exact_hits(series in arb_series(30)) {
        for point in series.points() {
            let got = series.value_at(point.date());
            prop_assert!(
                (got - point.value()).abs() < 1e-9,
                "value_at({}) = {got}, expected {}",
                point.date(),
                point.value()
            );
        }
    }

    /// Property: value_at stays within the full-series value bounds
    #[test]
    fn prop_value_at_bounded(series in arb_series(30), offset in 0u64..6000) {
        let query = series.min_date() + Days::new(offset);
        let got = series.value_at(query);
        prop_assert!(got >= series.min_value() - 1e-9);
        prop_assert!(got <= series.max_value() + 1e-9);
    }

    /// Property: for non-decreasing sample values, value_at is
    /// non-decreasing in the query date
    #[test]
    fn prop_interpolation_monotonic(
        series in arb_monotonic_series(30),
        a in 0u64..6000,
        b in 0u64..6000
    ) {
        let (early, late) = if a <= b { (a, b) } else { (b, a) };
        let va = series.value_at(series.min_date() + Days::new(early));
        let vb = series.value_at(series.min_date() + Days::new(late));
        prop_assert!(va <= vb + 1e-9, "monotonicity violated: {va} > {vb}");
    }

    /// Property: normalized_value_at lands in [0, 1]
    #[test]
    fn prop_normalized_in_unit_interval(series in arb_series(30), offset in 0u64..6000) {
        let got = series.normalized_value_at(series.min_date() + Days::new(offset));
        prop_assert!((0.0..=1.0).contains(&got));
    }

    // ========================================================================
    // Jitter Properties
    // ========================================================================

    /// Property: jitter is a pure function of the id
    #[test]
    fn prop_jitter_deterministic(id in arb_claim_id()) {
        prop_assert!((jitter(&id) - jitter(&id)).abs() < f64::EPSILON);
    }

    /// Property: jitter stays in the unit interval
    #[test]
    fn prop_jitter_bounded(id in arb_claim_id()) {
        let value = jitter(&id);
        prop_assert!((0.0..=1.0).contains(&value), "jitter({id:?}) = {value}");
    }

    /// Property: the multiplicative offset never exceeds half the spread
    /// in either log direction
    #[test]
    fn prop_jitter_multiplier_bounded(id in arb_claim_id(), spread in 0.0f64..2.0) {
        let factor = log_offset_multiplier(&id, spread);
        prop_assert!(factor >= 10f64.powf(-spread / 2.0) - 1e-12);
        prop_assert!(factor <= 10f64.powf(spread / 2.0) + 1e-12);
    }

    // ========================================================================
    // Domain Properties
    // ========================================================================

    /// Property: the computed domain strictly contains the series' display
    /// values (padding never merely touches the data)
    #[test]
    fn prop_domain_strictly_contains_data(series in arb_compute_series(20)) {
        let start = series.min_date();
        let end = series.max_date();
        let min_display = 10f64.powf(series.min_value());
        let max_display = 10f64.powf(series.max_value());

        let mut store = SeriesStore::new();
        let id = series.id().as_str().to_string();
        store.insert(series).unwrap();

        let [lo, hi] = compute_domain(&store, &[id.as_str()], start, end);
        prop_assert!(lo < min_display, "domain low {lo} not below data min {min_display}");
        prop_assert!(hi > max_display, "domain high {hi} not above data max {max_display}");
    }

    /// Property: narrowing the window never widens the domain beyond the
    /// full-range result
    #[test]
    fn prop_windowed_domain_within_full(series in arb_compute_series(20), offset in 0u64..2000) {
        let start = series.min_date();
        let end = series.max_date();
        let mut store = SeriesStore::new();
        let id = series.id().as_str().to_string();
        store.insert(series).unwrap();

        let full = compute_domain(&store, &[id.as_str()], start, end);
        let windowed = compute_domain(&store, &[id.as_str()], start + Days::new(offset), end);
        prop_assert!(windowed[0] >= full[0] - f64::EPSILON);
        prop_assert!(windowed[1] <= full[1] + f64::EPSILON);
    }

    // ========================================================================
    // Tick Properties
    // ========================================================================

    /// Property: every visible tick lies inside the domain and comes from
    /// the ladder, in ladder order
    #[test]
    fn prop_ticks_within_domain(lo_exp in 10.0f64..30.0, span in 0.0f64..15.0) {
        let domain = [10f64.powf(lo_exp), 10f64.powf(lo_exp + span)];
        let ticks = visible_ticks(&FLOP_TICK_LADDER, domain);

        let expected: Vec<f64> = FLOP_TICK_LADDER
            .iter()
            .copied()
            .filter(|&v| v >= domain[0] && v <= domain[1])
            .collect();
        prop_assert_eq!(ticks, expected);
    }
}
