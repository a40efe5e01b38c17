//! Axis tick filtering and exponent labels
//!
//! The axis never invents tick positions: a fixed ascending ladder of
//! candidate powers of ten is filtered down to the current domain, and
//! each survivor is rendered in compact `10ⁿ` notation with Unicode
//! superscript digits. Both operations are pure and locale-independent.

/// Candidate tick ladder for the training-compute axis, spanning the full
/// plausible FLOP range.
pub const FLOP_TICK_LADDER: [f64; 11] = [
    1e17, 1e18, 1e19, 1e20, 1e21, 1e22, 1e23, 1e24, 1e25, 1e26, 1e27,
];

/// Unicode superscript digits, indexed 0-9.
const SUPERSCRIPT_DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

/// Superscript minus sign for negative exponents.
const SUPERSCRIPT_MINUS: char = '⁻';

/// Ticks from an ascending candidate ladder that fall inside the domain.
///
/// Returns the subsequence of `ladder` satisfying `min <= v <= max`, in
/// ladder order.
///
/// # Example
///
/// ```rust
/// use capcurve::ticks::{visible_ticks, FLOP_TICK_LADDER};
///
/// let ticks = visible_ticks(&FLOP_TICK_LADDER, [1e22, 1e26]);
/// assert_eq!(ticks, vec![1e22, 1e23, 1e24, 1e25, 1e26]);
/// ```
#[must_use]
pub fn visible_ticks(ladder: &[f64], domain: [f64; 2]) -> Vec<f64> {
    ladder
        .iter()
        .copied()
        .filter(|&v| v >= domain[0] && v <= domain[1])
        .collect()
}

/// Render a positive value as `10` followed by its rounded base-10
/// exponent in superscript.
///
/// `1e23` becomes `"10²³"`, `1e-3` becomes `"10⁻³"`. Values that are not
/// strictly positive have no log-space position and render as `"0"`.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // exponents are tiny integers
pub fn exponent_label(value: f64) -> String {
    if !value.is_finite() || value <= 0.0 {
        return "0".to_string();
    }
    let exponent = value.log10().round() as i32;
    format!("10{}", superscript(exponent))
}

/// Superscript rendering of a (possibly negative) integer.
fn superscript(exponent: i32) -> String {
    let mut out = String::new();
    if exponent < 0 {
        out.push(SUPERSCRIPT_MINUS);
    }
    let digits = exponent.unsigned_abs().to_string();
    for d in digits.bytes() {
        out.push(SUPERSCRIPT_DIGITS[usize::from(d - b'0')]);
    }
    out
}
