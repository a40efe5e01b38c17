//! Deterministic per-identifier jitter
//!
//! Claims sharing a near-identical metric value would otherwise stack on
//! top of each other. Each claim id is hashed to a stable unit-interval
//! offset, so the spread is identical across renders, sessions, and
//! build targets — no randomness anywhere.
//!
//! `FxHasher` is a fixed, unseeded algorithm, which is exactly what the
//! determinism contract needs; a `RandomState`-style hasher would break it.

use std::hash::Hasher;

use rustc_hash::FxHasher;

/// Map an opaque identifier to a stable pseudo-random value in `[0, 1]`.
///
/// Pure function of the identifier's bytes: the same id always yields the
/// identical value, and distinct ids usually (not necessarily always)
/// differ.
///
/// # Example
///
/// ```rust
/// let a = capcurve::jitter::jitter("claim-042");
/// let b = capcurve::jitter::jitter("claim-042");
/// assert_eq!(a, b);
/// assert!((0.0..=1.0).contains(&a));
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)] // reduction to [0,1] tolerates the rounding
pub fn jitter(id: &str) -> f64 {
    let mut hasher = FxHasher::default();
    hasher.write(id.as_bytes());
    hasher.finish() as f64 / u64::MAX as f64
}

/// Multiplicative jitter factor for a log-scaled quantity.
///
/// The unit-interval jitter becomes a symmetric exponent offset of up to
/// `total_spread / 2` orders of magnitude on each side, returned as the
/// factor `10^offset` to apply to the true value. Applying jitter
/// multiplicatively keeps the visual spread consistent across orders of
/// magnitude; an additive offset would be invisible at 1e26 and enormous
/// at 1e20.
#[must_use]
pub fn log_offset_multiplier(id: &str, total_spread: f64) -> f64 {
    let exponent_offset = (jitter(id) - 0.5) * total_spread;
    10f64.powf(exponent_offset)
}
