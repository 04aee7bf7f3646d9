//! Sweep-range generators.
//!
//! Three historical loop shapes coexist and their outputs differ at the
//! edges, so each is kept as its own generator rather than unified:
//! the wing-area pages append the literal end value when repeated
//! addition undershoots it, the thrust page precomputes a point count
//! with an epsilon guard, and the wheel-track page neither appends nor
//! guards.

use crate::constants::SWEEP_EPSILON;

/// Round to 2 decimal places, the display precision every sweep point
/// was stored with.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Repeated addition from `start`, each point rounded to 2 decimals,
/// with the literal `end` value appended if the loop undershot it.
pub fn appended_range(start: f64, end: f64, step: f64) -> Vec<f64> {
    let mut points = Vec::new();
    let mut v = start;
    while v <= end {
        points.push(round2(v));
        v += step;
    }
    match points.last() {
        Some(&last) if last < end => points.push(end),
        None => points.push(end),
        _ => {}
    }
    points
}

/// Fixed point count of floor((end-start)/step + epsilon) + 1, each
/// point clamped to `end`. The epsilon keeps an end value reachable
/// only through accumulated floating-point error from being dropped.
pub fn counted_range(start: f64, end: f64, step: f64) -> Vec<f64> {
    let count = ((end - start) / step + SWEEP_EPSILON).floor() as usize + 1;
    (0..count)
        .map(|i| (start + i as f64 * step).min(end))
        .collect()
}

/// Bare accumulation loop with 2-decimal rounding and no end append;
/// an end value that is not an exact multiple of step is not produced.
pub fn stepped_range(start: f64, end: f64, step: f64) -> Vec<f64> {
    let mut points = Vec::new();
    let mut v = start;
    while v <= end {
        points.push(round2(v));
        v += step;
    }
    points
}
