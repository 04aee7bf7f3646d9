//! Climb rate from excess power.
//!
//! For each point of the stored thrust curve, excess power is
//! (T_avail − T_req)·V and the climb rate is that over weight in
//! newtons. Points with non-finite values (the v = 0 singularity of
//! the thrust-required model) are skipped.

use tracing::warn;

use crate::constants::{newtons, MS_TO_FPM};
use crate::documents::{timestamp_now, ClimbRateResults, MaxClimbRate, ThrustPoint};
use crate::error::{PerfError, Result};
use crate::store::Store;

/// Compute the climb series from a thrust curve. Pure.
pub fn compute(thrust_curve: &[ThrustPoint], weight_kg: f64) -> Result<ClimbRateResults> {
    if !(weight_kg > 0.0) {
        return Err(PerfError::validation("weight", "must be greater than zero"));
    }

    let weight_n = newtons(weight_kg);
    let mut velocity_range = Vec::new();
    let mut climb_rates_ms = Vec::new();
    let mut power_available = Vec::new();
    let mut power_required = Vec::new();

    for point in thrust_curve {
        if !point.velocity.is_finite() || !point.thrust.is_finite() || !point.drag.is_finite() {
            warn!(velocity = point.velocity, "skipping thrust point with non-finite values");
            continue;
        }
        let excess_power = (point.thrust - point.drag) * point.velocity;
        velocity_range.push(point.velocity);
        climb_rates_ms.push(excess_power / weight_n);
        power_available.push(point.thrust * point.velocity);
        power_required.push(point.drag * point.velocity);
    }

    if velocity_range.is_empty() {
        return Err(PerfError::NoValidPoints);
    }

    // first occurrence wins on ties
    let (max_index, _) = climb_rates_ms
        .iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(best_i, best), (i, &rate)| {
            if rate > best {
                (i, rate)
            } else {
                (best_i, best)
            }
        });

    let max_climb_rate = MaxClimbRate {
        velocity: velocity_range[max_index],
        climb_rate_ms: climb_rates_ms[max_index],
        climb_rate_fpm: climb_rates_ms[max_index] * MS_TO_FPM,
        power_available: power_available[max_index],
        power_required: power_required[max_index],
    };

    let climb_rates_fpm = climb_rates_ms.iter().map(|r| r * MS_TO_FPM).collect();

    Ok(ClimbRateResults {
        velocity_range,
        climb_rates_ms,
        climb_rates_fpm,
        power_available,
        power_required,
        max_climb_rate,
        timestamp: timestamp_now(),
    })
}

/// Resolve weight and the thrust curve from the store, compute, and
/// persist the series.
pub fn run(store: &mut Store) -> Result<ClimbRateResults> {
    let weight = store
        .wing_parameters_inputs()?
        .and_then(|p| p.weight)
        .filter(|w| w.is_finite() && *w > 0.0)
        .ok_or_else(|| PerfError::missing("aircraft weight", "wing-params"))?;

    let thrust_data = store
        .dynamic_thrust_data()?
        .ok_or_else(|| PerfError::missing("thrust curve", "dynamic-thrust"))?;
    if thrust_data.thrust_curve.is_empty() {
        return Err(PerfError::missing("thrust curve", "dynamic-thrust"));
    }

    let results = compute(&thrust_data.thrust_curve, weight)?;
    store.set_climb_rate_results(&results)?;
    Ok(results)
}
