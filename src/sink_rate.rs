//! Power-off sink rate from the drag curve.
//!
//! Sink rate at each velocity is D·V / W, reported as a positive
//! magnitude. Weight comes strictly from the wing-area inputs; zero
//! and negative velocities and non-finite drag values are dropped from
//! every parallel array so the series stay aligned.

use tracing::warn;

use crate::constants::{newtons, MS_TO_FPM};
use crate::documents::{timestamp_now, SinkRateResults, ThrustPoint};
use crate::error::{PerfError, Result};
use crate::store::Store;

/// Compute the sink series from a thrust curve. Pure.
pub fn compute(thrust_curve: &[ThrustPoint], weight_kg: f64) -> Result<SinkRateResults> {
    if !(weight_kg > 0.0) {
        return Err(PerfError::validation("weight", "must be greater than zero"));
    }

    let weight_n = newtons(weight_kg);
    let mut velocity_range = Vec::new();
    let mut sink_rates_ms = Vec::new();
    let mut drag_values = Vec::new();

    for point in thrust_curve {
        if !point.velocity.is_finite() || !point.drag.is_finite() || point.velocity <= 0.0 {
            warn!(velocity = point.velocity, "skipping unusable sink-rate point");
            continue;
        }
        velocity_range.push(point.velocity);
        drag_values.push(point.drag);
        sink_rates_ms.push(point.drag * point.velocity / weight_n);
    }

    if velocity_range.is_empty() {
        return Err(PerfError::NoValidPoints);
    }

    let sink_rates_fpm = sink_rates_ms.iter().map(|r| r * MS_TO_FPM).collect();

    Ok(SinkRateResults {
        velocity_range,
        sink_rates_ms,
        sink_rates_fpm,
        drag_values,
        weight: weight_kg,
        timestamp: timestamp_now(),
    })
}

/// Resolve weight and the thrust curve from the store, compute, and
/// persist the series.
pub fn run(store: &mut Store) -> Result<SinkRateResults> {
    let weight = store
        .wing_area_inputs()?
        .map(|wa| wa.weight)
        .filter(|w| w.is_finite() && *w > 0.0)
        .ok_or_else(|| PerfError::missing("aircraft weight", "wing-area"))?;

    let thrust_data = store
        .dynamic_thrust_data()?
        .ok_or_else(|| PerfError::missing("thrust curve", "dynamic-thrust"))?;
    if thrust_data.thrust_curve.is_empty() {
        return Err(PerfError::missing("thrust curve", "dynamic-thrust"));
    }

    let results = compute(&thrust_data.thrust_curve, weight)?;
    store.set_sink_rate_results(&results)?;
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::WingAreaInputs;

    fn point(velocity: f64, drag: f64) -> ThrustPoint {
        ThrustPoint {
            velocity,
            thrust: 0.0,
            drag,
            net_thrust: -drag,
        }
    }

    #[test]
    fn sink_rate_is_drag_power_over_weight() {
        let results = compute(&[point(10.0, 4.0)], 2.0).unwrap();
        let expected = 4.0 * 10.0 / (2.0 * 9.81);
        assert!((results.sink_rates_ms[0] - expected).abs() < 1e-12);
        assert!(results.sink_rates_ms[0] > 0.0);
    }

    #[test]
    fn skipped_points_drop_from_every_array() {
        let curve = vec![
            point(0.0, f64::INFINITY),
            point(-5.0, 3.0),
            point(10.0, 4.0),
            point(15.0, 5.0),
        ];
        let results = compute(&curve, 2.0).unwrap();
        assert_eq!(results.velocity_range, vec![10.0, 15.0]);
        assert_eq!(results.drag_values, vec![4.0, 5.0]);
        assert_eq!(results.sink_rates_ms.len(), 2);
        assert_eq!(results.sink_rates_fpm.len(), 2);
    }

    #[test]
    fn weight_comes_from_wing_area_inputs_only() {
        let mut store = Store::in_memory();
        // a wing-parameters weight alone is not enough
        store.set_wing_parameters_weight(5.0).unwrap();
        let err = run(&mut store).unwrap_err();
        match err {
            PerfError::MissingUpstream { stage, .. } => assert_eq!(stage, "wing-area"),
            other => panic!("unexpected error: {other:?}"),
        }

        store
            .set_wing_area_inputs(&WingAreaInputs {
                weight: 2.0,
                vstall_start: 10.0,
                vstall_end: 20.0,
                vstall_step: 1.0,
                clmax_start: 1.0,
                clmax_end: 2.0,
                clmax_step: 0.1,
            })
            .unwrap();
        let err = run(&mut store).unwrap_err();
        match err {
            PerfError::MissingUpstream { stage, .. } => assert_eq!(stage, "dynamic-thrust"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
