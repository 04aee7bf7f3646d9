//! Propeller thrust available vs. thrust required over a velocity
//! sweep.
//!
//! Thrust required is the classic two-term drag model, parasite plus
//! induced. The induced-drag factor uses 22/7 for π and a fixed Oswald
//! efficiency of 0.8; both are kept as-is so stored curves stay
//! comparable with historical data. Thrust available is the Staples
//! static/dynamic propeller approximation, which takes the propeller
//! dimensions in inches.

use tracing::debug;

use crate::constants::{newtons, AIR_DENSITY, OSWALD_EFFICIENCY};
use crate::documents::{
    timestamp_now, DynamicThrustData, DynamicThrustInputs, ThrustPoint, ThrustRange,
};
use crate::error::{PerfError, Result};
use crate::store::Store;
use crate::sweep::counted_range;

/// Weight assumed when no aircraft weight has been entered anywhere,
/// applied only when the caller opts in.
pub const DEFAULT_WEIGHT_KG: f64 = 10.0;

/// Induced-drag factor K = 1 / (π·e·AR), with the historical 22/7
/// approximation of π.
pub fn induced_drag_factor(aspect_ratio: f64) -> f64 {
    1.0 / ((22.0 / 7.0) * OSWALD_EFFICIENCY * aspect_ratio)
}

/// Thrust required to hold level flight at `velocity`, floored at 0.
/// At v = 0 the induced term diverges to +∞, which downstream
/// consumers treat as a skipped point.
pub fn thrust_required(velocity: f64, wing_area: f64, cd0: f64, k: f64, weight_kg: f64) -> f64 {
    let v2 = velocity * velocity;
    let parasite = AIR_DENSITY * v2 * wing_area * cd0 / 2.0;
    let weight_n = newtons(weight_kg);
    let induced = 2.0 * k * weight_n * weight_n / (AIR_DENSITY * v2 * wing_area);
    (parasite + induced).max(0.0)
}

/// Thrust available from the propeller at `velocity`, clamped at 0
/// past the pitch-speed crossover. Diameter and pitch in inches.
pub fn thrust_available(velocity: f64, prop_dia_in: f64, prop_pitch_in: f64, rpm: f64) -> f64 {
    let a = 4.4e-8 * rpm * (prop_dia_in.powf(3.5) / prop_pitch_in.sqrt());
    let b = rpm * prop_pitch_in * 4.23e-4 - velocity;
    (a * b).max(0.0)
}

fn validate(inputs: &DynamicThrustInputs) -> Result<()> {
    if inputs.start_vel < 0.0 || inputs.end_vel <= inputs.start_vel || inputs.step_vel <= 0.0 {
        return Err(PerfError::validation(
            "velocity range",
            "start must be >= 0, end > start, step > 0",
        ));
    }
    for (field, value) in [
        ("cd0", inputs.cd0),
        ("propDia", inputs.prop_dia),
        ("propPitch", inputs.prop_pitch),
        ("rpm", inputs.rpm),
    ] {
        if !(value > 0.0) {
            return Err(PerfError::validation(field, "must be greater than zero"));
        }
    }
    Ok(())
}

/// Build the thrust curve. Pure; `wing_area` and `wing_span` come from
/// the wing-parameter stage (planform units, matching the stored
/// document).
pub fn compute(
    inputs: &DynamicThrustInputs,
    wing_area: f64,
    wing_span: f64,
    weight_kg: f64,
) -> Result<DynamicThrustData> {
    validate(inputs)?;

    let aspect_ratio = wing_span * wing_span / wing_area;
    let k = induced_drag_factor(aspect_ratio);
    debug!(aspect_ratio, k, "thrust sweep parameters");

    let curve: Vec<ThrustPoint> = counted_range(inputs.start_vel, inputs.end_vel, inputs.step_vel)
        .into_iter()
        .map(|velocity| {
            let thrust = thrust_available(velocity, inputs.prop_dia, inputs.prop_pitch, inputs.rpm);
            let drag = thrust_required(velocity, wing_area, inputs.cd0, k, weight_kg);
            ThrustPoint {
                velocity,
                thrust,
                drag,
                net_thrust: thrust - drag,
            }
        })
        .collect();

    if curve.is_empty() {
        return Err(PerfError::NoValidPoints);
    }

    let thrusts: Vec<f64> = curve.iter().map(|p| p.thrust).collect();
    let max_thrust = thrusts.iter().cloned().fold(f64::MIN, f64::max);
    let min_thrust = thrusts.iter().cloned().fold(f64::MAX, f64::min);
    let average = thrusts.iter().sum::<f64>() / thrusts.len() as f64;

    Ok(DynamicThrustData {
        max_thrust,
        min_thrust,
        thrust_range: ThrustRange {
            min: min_thrust,
            max: max_thrust,
            average,
        },
        thrust_curve: curve,
        rpm: inputs.rpm,
        prop_diameter: inputs.prop_dia,
        prop_pitch: inputs.prop_pitch,
        timestamp: timestamp_now(),
    })
}

/// Resolve upstream wing data, compute, and persist both the inputs
/// and the curve. With `use_defaults` a missing weight falls back to
/// [`DEFAULT_WEIGHT_KG`] and is merged into the wing-parameter
/// document so later stages see the same value.
pub fn run(
    store: &mut Store,
    inputs: &DynamicThrustInputs,
    use_defaults: bool,
) -> Result<DynamicThrustData> {
    validate(inputs)?;

    let wing_params = store.wing_parameters_inputs()?.unwrap_or_default();

    let weight = match wing_params.weight.filter(|w| w.is_finite() && *w > 0.0) {
        Some(w) => w,
        None if use_defaults => {
            store.set_wing_parameters_weight(DEFAULT_WEIGHT_KG)?;
            DEFAULT_WEIGHT_KG
        }
        None => {
            return Err(PerfError::missing_with_default(
                "aircraft weight",
                "wing-params",
                DEFAULT_WEIGHT_KG,
            ))
        }
    };

    let wing_area = wing_params
        .surface_area
        .filter(|a| a.is_finite() && *a > 0.0)
        .ok_or_else(|| PerfError::missing("wing area", "wing-params"))?;
    let wing_span = wing_params
        .wingspan
        .filter(|s| s.is_finite() && *s > 0.0)
        .ok_or_else(|| PerfError::missing("wing span", "wing-params"))?;

    let data = compute(inputs, wing_area, wing_span, weight)?;
    store.set_dynamic_thrust_inputs(inputs)?;
    store.set_dynamic_thrust_data(&data)?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::WingParametersInputs;

    fn inputs() -> DynamicThrustInputs {
        DynamicThrustInputs {
            start_vel: 0.0,
            end_vel: 50.0,
            step_vel: 5.0,
            cd0: 0.02,
            prop_dia: 10.0,
            prop_pitch: 7.0,
            rpm: 8000.0,
        }
    }

    #[test]
    fn available_thrust_is_monotone_non_increasing() {
        let data = compute(&inputs(), 400.0, 50.0, 2.0).unwrap();
        for pair in data.thrust_curve.windows(2) {
            assert!(pair[1].thrust <= pair[0].thrust + 1e-12);
        }
    }

    #[test]
    fn required_thrust_has_a_single_interior_minimum() {
        let data = compute(&inputs(), 400.0, 50.0, 2.0).unwrap();
        let drags: Vec<f64> = data
            .thrust_curve
            .iter()
            .map(|p| p.drag)
            .filter(|d| d.is_finite())
            .collect();
        let mut sign_changes = 0;
        let mut falling = true;
        for pair in drags.windows(2) {
            let rising = pair[1] > pair[0];
            if falling && rising {
                sign_changes += 1;
                falling = false;
            } else if !rising {
                falling = true;
            }
        }
        assert_eq!(sign_changes, 1, "drag curve should be convex: {drags:?}");
    }

    #[test]
    fn zero_velocity_required_thrust_is_infinite() {
        let k = induced_drag_factor(6.25);
        assert!(thrust_required(0.0, 400.0, 0.02, k, 2.0).is_infinite());
        // the serialized curve carries it as null
        let data = compute(&inputs(), 400.0, 50.0, 2.0).unwrap();
        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains("\"drag\":null"));
    }

    #[test]
    fn static_thrust_matches_hand_calculation() {
        // v=0, 10x7 prop at 8000 rpm:
        // a = 4.4e-8 * 8000 * 10^3.5 / sqrt(7), b = 8000 * 7 * 4.23e-4
        let a = 4.4e-8 * 8000.0 * 10f64.powf(3.5) / 7f64.sqrt();
        let b = 8000.0 * 7.0 * 4.23e-4;
        let expected = a * b;
        assert!((thrust_available(0.0, 10.0, 7.0, 8000.0) - expected).abs() < 1e-9);
        assert!(expected > 0.0);
    }

    #[test]
    fn sweep_hits_both_ends() {
        let data = compute(&inputs(), 400.0, 50.0, 2.0).unwrap();
        assert_eq!(data.thrust_curve.len(), 11);
        assert_eq!(data.thrust_curve[0].velocity, 0.0);
        assert_eq!(data.thrust_curve.last().unwrap().velocity, 50.0);
    }

    #[test]
    fn missing_weight_reports_the_default() {
        let mut store = Store::in_memory();
        store
            .set_wing_parameters_inputs(&WingParametersInputs {
                surface_area: Some(400.0),
                wingspan: Some(50.0),
                ..Default::default()
            })
            .unwrap();

        let err = run(&mut store, &inputs(), false).unwrap_err();
        assert_eq!(err.recoverable_default(), Some(DEFAULT_WEIGHT_KG));
    }

    #[test]
    fn use_defaults_merges_weight_into_wing_parameters() {
        let mut store = Store::in_memory();
        store
            .set_wing_parameters_inputs(&WingParametersInputs {
                surface_area: Some(400.0),
                wingspan: Some(50.0),
                ..Default::default()
            })
            .unwrap();

        run(&mut store, &inputs(), true).unwrap();
        let params = store.wing_parameters_inputs().unwrap().unwrap();
        assert_eq!(params.weight, Some(DEFAULT_WEIGHT_KG));
        assert!(store.dynamic_thrust_data().unwrap().is_some());
        assert!(store.dynamic_thrust_inputs().unwrap().is_some());
    }

    #[test]
    fn missing_wing_geometry_names_the_upstream_stage() {
        let mut store = Store::in_memory();
        store.set_wing_parameters_weight(2.0).unwrap();
        let err = run(&mut store, &inputs(), false).unwrap_err();
        match err {
            PerfError::MissingUpstream { stage, .. } => assert_eq!(stage, "wing-params"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
