//! Flight-envelope load factors (V-n diagram data).
//!
//! A read-only consumer: parameters are gathered from whichever
//! calculator stored them, load factors are computed over the thrust
//! sweep's velocity range, and nothing is written back. Velocities
//! below the stall speed carry no meaningful load factor and are
//! excluded.

use serde::Serialize;

use crate::constants::{newtons, AIR_DENSITY};
use crate::error::{PerfError, Result};
use crate::store::{keys, Store};
use crate::sweep::appended_range;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VnPoint {
    pub velocity: f64,
    pub dynamic_pressure: f64,
    pub lift: f64,
    pub weight_n: f64,
    pub load_factor: f64,
}

/// Parameters the diagram needs, after the cross-document fallback
/// chain has been walked.
#[derive(Debug, Clone)]
pub struct VnParameters {
    pub weight_kg: f64,
    pub surface_area: f64,
    pub cl_max: f64,
    pub v_stall: Option<f64>,
}

fn resolve_parameters(store: &Store) -> Result<VnParameters> {
    let wing_area_inputs = store.wing_area_inputs()?;
    let wing_params = store.wing_parameters_inputs()?;
    let aero = store.aerodynamic_data()?;

    let weight = store
        .get_number(keys::WEIGHT)?
        .or(wing_area_inputs.map(|wa| wa.weight))
        .filter(|w| w.is_finite() && *w > 0.0);
    let surface_area = store
        .get_number(keys::SURFACE_AREA)?
        .or(wing_params.as_ref().and_then(|p| p.surface_area))
        .filter(|a| a.is_finite() && *a > 0.0);
    let cl_max = store
        .get_number(keys::CL_MAX)?
        .or(wing_params.as_ref().and_then(|p| p.cl_max))
        .filter(|c| c.is_finite() && *c > 0.0);
    let v_stall = store
        .get_number(keys::V_STALL)?
        .or(aero.map(|a| a.v_stall))
        .filter(|v| v.is_finite() && *v > 0.0);

    let mut missing = Vec::new();
    if weight.is_none() {
        missing.push("weight");
    }
    if surface_area.is_none() {
        missing.push("wing area");
    }
    if cl_max.is_none() {
        missing.push("CLmax");
    }
    if !missing.is_empty() {
        return Err(PerfError::missing(missing.join(", "), "wing-params"));
    }

    Ok(VnParameters {
        weight_kg: weight.unwrap_or_default(),
        surface_area: surface_area.unwrap_or_default(),
        cl_max: cl_max.unwrap_or_default(),
        v_stall,
    })
}

/// Load factors over a velocity range. Pure.
pub fn compute(velocity_range: &[f64], params: &VnParameters) -> Result<Vec<VnPoint>> {
    let weight_n = newtons(params.weight_kg);
    let points: Vec<VnPoint> = velocity_range
        .iter()
        .filter(|&&v| params.v_stall.map_or(true, |vs| v >= vs))
        .map(|&velocity| {
            let dynamic_pressure = 0.5 * AIR_DENSITY * velocity * velocity;
            let lift = dynamic_pressure * params.surface_area * params.cl_max;
            VnPoint {
                velocity,
                dynamic_pressure,
                lift,
                weight_n,
                load_factor: lift / weight_n,
            }
        })
        .collect();

    if points.is_empty() {
        return Err(PerfError::NoValidPoints);
    }
    Ok(points)
}

/// Gather parameters and the velocity sweep from the store and compute
/// the envelope. Read-only; persists nothing.
pub fn run(store: &Store) -> Result<Vec<VnPoint>> {
    let params = resolve_parameters(store)?;

    let (start, end, step) = match store.dynamic_thrust_inputs()? {
        Some(inputs) => (inputs.start_vel, inputs.end_vel.max(inputs.start_vel), inputs.step_vel),
        None => (0.0, 30.0, 1.0),
    };
    let range = appended_range(start, end, step);

    compute(&range, &params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::{DynamicThrustInputs, WingAreaInputs, WingParametersInputs};

    fn params() -> VnParameters {
        VnParameters {
            weight_kg: 2.0,
            surface_area: 0.3,
            cl_max: 1.2,
            v_stall: Some(9.44),
        }
    }

    #[test]
    fn load_factor_is_lift_over_weight() {
        let points = compute(&[10.0], &params()).unwrap();
        let q = 0.5 * 1.225 * 100.0;
        let lift = q * 0.3 * 1.2;
        assert!((points[0].dynamic_pressure - q).abs() < 1e-9);
        assert!((points[0].load_factor - lift / (2.0 * 9.81)).abs() < 1e-9);
    }

    #[test]
    fn points_below_stall_speed_are_excluded() {
        let points = compute(&[5.0, 9.0, 10.0, 15.0], &params()).unwrap();
        let velocities: Vec<f64> = points.iter().map(|p| p.velocity).collect();
        assert_eq!(velocities, vec![10.0, 15.0]);
    }

    #[test]
    fn whole_range_below_stall_is_an_error() {
        assert!(matches!(
            compute(&[1.0, 2.0], &params()),
            Err(PerfError::NoValidPoints)
        ));
    }

    #[test]
    fn missing_parameters_are_listed() {
        let store = Store::in_memory();
        let err = run(&store).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("weight"));
        assert!(message.contains("wing area"));
        assert!(message.contains("CLmax"));
    }

    #[test]
    fn sweep_comes_from_stored_thrust_inputs() {
        let mut store = Store::in_memory();
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
        store
            .set_wing_parameters_inputs(&WingParametersInputs {
                surface_area: Some(0.3),
                cl_max: Some(1.2),
                ..Default::default()
            })
            .unwrap();
        store
            .set_dynamic_thrust_inputs(&DynamicThrustInputs {
                start_vel: 0.0,
                end_vel: 20.0,
                step_vel: 5.0,
                cd0: 0.02,
                prop_dia: 10.0,
                prop_pitch: 7.0,
                rpm: 8000.0,
            })
            .unwrap();

        let points = run(&store).unwrap();
        assert_eq!(points.last().unwrap().velocity, 20.0);
        // no stall speed stored, so the whole sweep survives
        assert_eq!(points[0].velocity, 0.0);
    }

    #[test]
    fn default_sweep_without_thrust_inputs() {
        let mut store = Store::in_memory();
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
        store
            .set_wing_parameters_inputs(&WingParametersInputs {
                surface_area: Some(0.3),
                cl_max: Some(1.2),
                ..Default::default()
            })
            .unwrap();

        let points = run(&store).unwrap();
        assert_eq!(points.len(), 31);
        assert_eq!(points.last().unwrap().velocity, 30.0);
    }
}
