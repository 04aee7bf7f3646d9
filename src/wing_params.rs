//! Wing geometry and flight-dynamics scalars.
//!
//! Geometry inputs are in inches (hobby convention); derived areas are
//! reported both ways. The calculation is tiered: each result unlocks
//! only when its extra inputs are present, so a partial input set still
//! yields the ratios it can support.

use serde::Serialize;

use crate::constants::{newtons, AIR_DENSITY, IN2_TO_M2};
use crate::documents::{timestamp_now, AerodynamicData, WingParametersInputs};
use crate::error::{PerfError, Result};
use crate::store::Store;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WingParametersResults {
    /// Planform area in in² (trapezoid from chords/span, or the direct
    /// surface-area input).
    pub surface_area_in2: f64,
    pub surface_area_m2: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taper_ratio: Option<f64>,
    /// N/m².
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wing_loading: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lift: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_factor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v_stall: Option<f64>,
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// L = ½·ρ·V²·S·CL
pub fn lift_force(velocity: f64, surface_area_m2: f64, cl: f64) -> f64 {
    0.5 * AIR_DENSITY * velocity * velocity * surface_area_m2 * cl
}

/// Vs = √(2·W / (ρ·S·CLmax)), W in newtons.
pub fn stall_speed(weight_kg: f64, surface_area_m2: f64, cl_max: f64) -> f64 {
    (2.0 * newtons(weight_kg) / (AIR_DENSITY * surface_area_m2 * cl_max)).sqrt()
}

/// Compute every result the given inputs unlock. `weight_kg` is the
/// already-resolved aircraft weight, if any.
pub fn compute(
    inputs: &WingParametersInputs,
    weight_kg: Option<f64>,
) -> Result<WingParametersResults> {
    let root = positive(inputs.root_chord);
    let tip = positive(inputs.tip_chord);
    let span = positive(inputs.wingspan);

    let area_in2 = match (root, tip, span) {
        (Some(root), Some(tip), Some(span)) => 0.5 * (root + tip) * span,
        _ => positive(inputs.surface_area).ok_or_else(|| {
            PerfError::validation(
                "wing geometry",
                "provide root chord, tip chord and wingspan, or a surface area",
            )
        })?,
    };
    let area_m2 = area_in2 * IN2_TO_M2;

    let aspect_ratio = span.map(|s| s * s / area_in2);
    let taper_ratio = match (root, tip) {
        (Some(root), Some(tip)) => Some(tip / root),
        _ => None,
    };

    let mut results = WingParametersResults {
        surface_area_in2: area_in2,
        surface_area_m2: area_m2,
        aspect_ratio,
        taper_ratio,
        wing_loading: None,
        lift: None,
        load_factor: None,
        v_stall: None,
    };

    let Some(weight) = positive(weight_kg) else {
        return Ok(results);
    };
    results.wing_loading = Some(newtons(weight) / area_m2);

    let (Some(velocity), Some(cl)) = (positive(inputs.velocity), positive(inputs.cl)) else {
        return Ok(results);
    };
    let lift = lift_force(velocity, area_m2, cl);
    results.lift = Some(lift);
    results.load_factor = Some(lift / newtons(weight));

    if let Some(cl_max) = positive(inputs.cl_max) {
        results.v_stall = Some(stall_speed(weight, area_m2, cl_max));
    }

    Ok(results)
}

/// Resolve weight, compute, persist the inputs (with the resolved
/// weight merged in) and side-write `aerodynamicData` when a stall
/// speed was produced.
pub fn run(store: &mut Store, inputs: &WingParametersInputs) -> Result<WingParametersResults> {
    let weight = match positive(inputs.weight) {
        Some(w) => Some(w),
        None => store
            .wing_area_inputs()?
            .map(|wa| wa.weight)
            .filter(|w| w.is_finite() && *w > 0.0),
    };

    let results = compute(inputs, weight)?;

    let mut persisted = inputs.clone();
    persisted.weight = weight;
    store.set_wing_parameters_inputs(&persisted)?;

    if let (Some(v_stall), Some(lift)) = (results.v_stall, results.lift) {
        store.set_aerodynamic_data(&AerodynamicData {
            v_stall,
            lift,
            drag: None,
            timestamp: timestamp_now(),
        })?;
    }

    Ok(results)
}
