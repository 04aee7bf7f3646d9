//! Required wing area over a stall-speed / CLmax grid.
//!
//! S = 2·W / (ρ·V² ·CLmax), evaluated for every combination of the two
//! swept inputs. The grid axes use the append-end sweep so both range
//! end values always appear.

use serde::Serialize;

use crate::constants::{newtons, AIR_DENSITY};
use crate::documents::WingAreaInputs;
use crate::error::{PerfError, Result};
use crate::store::Store;
use crate::sweep::appended_range;

/// One cell of the wing-area matrix.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WingAreaCell {
    pub cl_max: f64,
    pub v_stall: f64,
    /// Required wing area in m², rounded to 2 decimals like the
    /// stored records always were.
    pub wing_area: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WingAreaMatrix {
    pub vstalls: Vec<f64>,
    pub clmaxes: Vec<f64>,
    /// Row-major, one row per CLmax value.
    pub cells: Vec<Vec<WingAreaCell>>,
}

/// Required wing area in m² for one (Vstall, CLmax) pair.
pub fn required_wing_area(weight_kg: f64, v_stall: f64, cl_max: f64) -> f64 {
    2.0 * newtons(weight_kg) / (AIR_DENSITY * v_stall * v_stall * cl_max)
}

fn validate(inputs: &WingAreaInputs) -> Result<()> {
    if !inputs.weight.is_finite() || inputs.weight <= 0.0 {
        return Err(PerfError::validation(
            "weight",
            "must be greater than 0",
        ));
    }
    if !inputs.vstall_start.is_finite()
        || !inputs.vstall_end.is_finite()
        || !inputs.vstall_step.is_finite()
        || inputs.vstall_start < 0.0
        || inputs.vstall_end <= inputs.vstall_start
        || inputs.vstall_step <= 0.0
    {
        return Err(PerfError::validation(
            "vstall range",
            "start must be >= 0, end > start, step > 0",
        ));
    }
    if !inputs.clmax_start.is_finite()
        || !inputs.clmax_end.is_finite()
        || !inputs.clmax_step.is_finite()
        || inputs.clmax_start <= 0.0
        || inputs.clmax_end <= inputs.clmax_start
        || inputs.clmax_step <= 0.0
    {
        return Err(PerfError::validation(
            "clmax range",
            "start must be > 0, end > start, step > 0",
        ));
    }
    Ok(())
}

/// Build the full matrix. Pure; does not touch the store.
pub fn compute(inputs: &WingAreaInputs) -> Result<WingAreaMatrix> {
    validate(inputs)?;

    let vstalls = appended_range(inputs.vstall_start, inputs.vstall_end, inputs.vstall_step);
    let clmaxes = appended_range(inputs.clmax_start, inputs.clmax_end, inputs.clmax_step);

    let cells = clmaxes
        .iter()
        .map(|&cl_max| {
            vstalls
                .iter()
                .map(|&v_stall| WingAreaCell {
                    cl_max,
                    v_stall,
                    wing_area: (required_wing_area(inputs.weight, v_stall, cl_max) * 100.0)
                        .round()
                        / 100.0,
                })
                .collect()
        })
        .collect();

    Ok(WingAreaMatrix {
        vstalls,
        clmaxes,
        cells,
    })
}

/// Compute the matrix and persist the inputs for downstream stages.
pub fn run(store: &mut Store, inputs: &WingAreaInputs) -> Result<WingAreaMatrix> {
    let matrix = compute(inputs)?;
    store.set_wing_area_inputs(inputs)?;
    Ok(matrix)
}
