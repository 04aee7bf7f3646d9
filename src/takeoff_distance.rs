//! Ground-roll takeoff distance.
//!
//! d = 1.44·W² / (S·ρ·g·CLmax·W·a) reduces to 1.44·W / (S·ρ·g·CLmax·a)
//! with the acceleration term a = T/W − D/W − μ_r(1 − L/W). When that
//! term is not positive the aircraft cannot accelerate to rotation
//! speed and the distance is infinite.
//!
//! Missing upstream data has documented fallbacks sized for a small
//! UAV; they apply only when the caller opts in.

use tracing::warn;

use crate::constants::{newtons, AIR_DENSITY, GRAVITY_MPS2};
use crate::documents::{timestamp_now, TakeoffDistanceData, ThrustPoint};
use crate::error::{PerfError, Result};
use crate::store::Store;

/// Fallback weight for a small UAV.
pub const DEFAULT_WEIGHT_KG: f64 = 1.5;
/// Wing loading used to synthesize a surface area from weight.
pub const DEFAULT_WING_LOADING: f64 = 5.0;
/// Surface areas above this are treated as implausible for this class
/// of aircraft and replaced by the wing-loading estimate.
pub const MAX_PLAUSIBLE_AREA_M2: f64 = 2.0;
/// Fallback CLmax when none was entered.
pub const DEFAULT_CL_MAX: f64 = 1.5;
/// Ground-roll drag model: cd at the reference rolling speed.
const GROUND_ROLL_CD: f64 = 0.04;
const GROUND_ROLL_SPEED: f64 = 10.0;
/// Minimum thrust-to-weight ratio assumed for the powerplant.
const MIN_THRUST_RATIO: f64 = 0.3;
/// Rolling friction coefficient for a hard surface.
const ROLLING_FRICTION: f64 = 0.02;

/// Thrust at `velocity` by linear interpolation over the curve sorted
/// by velocity, clamped to the end values. 0 with no curve.
fn thrust_at_velocity(curve: &[ThrustPoint], velocity: f64) -> f64 {
    if curve.is_empty() {
        return 0.0;
    }
    let mut sorted: Vec<&ThrustPoint> = curve.iter().collect();
    sorted.sort_by(|a, b| {
        a.velocity
            .partial_cmp(&b.velocity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let first = sorted[0];
    let last = sorted[sorted.len() - 1];
    if velocity <= first.velocity {
        return first.thrust;
    }
    if velocity >= last.velocity {
        return last.thrust;
    }
    for pair in sorted.windows(2) {
        let (lower, upper) = (pair[0], pair[1]);
        if lower.velocity <= velocity && upper.velocity >= velocity {
            let ratio = (velocity - lower.velocity) / (upper.velocity - lower.velocity);
            return lower.thrust + (upper.thrust - lower.thrust) * ratio;
        }
    }
    last.thrust
}

/// Compute the takeoff summary. Pure; `thrust_curve` may be empty.
pub fn compute(
    weight_kg: f64,
    surface_area: f64,
    cl_max: f64,
    thrust_curve: &[ThrustPoint],
) -> Result<TakeoffDistanceData> {
    if !(weight_kg > 0.0) || !(surface_area > 0.0) || !(cl_max > 0.0) {
        return Err(PerfError::validation(
            "takeoff parameters",
            "weight, surface area and CLmax must all be greater than zero",
        ));
    }

    let weight_n = newtons(weight_kg);
    let v_stall = (2.0 * weight_n / (AIR_DENSITY * surface_area * cl_max)).sqrt();
    let v_takeoff = 1.2 * v_stall;

    let drag =
        0.5 * AIR_DENSITY * GROUND_ROLL_SPEED * GROUND_ROLL_SPEED * surface_area * GROUND_ROLL_CD;

    let interpolated = thrust_at_velocity(thrust_curve, v_takeoff);
    let effective_thrust = interpolated.max(weight_n * MIN_THRUST_RATIO);

    let lift_force = 0.5 * AIR_DENSITY * v_takeoff * v_takeoff * surface_area * cl_max;
    let acceleration_term = effective_thrust / weight_n
        - drag / weight_n
        - ROLLING_FRICTION * (1.0 - lift_force / weight_n);

    if acceleration_term <= 0.0 {
        return Err(PerfError::Infeasible(
            "aircraft cannot take off: thrust is insufficient to overcome drag and rolling resistance".to_string(),
        ));
    }

    let distance =
        1.44 * weight_n / (surface_area * AIR_DENSITY * GRAVITY_MPS2 * cl_max * acceleration_term);

    Ok(TakeoffDistanceData {
        distance,
        lift_force,
        thrust_at_takeoff: effective_thrust,
        v_takeoff,
        v_stall,
        weight: weight_n,
        surface_area,
        cl_max,
        timestamp: timestamp_now(),
    })
}

/// Resolve parameters from the store with the documented fallbacks,
/// compute, and persist the summary. Fallbacks for weight and surface
/// area require `use_defaults`; a missing CLmax always falls back to
/// [`DEFAULT_CL_MAX`].
pub fn run(store: &mut Store, use_defaults: bool) -> Result<TakeoffDistanceData> {
    let wing_area_inputs = store.wing_area_inputs()?;
    let wing_params = store.wing_parameters_inputs()?.unwrap_or_default();

    let weight = wing_area_inputs
        .map(|wa| wa.weight)
        .filter(|w| w.is_finite() && *w > 0.0)
        .or(wing_params.weight.filter(|w| w.is_finite() && *w > 0.0));
    let weight = match weight {
        Some(w) => w,
        None if use_defaults => {
            warn!("no aircraft weight found, assuming {DEFAULT_WEIGHT_KG} kg");
            DEFAULT_WEIGHT_KG
        }
        None => {
            return Err(PerfError::missing_with_default(
                "aircraft weight",
                "wing-area",
                DEFAULT_WEIGHT_KG,
            ))
        }
    };

    let stored_area = wing_params
        .surface_area
        .filter(|a| a.is_finite() && *a > 0.0 && *a <= MAX_PLAUSIBLE_AREA_M2);
    let surface_area = match stored_area {
        Some(a) => a,
        None if use_defaults => {
            let estimated = weight / DEFAULT_WING_LOADING;
            warn!(estimated, "no plausible wing area found, estimating from wing loading");
            estimated
        }
        None => {
            return Err(PerfError::missing_with_default(
                "plausible wing area",
                "wing-params",
                weight / DEFAULT_WING_LOADING,
            ))
        }
    };

    let cl_max = wing_params
        .cl_max
        .filter(|c| c.is_finite() && *c > 0.0)
        .unwrap_or_else(|| {
            warn!("no CLmax found, assuming {DEFAULT_CL_MAX}");
            DEFAULT_CL_MAX
        });

    let thrust_curve = store
        .dynamic_thrust_data()?
        .map(|d| d.thrust_curve)
        .unwrap_or_default();

    let data = compute(weight, surface_area, cl_max, &thrust_curve)?;
    store.set_takeoff_distance_data(&data)?;
    Ok(data)
}
