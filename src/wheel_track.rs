//! Landing-gear placement from the wheel base.
//!
//! Main gear sits at 20% of the wheel base from the center of gravity
//! and nose gear at 80%, the standard tricycle split. The weight
//! factor in the historical formula cancels algebraically, but a valid
//! stored weight is still required before the calculation runs.

use serde::Serialize;

use crate::constants::newtons;
use crate::error::{PerfError, Result};
use crate::store::Store;
use crate::sweep::stepped_range;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WheelTrackPoint {
    pub wheel_base: f64,
    pub main_gear_distance: f64,
    pub nose_gear_distance: f64,
}

pub fn main_gear_distance(wheel_base: f64, weight_n: f64) -> f64 {
    (wheel_base * weight_n * 0.2) / weight_n
}

pub fn nose_gear_distance(wheel_base: f64, weight_n: f64) -> f64 {
    (wheel_base * weight_n * 0.8) / weight_n
}

/// Gear offsets over a wheel-base sweep. Pure.
pub fn compute(start: f64, end: f64, step: f64, weight_n: f64) -> Result<Vec<WheelTrackPoint>> {
    if !start.is_finite() || !end.is_finite() || !step.is_finite() || step <= 0.0 || end < start {
        return Err(PerfError::validation(
            "wheel base range",
            "end must be >= start and step > 0",
        ));
    }

    let points: Vec<WheelTrackPoint> = stepped_range(start, end, step)
        .into_iter()
        .map(|wheel_base| WheelTrackPoint {
            wheel_base,
            main_gear_distance: main_gear_distance(wheel_base, weight_n),
            nose_gear_distance: nose_gear_distance(wheel_base, weight_n),
        })
        .collect();

    if points.is_empty() {
        return Err(PerfError::NoValidPoints);
    }
    Ok(points)
}

/// Resolve the stored weight gate and compute the sweep. Read-only;
/// persists nothing.
pub fn run(store: &Store, start: f64, end: f64, step: f64) -> Result<Vec<WheelTrackPoint>> {
    let weight_kg = store
        .wing_area_inputs()?
        .map(|wa| wa.weight)
        .filter(|w| w.is_finite() && *w > 0.0)
        .ok_or_else(|| PerfError::missing("aircraft weight", "wing-area"))?;

    compute(start, end, step, newtons(weight_kg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::WingAreaInputs;

    #[test]
    fn gear_split_is_twenty_eighty() {
        let points = compute(1.0, 1.0, 0.5, 19.62).unwrap();
        assert_eq!(points.len(), 1);
        assert!((points[0].main_gear_distance - 0.2).abs() < 1e-12);
        assert!((points[0].nose_gear_distance - 0.8).abs() < 1e-12);
    }

    #[test]
    fn offsets_are_independent_of_weight() {
        for weight_n in [1.0, 19.62, 981.0] {
            assert!((main_gear_distance(2.5, weight_n) - 0.5).abs() < 1e-12);
            assert!((nose_gear_distance(2.5, weight_n) - 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn sweep_never_appends_the_end_value() {
        let points = compute(0.5, 1.05, 0.2, 19.62).unwrap();
        let last = points.last().unwrap().wheel_base;
        assert!((last - 0.9).abs() < 1e-12);
    }

    #[test]
    fn weight_gate_still_applies() {
        let store = Store::in_memory();
        let err = run(&store, 0.5, 1.5, 0.1).unwrap_err();
        match err {
            PerfError::MissingUpstream { stage, .. } => assert_eq!(stage, "wing-area"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn run_uses_the_stored_weight() {
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
        let points = run(&store, 0.5, 1.5, 0.5).unwrap();
        assert_eq!(points.len(), 3);
        assert!((points[2].main_gear_distance - 0.3).abs() < 1e-12);
    }
}
