//! Landing distance from approach energy and effective drag.
//!
//! Approach is flown at 1.2·Vstall, touchdown at 1.15·Vstall. Net
//! thrust at approach speed comes from the nearest stored thrust-curve
//! point; without thrust data the calculation degrades to zero net
//! thrust. Effective drag is floored at 0.1 N so the distance never
//! divides by zero, and the obstacle-clearance allowance of 15 m is
//! part of the historical formula.

use tracing::warn;

use crate::constants::{newtons, AIR_DENSITY, GRAVITY_MPS2};
use crate::documents::{timestamp_now, LandingDistanceData, ThrustPoint};
use crate::error::{PerfError, Result};
use crate::store::Store;
use crate::wing_params::stall_speed;

/// Minimum effective drag in newtons.
pub const EFFECTIVE_DRAG_FLOOR: f64 = 0.1;

/// Net thrust of the curve point closest in velocity to `velocity`;
/// the earlier point wins a tie. `None` when the curve is empty.
fn net_thrust_near(curve: &[ThrustPoint], velocity: f64) -> Option<f64> {
    curve
        .iter()
        .min_by(|a, b| {
            let da = (a.velocity - velocity).abs();
            let db = (b.velocity - velocity).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|p| if p.net_thrust.is_finite() { p.net_thrust } else { 0.0 })
}

/// Compute the landing summary. Pure; `thrust_curve` may be empty.
pub fn compute(
    cd: f64,
    weight_kg: f64,
    surface_area: f64,
    cl_max: f64,
    thrust_curve: &[ThrustPoint],
) -> Result<LandingDistanceData> {
    if !(cd > 0.0) {
        return Err(PerfError::validation("cd", "must be greater than zero"));
    }

    let v_stall = stall_speed(weight_kg, surface_area, cl_max);
    let lift = newtons(weight_kg);
    let v_takeoff = 1.2 * v_stall;
    let v_touchdown = 1.15 * v_stall;

    let drag = AIR_DENSITY * v_takeoff * v_takeoff * surface_area * cd / 2.0;

    let net_thrust_at_v = match net_thrust_near(thrust_curve, v_takeoff) {
        Some(net) => net,
        None => {
            warn!("no thrust curve available, assuming zero net thrust on approach");
            0.0
        }
    };

    let effective_drag = (drag - net_thrust_at_v).max(EFFECTIVE_DRAG_FLOOR);
    let velocity_term = (v_takeoff * v_takeoff - v_touchdown * v_touchdown) / (2.0 * GRAVITY_MPS2);
    let landing_distance = (lift / effective_drag) * (velocity_term + 15.0);

    Ok(LandingDistanceData {
        cd,
        v_stall,
        v_takeoff,
        v_touchdown,
        lift,
        drag,
        surface_area,
        net_thrust_at_v,
        effective_drag,
        landing_distance,
        timestamp: timestamp_now(),
    })
}

/// Resolve wing parameters, compute, and persist the summary along
/// with the standalone cd value. The computed approach drag is merged
/// into the shared aerodynamic record when one exists.
pub fn run(store: &mut Store, cd: f64) -> Result<LandingDistanceData> {
    let params = store
        .wing_parameters_inputs()?
        .ok_or_else(|| PerfError::missing("wing parameters", "wing-params"))?;

    let weight = params
        .weight
        .filter(|w| w.is_finite() && *w > 0.0)
        .ok_or_else(|| PerfError::missing("aircraft weight", "wing-params"))?;
    let surface_area = params
        .surface_area
        .filter(|a| a.is_finite() && *a > 0.0)
        .ok_or_else(|| PerfError::missing("wing area", "wing-params"))?;
    let cl_max = params
        .cl_max
        .filter(|c| c.is_finite() && *c > 0.0)
        .ok_or_else(|| PerfError::missing("CLmax", "wing-params"))?;

    let thrust_curve = store
        .dynamic_thrust_data()?
        .map(|d| d.thrust_curve)
        .unwrap_or_default();

    let data = compute(cd, weight, surface_area, cl_max, &thrust_curve)?;

    store.set_landing_distance_data(&data)?;
    store.set_landing_cd(cd)?;
    if let Some(mut aero) = store.aerodynamic_data()? {
        aero.drag = Some(data.drag);
        aero.timestamp = timestamp_now();
        store.set_aerodynamic_data(&aero)?;
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::WingParametersInputs;
    use crate::store::keys;

    fn point(velocity: f64, net_thrust: f64) -> ThrustPoint {
        ThrustPoint {
            velocity,
            thrust: net_thrust.max(0.0),
            drag: 0.0,
            net_thrust,
        }
    }

    #[test]
    fn speeds_scale_from_stall_speed() {
        let data = compute(0.05, 2.0, 0.3, 1.2, &[]).unwrap();
        assert!((data.v_takeoff - 1.2 * data.v_stall).abs() < 1e-12);
        assert!((data.v_touchdown - 1.15 * data.v_stall).abs() < 1e-12);
        assert_eq!(data.lift, 2.0 * 9.81);
    }

    #[test]
    fn nearest_thrust_point_wins() {
        let curve = vec![point(5.0, 1.0), point(10.0, 2.0), point(15.0, 3.0)];
        assert_eq!(net_thrust_near(&curve, 11.0), Some(2.0));
        assert_eq!(net_thrust_near(&curve, 14.0), Some(3.0));
        // equidistant: the earlier point wins
        assert_eq!(net_thrust_near(&curve, 12.5), Some(2.0));
        assert_eq!(net_thrust_near(&[], 10.0), None);
    }

    #[test]
    fn effective_drag_never_drops_below_the_floor() {
        // net thrust far above drag forces the floor
        let curve = vec![point(0.0, 1e6)];
        let data = compute(0.05, 2.0, 0.3, 1.2, &curve).unwrap();
        assert_eq!(data.effective_drag, EFFECTIVE_DRAG_FLOOR);
        assert!(data.landing_distance.is_finite());
    }

    #[test]
    fn no_thrust_data_degrades_to_zero_net_thrust() {
        let data = compute(0.05, 2.0, 0.3, 1.2, &[]).unwrap();
        assert_eq!(data.net_thrust_at_v, 0.0);
        assert!((data.effective_drag - data.drag).abs() < 1e-12);
    }

    #[test]
    fn run_persists_summary_cd_and_drag_merge() {
        let mut store = Store::in_memory();
        store
            .set_wing_parameters_inputs(&WingParametersInputs {
                surface_area: Some(0.3),
                cl_max: Some(1.2),
                weight: Some(2.0),
                velocity: Some(12.0),
                cl: Some(0.8),
                ..Default::default()
            })
            .unwrap();
        // seed an aerodynamic record so the drag merge has a target
        let params = store.wing_parameters_inputs().unwrap().unwrap();
        crate::wing_params::run(&mut store, &params).unwrap();

        let data = run(&mut store, 0.05).unwrap();
        assert_eq!(store.landing_cd().unwrap(), Some(0.05));
        assert_eq!(
            store.raw(keys::LANDING_CD_VALUE).unwrap().as_deref(),
            Some("0.05")
        );
        let aero = store.aerodynamic_data().unwrap().unwrap();
        assert_eq!(aero.drag, Some(data.drag));
        assert!(store.landing_distance_data().unwrap().is_some());
    }

    #[test]
    fn missing_wing_parameters_is_reported() {
        let mut store = Store::in_memory();
        let err = run(&mut store, 0.05).unwrap_err();
        match err {
            PerfError::MissingUpstream { stage, .. } => assert_eq!(stage, "wing-params"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
