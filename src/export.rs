//! Report collection.
//!
//! Walks the store and bundles whatever inputs and results are present
//! into one serializable report. Pure consumer: nothing is validated,
//! recomputed, or written. Absent documents simply leave their section
//! out of the bundle.

use serde::Serialize;

use crate::documents::{
    ClimbRateResults, DynamicThrustData, DynamicThrustInputs, LandingDistanceData,
    SinkRateResults, TakeoffDistanceData, WingAreaInputs, WingParametersInputs,
};
use crate::documents::{timestamp_now, AerodynamicData};
use crate::error::Result;
use crate::store::Store;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub exported_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wing_area_inputs: Option<WingAreaInputs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wing_parameters_inputs: Option<WingParametersInputs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aerodynamic_data: Option<AerodynamicData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_thrust_inputs: Option<DynamicThrustInputs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_thrust_data: Option<DynamicThrustData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub climb_rate_results: Option<ClimbRateResults>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sink_rate_results: Option<SinkRateResults>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landing_distance_data: Option<LandingDistanceData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landing_cd_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub takeoff_distance_data: Option<TakeoffDistanceData>,
}

impl ExportBundle {
    /// Number of sections present, not counting the timestamp.
    pub fn section_count(&self) -> usize {
        [
            self.wing_area_inputs.is_some(),
            self.wing_parameters_inputs.is_some(),
            self.aerodynamic_data.is_some(),
            self.dynamic_thrust_inputs.is_some(),
            self.dynamic_thrust_data.is_some(),
            self.climb_rate_results.is_some(),
            self.sink_rate_results.is_some(),
            self.landing_distance_data.is_some(),
            self.landing_cd_value.is_some(),
            self.takeoff_distance_data.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.section_count() == 0
    }
}

/// Collect every stored document into a bundle.
pub fn collect(store: &Store) -> Result<ExportBundle> {
    Ok(ExportBundle {
        exported_at: timestamp_now(),
        wing_area_inputs: store.wing_area_inputs()?,
        wing_parameters_inputs: store.wing_parameters_inputs()?,
        aerodynamic_data: store.aerodynamic_data()?,
        dynamic_thrust_inputs: store.dynamic_thrust_inputs()?,
        dynamic_thrust_data: store.dynamic_thrust_data()?,
        climb_rate_results: store.climb_rate_results()?,
        sink_rate_results: store.sink_rate_results()?,
        landing_distance_data: store.landing_distance_data()?,
        landing_cd_value: store.landing_cd()?,
        takeoff_distance_data: store.takeoff_distance_data()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::WingAreaInputs;

    #[test]
    fn empty_store_gives_an_empty_bundle() {
        let store = Store::in_memory();
        let bundle = collect(&store).unwrap();
        assert!(bundle.is_empty());
        let json = serde_json::to_string(&bundle).unwrap();
        assert!(!json.contains("wingAreaInputs"));
    }

    #[test]
    fn only_present_documents_appear() {
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
        store.set_landing_cd(0.05).unwrap();

        let bundle = collect(&store).unwrap();
        assert_eq!(bundle.section_count(), 2);
        assert!(bundle.wing_area_inputs.is_some());
        assert_eq!(bundle.landing_cd_value, Some(0.05));
        assert!(bundle.climb_rate_results.is_none());
    }
}
