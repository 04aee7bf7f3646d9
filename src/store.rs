//! Typed document store.
//!
//! All stages share one key-value store of JSON documents; this module
//! gives each document a typed accessor pair so stages never touch raw
//! strings. Backends are pluggable: tests run against an in-memory map,
//! the CLI persists one file per key under a data directory.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::documents::{
    AerodynamicData, ClimbRateResults, DynamicThrustData, DynamicThrustInputs,
    LandingDistanceData, SinkRateResults, TakeoffDistanceData, WingAreaInputs,
    WingParametersInputs,
};
use crate::error::Result;

/// Storage key names. These match the historical browser-storage keys
/// byte for byte so existing exported data remains loadable.
pub mod keys {
    pub const WING_AREA_INPUTS: &str = "wingAreaInputs";
    pub const WING_PARAMETERS_INPUTS: &str = "wingParametersInputs";
    pub const AERODYNAMIC_DATA: &str = "aerodynamicData";
    pub const DYNAMIC_THRUST_INPUTS: &str = "dynamicThrustInputs";
    pub const DYNAMIC_THRUST_DATA: &str = "dynamicThrustData";
    pub const CLIMB_RATE_RESULTS: &str = "climbRateResults";
    pub const SINK_RATE_RESULTS: &str = "sinkRateResults";
    pub const LANDING_DISTANCE_DATA: &str = "landingDistanceData";
    pub const LANDING_CD_VALUE: &str = "landingCdValue";
    pub const TAKEOFF_DISTANCE_DATA: &str = "takeoffDistanceData";
    pub const WEIGHT: &str = "weight";
    pub const CL_MAX: &str = "clMax";
    pub const V_STALL: &str = "vStall";
    pub const SURFACE_AREA: &str = "surfaceArea";
}

/// Raw string storage. Keys map to opaque values; interpretation is the
/// [`Store`]'s job.
pub trait StorageBackend {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
    fn keys(&self) -> Result<Vec<String>>;
}

/// HashMap-backed storage for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: HashMap<String, String>,
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.values.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

/// One `<key>.json` file per storage key under a data directory.
#[derive(Debug)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)?;
        Ok(FileBackend { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            if let Some(name) = name.to_str() {
                if let Some(stem) = name.strip_suffix(".json") {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// Typed repository over a [`StorageBackend`].
///
/// Reads are forgiving: a missing key or an unparseable value both read
/// as `None` (the latter with a warning), and the consuming stage then
/// reports the document as missing. Writes replace whole documents.
pub struct Store {
    backend: Box<dyn StorageBackend>,
}

impl Store {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Store { backend }
    }

    pub fn in_memory() -> Self {
        Store::new(Box::new(MemoryBackend::default()))
    }

    pub fn open(dir: PathBuf) -> Result<Self> {
        Ok(Store::new(Box::new(FileBackend::new(dir)?)))
    }

    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.backend.read(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!(key, %err, "stored value is not valid JSON for its type, treating as absent");
                Ok(None)
            }
        }
    }

    fn set_json<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.backend.write(key, &raw)
    }

    /// Read a bare numeric key. Values may be stored either as plain
    /// numbers or as quoted number strings; both forms parse.
    pub fn get_number(&self, key: &str) -> Result<Option<f64>> {
        let Some(raw) = self.backend.read(key)? else {
            return Ok(None);
        };
        let trimmed = raw.trim().trim_matches('"');
        match trimmed.parse::<f64>() {
            Ok(n) => Ok(Some(n)),
            Err(_) => {
                warn!(key, value = raw.as_str(), "stored value is not numeric, treating as absent");
                Ok(None)
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Result<()> {
        self.backend.remove(key)
    }

    pub fn keys(&self) -> Result<Vec<String>> {
        self.backend.keys()
    }

    pub fn raw(&self, key: &str) -> Result<Option<String>> {
        self.backend.read(key)
    }

    pub fn wing_area_inputs(&self) -> Result<Option<WingAreaInputs>> {
        self.get_json(keys::WING_AREA_INPUTS)
    }

    pub fn set_wing_area_inputs(&mut self, inputs: &WingAreaInputs) -> Result<()> {
        self.set_json(keys::WING_AREA_INPUTS, inputs)
    }

    pub fn wing_parameters_inputs(&self) -> Result<Option<WingParametersInputs>> {
        self.get_json(keys::WING_PARAMETERS_INPUTS)
    }

    pub fn set_wing_parameters_inputs(&mut self, inputs: &WingParametersInputs) -> Result<()> {
        self.set_json(keys::WING_PARAMETERS_INPUTS, inputs)
    }

    /// Merge a weight into the wing-parameters document, creating it if
    /// absent. Used when a downstream stage accepts a default weight.
    pub fn set_wing_parameters_weight(&mut self, weight_kg: f64) -> Result<()> {
        let mut inputs = self.wing_parameters_inputs()?.unwrap_or_default();
        inputs.weight = Some(weight_kg);
        self.set_wing_parameters_inputs(&inputs)
    }

    pub fn aerodynamic_data(&self) -> Result<Option<AerodynamicData>> {
        self.get_json(keys::AERODYNAMIC_DATA)
    }

    pub fn set_aerodynamic_data(&mut self, data: &AerodynamicData) -> Result<()> {
        self.set_json(keys::AERODYNAMIC_DATA, data)
    }

    pub fn dynamic_thrust_inputs(&self) -> Result<Option<DynamicThrustInputs>> {
        self.get_json(keys::DYNAMIC_THRUST_INPUTS)
    }

    pub fn set_dynamic_thrust_inputs(&mut self, inputs: &DynamicThrustInputs) -> Result<()> {
        self.set_json(keys::DYNAMIC_THRUST_INPUTS, inputs)
    }

    pub fn dynamic_thrust_data(&self) -> Result<Option<DynamicThrustData>> {
        self.get_json(keys::DYNAMIC_THRUST_DATA)
    }

    pub fn set_dynamic_thrust_data(&mut self, data: &DynamicThrustData) -> Result<()> {
        self.set_json(keys::DYNAMIC_THRUST_DATA, data)
    }

    pub fn climb_rate_results(&self) -> Result<Option<ClimbRateResults>> {
        self.get_json(keys::CLIMB_RATE_RESULTS)
    }

    pub fn set_climb_rate_results(&mut self, results: &ClimbRateResults) -> Result<()> {
        self.set_json(keys::CLIMB_RATE_RESULTS, results)
    }

    pub fn sink_rate_results(&self) -> Result<Option<SinkRateResults>> {
        self.get_json(keys::SINK_RATE_RESULTS)
    }

    pub fn set_sink_rate_results(&mut self, results: &SinkRateResults) -> Result<()> {
        self.set_json(keys::SINK_RATE_RESULTS, results)
    }

    pub fn landing_distance_data(&self) -> Result<Option<LandingDistanceData>> {
        self.get_json(keys::LANDING_DISTANCE_DATA)
    }

    pub fn set_landing_distance_data(&mut self, data: &LandingDistanceData) -> Result<()> {
        self.set_json(keys::LANDING_DISTANCE_DATA, data)
    }

    /// The landing drag coefficient is historically a bare number
    /// string rather than a JSON document.
    pub fn set_landing_cd(&mut self, cd: f64) -> Result<()> {
        self.backend.write(keys::LANDING_CD_VALUE, &cd.to_string())
    }

    pub fn landing_cd(&self) -> Result<Option<f64>> {
        self.get_number(keys::LANDING_CD_VALUE)
    }

    pub fn takeoff_distance_data(&self) -> Result<Option<TakeoffDistanceData>> {
        self.get_json(keys::TAKEOFF_DISTANCE_DATA)
    }

    pub fn set_takeoff_distance_data(&mut self, data: &TakeoffDistanceData) -> Result<()> {
        self.set_json(keys::TAKEOFF_DISTANCE_DATA, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::timestamp_now;

    #[test]
    fn missing_key_reads_as_none() {
        let store = Store::in_memory();
        assert!(store.wing_area_inputs().unwrap().is_none());
        assert!(store.get_number(keys::WEIGHT).unwrap().is_none());
    }

    #[test]
    fn unparseable_document_reads_as_none() {
        let mut store = Store::in_memory();
        store
            .backend
            .write(keys::AERODYNAMIC_DATA, "{not json")
            .unwrap();
        assert!(store.aerodynamic_data().unwrap().is_none());
    }

    #[test]
    fn document_round_trip() {
        let mut store = Store::in_memory();
        let inputs = WingAreaInputs {
            weight: 2.0,
            vstall_start: 10.0,
            vstall_end: 20.0,
            vstall_step: 1.0,
            clmax_start: 1.0,
            clmax_end: 2.0,
            clmax_step: 0.1,
        };
        store.set_wing_area_inputs(&inputs).unwrap();
        assert_eq!(store.wing_area_inputs().unwrap(), Some(inputs));
    }

    #[test]
    fn bare_numbers_parse_quoted_or_not() {
        let mut store = Store::in_memory();
        store.backend.write(keys::WEIGHT, "\"12.5\"").unwrap();
        store.backend.write(keys::CL_MAX, "1.4").unwrap();
        assert_eq!(store.get_number(keys::WEIGHT).unwrap(), Some(12.5));
        assert_eq!(store.get_number(keys::CL_MAX).unwrap(), Some(1.4));
    }

    #[test]
    fn landing_cd_is_written_as_a_bare_number() {
        let mut store = Store::in_memory();
        store.set_landing_cd(0.12).unwrap();
        assert_eq!(
            store.raw(keys::LANDING_CD_VALUE).unwrap().as_deref(),
            Some("0.12")
        );
        assert_eq!(store.landing_cd().unwrap(), Some(0.12));
    }

    #[test]
    fn weight_merge_preserves_existing_fields() {
        let mut store = Store::in_memory();
        let mut inputs = WingParametersInputs::default();
        inputs.wingspan = Some(60.0);
        store.set_wing_parameters_inputs(&inputs).unwrap();

        store.set_wing_parameters_weight(10.0).unwrap();
        let merged = store.wing_parameters_inputs().unwrap().unwrap();
        assert_eq!(merged.wingspan, Some(60.0));
        assert_eq!(merged.weight, Some(10.0));
    }

    #[test]
    fn file_backend_round_trip() {
        let dir = std::env::temp_dir().join(format!("aeroperf-store-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let mut store = Store::open(dir.clone()).unwrap();

        let data = AerodynamicData {
            v_stall: 11.0,
            lift: 20.0,
            drag: None,
            timestamp: timestamp_now(),
        };
        store.set_aerodynamic_data(&data).unwrap();
        assert_eq!(store.aerodynamic_data().unwrap(), Some(data));
        assert_eq!(store.keys().unwrap(), vec!["aerodynamicData".to_string()]);

        store.remove(keys::AERODYNAMIC_DATA).unwrap();
        assert!(store.aerodynamic_data().unwrap().is_none());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
