//! Persisted document types.
//!
//! Each struct maps 1:1 onto one storage key, with field names kept
//! camelCase so existing stored data loads unchanged. Input documents
//! accept numbers that were stored as JSON strings (older data carried
//! raw form-field text); serialization always writes real numbers.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Current time as an RFC 3339 string with millisecond precision,
/// the format every result document's `timestamp` field uses.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Deserializers that accept a JSON number or a numeric string.
pub(crate) mod flex {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrText {
        Num(f64),
        Text(String),
    }

    pub fn f64_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match NumOrText::deserialize(deserializer)? {
            NumOrText::Num(n) => Ok(n),
            NumOrText::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| serde::de::Error::custom(format!("not a number: {s:?}"))),
        }
    }

    /// Missing fields, empty strings, and unparseable strings all read
    /// as `None`; the stage-level fallback logic handles absence.
    pub fn opt_f64_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<NumOrText>::deserialize(deserializer)? {
            None => Ok(None),
            Some(NumOrText::Num(n)) => Ok(Some(n)),
            Some(NumOrText::Text(s)) => Ok(s.trim().parse::<f64>().ok()),
        }
    }

    /// JSON `null` reads back as NaN. The thrust curve stores the v=0
    /// required-thrust singularity as null (non-finite values have no
    /// JSON representation); consumers skip non-finite points.
    pub fn f64_or_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

/// Inputs for the required-wing-area matrix (`wingAreaInputs`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WingAreaInputs {
    #[serde(deserialize_with = "flex::f64_or_string")]
    pub weight: f64,
    #[serde(deserialize_with = "flex::f64_or_string")]
    pub vstall_start: f64,
    #[serde(deserialize_with = "flex::f64_or_string")]
    pub vstall_end: f64,
    #[serde(deserialize_with = "flex::f64_or_string")]
    pub vstall_step: f64,
    #[serde(deserialize_with = "flex::f64_or_string")]
    pub clmax_start: f64,
    #[serde(deserialize_with = "flex::f64_or_string")]
    pub clmax_end: f64,
    #[serde(deserialize_with = "flex::f64_or_string")]
    pub clmax_step: f64,
}

/// Wing geometry inputs (`wingParametersInputs`). Every field is
/// optional; which calculations run depends on which are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WingParametersInputs {
    #[serde(
        default,
        deserialize_with = "flex::opt_f64_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub root_chord: Option<f64>,
    #[serde(
        default,
        deserialize_with = "flex::opt_f64_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub tip_chord: Option<f64>,
    #[serde(
        default,
        deserialize_with = "flex::opt_f64_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub wingspan: Option<f64>,
    #[serde(
        default,
        deserialize_with = "flex::opt_f64_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub surface_area: Option<f64>,
    #[serde(
        default,
        deserialize_with = "flex::opt_f64_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub velocity: Option<f64>,
    #[serde(
        default,
        deserialize_with = "flex::opt_f64_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub cl: Option<f64>,
    #[serde(
        default,
        deserialize_with = "flex::opt_f64_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub cl_max: Option<f64>,
    #[serde(
        default,
        deserialize_with = "flex::opt_f64_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub weight: Option<f64>,
}

/// Stall-speed summary shared between stages (`aerodynamicData`).
///
/// Written by the wing-parameter stage when a stall speed is computed;
/// the landing stage later merges its approach drag into the record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AerodynamicData {
    #[serde(deserialize_with = "flex::f64_or_string")]
    pub v_stall: f64,
    #[serde(deserialize_with = "flex::f64_or_string")]
    pub lift: f64,
    #[serde(
        default,
        deserialize_with = "flex::opt_f64_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub drag: Option<f64>,
    pub timestamp: String,
}

/// Inputs for the thrust-curve sweep (`dynamicThrustInputs`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DynamicThrustInputs {
    #[serde(deserialize_with = "flex::f64_or_string")]
    pub start_vel: f64,
    #[serde(deserialize_with = "flex::f64_or_string")]
    pub end_vel: f64,
    #[serde(deserialize_with = "flex::f64_or_string")]
    pub step_vel: f64,
    #[serde(deserialize_with = "flex::f64_or_string")]
    pub cd0: f64,
    #[serde(deserialize_with = "flex::f64_or_string")]
    pub prop_dia: f64,
    #[serde(deserialize_with = "flex::f64_or_string")]
    pub prop_pitch: f64,
    #[serde(deserialize_with = "flex::f64_or_string")]
    pub rpm: f64,
}

/// One point of the thrust curve. `drag` (thrust required) and
/// `net_thrust` are NaN at the v=0 singularity; they serialize as null.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThrustPoint {
    pub velocity: f64,
    pub thrust: f64,
    #[serde(deserialize_with = "flex::f64_or_null")]
    pub drag: f64,
    #[serde(deserialize_with = "flex::f64_or_null")]
    pub net_thrust: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ThrustRange {
    pub min: f64,
    pub max: f64,
    pub average: f64,
}

/// Persisted thrust-curve results (`dynamicThrustData`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicThrustData {
    pub max_thrust: f64,
    pub min_thrust: f64,
    pub thrust_range: ThrustRange,
    pub thrust_curve: Vec<ThrustPoint>,
    pub rpm: f64,
    pub prop_diameter: f64,
    pub prop_pitch: f64,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaxClimbRate {
    pub velocity: f64,
    pub climb_rate_ms: f64,
    pub climb_rate_fpm: f64,
    pub power_available: f64,
    pub power_required: f64,
}

/// Persisted climb-rate series (`climbRateResults`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClimbRateResults {
    pub velocity_range: Vec<f64>,
    pub climb_rates_ms: Vec<f64>,
    pub climb_rates_fpm: Vec<f64>,
    pub power_available: Vec<f64>,
    pub power_required: Vec<f64>,
    pub max_climb_rate: MaxClimbRate,
    pub timestamp: String,
}

/// Persisted sink-rate series (`sinkRateResults`). Sink rates are
/// positive magnitudes; larger means descending faster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SinkRateResults {
    pub velocity_range: Vec<f64>,
    pub sink_rates_ms: Vec<f64>,
    pub sink_rates_fpm: Vec<f64>,
    pub drag_values: Vec<f64>,
    pub weight: f64,
    pub timestamp: String,
}

/// Persisted landing summary (`landingDistanceData`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LandingDistanceData {
    pub cd: f64,
    pub v_stall: f64,
    pub v_takeoff: f64,
    pub v_touchdown: f64,
    pub lift: f64,
    pub drag: f64,
    pub surface_area: f64,
    pub net_thrust_at_v: f64,
    pub effective_drag: f64,
    pub landing_distance: f64,
    pub timestamp: String,
}

/// Persisted takeoff summary (`takeoffDistanceData`). `weight` here is
/// the weight force in newtons, matching the historical record layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TakeoffDistanceData {
    pub distance: f64,
    pub lift_force: f64,
    pub thrust_at_takeoff: f64,
    pub v_takeoff: f64,
    pub v_stall: f64,
    pub weight: f64,
    pub surface_area: f64,
    pub cl_max: f64,
    pub timestamp: String,
}
