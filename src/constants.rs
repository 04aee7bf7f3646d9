//! Physical constants shared across the performance calculators.

/// Air density at sea level, 15°C (kg/m³)
pub const AIR_DENSITY: f64 = 1.225;

/// Gravitational acceleration (m/s²)
pub const GRAVITY_MPS2: f64 = 9.81;

/// Conversion factor: square inches to square meters
pub const IN2_TO_M2: f64 = 0.00064516;

/// Conversion factor: inches to meters
pub const INCHES_TO_METERS: f64 = 0.0254;

/// Conversion factor: meters per second to feet per minute
pub const MS_TO_FPM: f64 = 196.85;

/// Conversion factor: meters to feet
pub const METERS_TO_FEET: f64 = 3.28084;

/// Oswald span efficiency factor for the induced-drag model.
///
/// Empirical correction for non-elliptical lift distribution. Fixed at
/// 0.8, representative of straight-tapered hobby-scale wings.
pub const OSWALD_EFFICIENCY: f64 = 0.8;

/// Tolerance added before flooring a sweep point count so that an end
/// value reachable only through accumulated floating-point error is
/// still generated.
pub const SWEEP_EPSILON: f64 = 1e-10;

/// Convert a mass in kilograms to a weight force in newtons.
///
/// Every storage document carries mass in kilograms; the physics
/// formulas want a force. Funnelling the conversion through one helper
/// keeps the kg/N boundary visible at each point of use.
#[inline]
pub fn newtons(weight_kg: f64) -> f64 {
    weight_kg * GRAVITY_MPS2
}
