//! # Aeroperf
//!
//! Aircraft performance calculation engine. A pipeline of calculator
//! stages shares one typed document store: upstream stages persist
//! their inputs and results, downstream stages read them back.

// Re-export the main types and functions
pub use documents::{
    AerodynamicData, ClimbRateResults, DynamicThrustData, DynamicThrustInputs,
    LandingDistanceData, MaxClimbRate, SinkRateResults, TakeoffDistanceData, ThrustPoint,
    ThrustRange, WingAreaInputs, WingParametersInputs,
};
pub use error::{PerfError, Result};
pub use export::ExportBundle;
pub use store::{FileBackend, MemoryBackend, StorageBackend, Store};
pub use vn_diagram::VnPoint;
pub use wheel_track::WheelTrackPoint;
pub use wing_area::{WingAreaCell, WingAreaMatrix};
pub use wing_params::WingParametersResults;

// Module declarations
pub mod climb_rate;
pub mod constants;
pub mod documents;
pub mod dynamic_thrust;
mod error;
pub mod export;
pub mod landing_distance;
pub mod sink_rate;
pub mod store;
pub mod sweep;
pub mod takeoff_distance;
pub mod vn_diagram;
pub mod wheel_track;
pub mod wing_area;
pub mod wing_params;
