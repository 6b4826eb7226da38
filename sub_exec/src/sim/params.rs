//! Simulation scenario parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// Internal
use crate::setpoint::SetpointProfile;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Which loops of the cascade a run exercises.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioMode {
    /// The profile targets depth and the full cascade runs.
    DepthCascade,

    /// The profile targets buoyancy directly and only the inner loop
    /// runs. The plant models still integrate, so depth remains
    /// observable in the records.
    BuoyancyHold,
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for a simulation run.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {
    /// Fixed timestep in seconds.
    pub dt_s: f64,

    /// Number of steps to execute.
    ///
    /// Exactly one of this and `duration_s` must be given.
    pub total_steps: Option<u64>,

    /// Simulated duration in seconds, rounded to a whole number of steps.
    ///
    /// Exactly one of this and `total_steps` must be given.
    pub duration_s: Option<f64>,

    /// Initial depth in metres. Defaults to 0, the surface.
    pub initial_depth_m: Option<f64>,

    /// Initial net buoyancy in newtons. Defaults to the vehicle's weight,
    /// i.e. neutral buoyancy.
    pub initial_buoyancy_n: Option<f64>,

    /// Which loops this run exercises.
    pub mode: ScenarioMode,

    /// The target schedule: depth for `depth_cascade` runs, buoyancy for
    /// `buoyancy_hold` runs.
    pub profile: SetpointProfile,
}
