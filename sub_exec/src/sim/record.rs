//! Per-tick simulation records

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// One record per simulation tick.
///
/// The record sequence is the sole externally consumable artefact of a
/// run. Any plotting or reporting tool works from these records without
/// access to the internal controller or model state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimRecord {
    /// Simulated time at the start of the tick, in seconds.
    pub time_s: f64,

    /// Depth after this tick's dynamics update, in metres.
    pub depth_m: f64,

    /// Depth target this tick, `None` for buoyancy-hold runs.
    pub target_depth_m: Option<f64>,

    /// Net buoyancy after this tick's ballast update, in newtons.
    pub buoyancy_n: f64,

    /// Buoyancy target handed to the inner loop, in newtons.
    pub target_buoyancy_n: f64,

    /// Pump command produced by the inner loop.
    pub pump_command: f64,

    /// Ballast flow rate after the inertia filter, in newtons per second.
    pub flow_rate_n_s: f64,

    /// Pump command after deadzone filtering.
    pub pump_effective_command: f64,
}
