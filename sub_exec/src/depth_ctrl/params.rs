//! Depth control parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// Internal
use crate::pid::PidParams;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the depth control cascade.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Params {
    /// Buoyancy at which the vehicle neither rises nor sinks, in newtons.
    ///
    /// This is the vehicle's weight. The outer loop's output is an offset
    /// from this value.
    pub neutral_buoyancy_n: f64,

    /// Outer (depth) loop gains. The output is a buoyancy offset in
    /// newtons.
    pub depth_pid: PidParams,

    /// Inner (buoyancy) loop gains. The output is a pump command.
    pub buoyancy_pid: PidParams,
}
