//! # Depth control module
//!
//! Depth control is a cascade of two PID loops. The outer loop converts
//! depth error into a desired buoyancy offset from neutral, which sets the
//! buoyancy target for the inner loop. The inner loop converts buoyancy
//! error into a pump command for the ballast system.
//!
//! Each call to the module's `proc` reads only the measurements supplied
//! by the caller, never values computed later in the same tick. That is
//! what makes the cascade causal: in the simulation the measurements are
//! the previous tick's plant state, on a vehicle they are the latest
//! sensed depth and buoyancy. The module owns no plant models, those
//! belong to the simulation (or to the real vehicle).

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use params::*;
pub use state::*;

use crate::pid::PidError;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during DepthCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum DepthCtrlError {
    #[error("Could not load parameters: {0}")]
    ParamLoadError(#[from] util::params::LoadError),

    #[error("Invalid controller parameters: {0}")]
    InvalidPidParams(#[from] PidError),

    #[error("Neutral buoyancy must be positive and finite, got {0}")]
    InvalidNeutralBuoyancy(f64),
}
