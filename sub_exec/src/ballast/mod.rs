//! Ballast actuator model
//!
//! Models the ballast pump as a command deadzone (stiction) followed by a
//! first order lag (motor inertia), whose output flow rate is integrated
//! into the vehicle's net buoyancy. The lag has a steady state gain of
//! one: a sustained command is eventually tracked exactly, but never
//! instantaneously, which is what produces the characteristic overshoot
//! of a real pump. The model performs no clamping of buoyancy, lingering
//! flow can carry it past any bound.

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

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during ballast model operation.
#[derive(Debug, thiserror::Error)]
pub enum BallastError {
    #[error("Ballast parameter {name} is invalid: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}
