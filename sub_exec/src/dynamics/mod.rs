//! Submarine dynamics model
//!
//! Rigid body model of the vehicle's depth axis. Weight, buoyancy and
//! linear drag produce a net force which drives velocity and depth through
//! explicit Euler integration. The sign convention is fixed for the whole
//! system: increasing depth means descending, so weight pulls positive and
//! buoyancy and drag oppose it.
//!
//! The model is deliberately unconstrained. Pathological controller gains
//! produce runaway depth and velocity, which is how instability is meant
//! to show up in the output record.

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
// CONSTANTS
// ---------------------------------------------------------------------------

/// Standard gravitational acceleration, in metres per second squared.
pub const GRAV_ACCEL_MS2: f64 = 9.81;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during dynamics model operation.
#[derive(Debug, thiserror::Error)]
pub enum DynamicsError {
    #[error("Dynamics parameter {name} is invalid: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}
