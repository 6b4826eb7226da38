//! Dynamics model parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the rigid body depth axis model.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Params {
    /// Vehicle mass in kilograms.
    pub mass_kg: f64,

    /// Linear drag coefficient, in newtons per metre per second.
    pub drag_coeff: f64,
}
