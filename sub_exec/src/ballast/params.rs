//! Ballast model parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the ballast actuator model.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Params {
    /// Command magnitude below which the pump does not move (stiction).
    pub deadzone_threshold: f64,

    /// Fraction of the commanded flow reached in one step, in (0, 1].
    ///
    /// This is the gain of the first order lag applied to the
    /// deadzone-filtered command. A value of 1 gives instantaneous
    /// response.
    pub inertia_coeff: f64,

    /// Maximum pump power.
    ///
    /// Informational bound matching the commanding controller's output
    /// limit. The model itself does not clamp to this value, the
    /// commanding controller is expected to.
    pub max_pump_power: f64,
}
