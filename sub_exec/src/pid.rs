//! # Discrete PID controller
//!
//! This module provides the PID controller used by both loops of the depth
//! control cascade. The controller is discrete time: the caller supplies
//! the timestep explicitly and the derivative term is a plain backward
//! difference over that timestep. The derivative is deliberately
//! unfiltered, so it responds sharply to measurement noise and to setpoint
//! steps.
//!
//! Saturation is handled by two symmetric clamps. The integral
//! accumulation is clamped to the anti-windup limit as it is updated, and
//! the output is clamped to the output limit. Hitting either clamp is
//! normal behaviour, not an error, but the last output clamp state is
//! recorded so callers can report it.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// Internal
use util::maths::clamp;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Gains and limits for a single PID controller.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PidParams {
    /// Proportional gain
    pub k_p: f64,

    /// Integral gain
    pub k_i: f64,

    /// Derivative gain
    pub k_d: f64,

    /// Symmetric clamp applied to the controller output
    pub output_limit: f64,

    /// Symmetric clamp applied to the accumulated integral (anti-windup)
    pub integral_limit: f64,
}

/// A discrete PID controller with anti-windup and output clamping.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PidController {
    params: PidParams,

    /// The integral accumulation
    integral: f64,

    /// Previous error
    prev_error: f64,

    /// True if the last raw output exceeded the output limit
    saturated: bool,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during PID operation.
#[derive(Debug, thiserror::Error)]
pub enum PidError {
    #[error("PID parameter {name} is invalid: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PidController {
    /// Create a new controller with the given gains and limits.
    ///
    /// All gains must be finite, and both limits must be positive and
    /// finite. Both clamps are symmetric about zero.
    pub fn new(params: PidParams) -> Result<Self, PidError> {
        check_finite("k_p", params.k_p)?;
        check_finite("k_i", params.k_i)?;
        check_finite("k_d", params.k_d)?;
        check_positive("output_limit", params.output_limit)?;
        check_positive("integral_limit", params.integral_limit)?;

        Ok(Self {
            params,
            integral: 0.0,
            prev_error: 0.0,
            saturated: false,
        })
    }

    /// Get the value of the controller for the given target and
    /// measurement.
    ///
    /// The integral is accumulated over `dt_s` and clamped to the
    /// anti-windup limit before use, and the returned output is clamped to
    /// the output limit.
    pub fn compute(
        &mut self, target: f64, current: f64, dt_s: f64
    ) -> Result<f64, PidError> {
        if !dt_s.is_finite() || dt_s <= 0.0 {
            return Err(PidError::InvalidParameter {
                name: "dt_s",
                value: dt_s,
            });
        }

        let error = target - current;

        // Accumulate the integral term, clamped so that prolonged
        // saturation cannot grow it without bound
        self.integral = clamp(
            &(self.integral + error * dt_s),
            &-self.params.integral_limit,
            &self.params.integral_limit,
        );

        // Backward difference derivative over the supplied timestep
        let derivative = (error - self.prev_error) / dt_s;

        let raw = self.params.k_p * error
            + self.params.k_i * self.integral
            + self.params.k_d * derivative;

        self.saturated = raw.abs() > self.params.output_limit;

        // Remember the previous error
        self.prev_error = error;

        Ok(clamp(
            &raw,
            &-self.params.output_limit,
            &self.params.output_limit,
        ))
    }

    /// The accumulated integral term.
    pub fn integral(&self) -> f64 {
        self.integral
    }

    /// True if the last computed output hit the output limit.
    pub fn is_saturated(&self) -> bool {
        self.saturated
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn check_finite(name: &'static str, value: f64) -> Result<(), PidError> {
    if value.is_finite() {
        Ok(())
    }
    else {
        Err(PidError::InvalidParameter { name, value })
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), PidError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    }
    else {
        Err(PidError::InvalidParameter { name, value })
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn test_params() -> PidParams {
        PidParams {
            k_p: 1.25,
            k_i: 0.1,
            k_d: 0.0125,
            output_limit: 10.0,
            integral_limit: 5.0,
        }
    }

    #[test]
    fn test_rejects_invalid_params() {
        let mut params = test_params();
        params.k_p = std::f64::NAN;
        assert!(PidController::new(params).is_err());

        let mut params = test_params();
        params.k_d = std::f64::INFINITY;
        assert!(PidController::new(params).is_err());

        let mut params = test_params();
        params.output_limit = 0.0;
        assert!(PidController::new(params).is_err());

        let mut params = test_params();
        params.integral_limit = -5.0;
        assert!(PidController::new(params).is_err());

        assert!(PidController::new(test_params()).is_ok());
    }

    #[test]
    fn test_rejects_invalid_timestep() {
        let mut pid = PidController::new(test_params()).unwrap();

        assert!(pid.compute(1.0, 0.0, 0.0).is_err());
        assert!(pid.compute(1.0, 0.0, -0.05).is_err());
        assert!(pid.compute(1.0, 0.0, std::f64::NAN).is_err());
    }

    #[test]
    fn test_zero_error_gives_zero_output() -> Result<(), PidError> {
        let mut pid = PidController::new(test_params())?;

        // With zero initial integral and previous error, a zero error must
        // produce exactly zero on the first tick
        assert_eq!(pid.compute(5.0, 5.0, 0.05)?, 0.0);

        Ok(())
    }

    #[test]
    fn test_proportional_action() -> Result<(), PidError> {
        let mut pid = PidController::new(PidParams {
            k_p: 2.0,
            k_i: 0.0,
            k_d: 0.0,
            output_limit: 100.0,
            integral_limit: 5.0,
        })?;

        assert_eq!(pid.compute(3.0, 1.0, 0.1)?, 4.0);

        Ok(())
    }

    #[test]
    fn test_output_and_integral_bounds() -> Result<(), PidError> {
        let mut pid = PidController::new(test_params())?;

        // A large persistent error saturates the output, but neither the
        // output nor the integral may ever leave their bounds
        for _ in 0..1000 {
            let output = pid.compute(1000.0, 0.0, 0.05)?;
            assert!(output.abs() <= 10.0);
            assert!(pid.integral().abs() <= 5.0);
        }

        assert!(pid.is_saturated());

        Ok(())
    }
}
