//! Implementations for the ballast model state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
use super::{BallastError, Params};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Ballast actuator model state.
#[derive(Debug, Clone)]
pub struct BallastModel {
    params: Params,

    /// Current net upward force produced by the ballast, in newtons
    buoyancy_n: f64,

    /// Current rate of change of buoyancy, in newtons per second
    flow_rate_n_s: f64,

    /// The last pump command after deadzone filtering
    effective_command: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl BallastModel {
    /// Create a new model from the parameters and an initial buoyancy.
    pub fn new(params: Params, initial_buoyancy_n: f64) -> Result<Self, BallastError> {
        if !params.deadzone_threshold.is_finite() || params.deadzone_threshold < 0.0 {
            return Err(BallastError::InvalidParameter {
                name: "deadzone_threshold",
                value: params.deadzone_threshold,
            });
        }
        if !params.inertia_coeff.is_finite()
            || params.inertia_coeff <= 0.0
            || params.inertia_coeff > 1.0
        {
            return Err(BallastError::InvalidParameter {
                name: "inertia_coeff",
                value: params.inertia_coeff,
            });
        }
        if !params.max_pump_power.is_finite() || params.max_pump_power <= 0.0 {
            return Err(BallastError::InvalidParameter {
                name: "max_pump_power",
                value: params.max_pump_power,
            });
        }
        if !initial_buoyancy_n.is_finite() {
            return Err(BallastError::InvalidParameter {
                name: "initial_buoyancy_n",
                value: initial_buoyancy_n,
            });
        }

        Ok(Self {
            params,
            buoyancy_n: initial_buoyancy_n,
            flow_rate_n_s: 0.0,
            effective_command: 0.0,
        })
    }

    /// Advance the actuator one step under the given pump command.
    ///
    /// Commands within the deadzone produce no motion. The physical flow
    /// rate lags the filtered command through the inertia filter and is
    /// then integrated into buoyancy over `dt_s`. Returns the updated
    /// buoyancy.
    pub fn update(&mut self, pump_command: f64, dt_s: f64) -> Result<f64, BallastError> {
        if !pump_command.is_finite() {
            return Err(BallastError::InvalidParameter {
                name: "pump_command",
                value: pump_command,
            });
        }
        if !dt_s.is_finite() || dt_s <= 0.0 {
            return Err(BallastError::InvalidParameter {
                name: "dt_s",
                value: dt_s,
            });
        }

        // Stiction: commands within the deadzone do not move the pump
        self.effective_command = if pump_command.abs() > self.params.deadzone_threshold {
            pump_command
        }
        else {
            0.0
        };

        // Motor inertia: the physical flow rate lags behind the command.
        // Convex combination, so the flow rate is bounded by the filtered
        // command history
        self.flow_rate_n_s = self.effective_command * self.params.inertia_coeff
            + self.flow_rate_n_s * (1.0 - self.params.inertia_coeff);

        self.buoyancy_n += self.flow_rate_n_s * dt_s;

        Ok(self.buoyancy_n)
    }

    /// Current net buoyancy in newtons.
    pub fn buoyancy_n(&self) -> f64 {
        self.buoyancy_n
    }

    /// Current flow rate in newtons per second.
    pub fn flow_rate_n_s(&self) -> f64 {
        self.flow_rate_n_s
    }

    /// The last pump command after deadzone filtering.
    pub fn effective_command(&self) -> f64 {
        self.effective_command
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn test_params() -> Params {
        Params {
            deadzone_threshold: 1.2,
            inertia_coeff: 0.15,
            max_pump_power: 10.0,
        }
    }

    #[test]
    fn test_rejects_invalid_params() {
        let mut params = test_params();
        params.inertia_coeff = 0.0;
        assert!(BallastModel::new(params, 147.15).is_err());

        let mut params = test_params();
        params.inertia_coeff = 1.5;
        assert!(BallastModel::new(params, 147.15).is_err());

        let mut params = test_params();
        params.deadzone_threshold = -1.0;
        assert!(BallastModel::new(params, 147.15).is_err());

        assert!(BallastModel::new(test_params(), std::f64::NAN).is_err());
        assert!(BallastModel::new(test_params(), 147.15).is_ok());
    }

    #[test]
    fn test_rejects_non_finite_command() {
        let mut ballast = BallastModel::new(test_params(), 147.15).unwrap();
        assert!(ballast.update(std::f64::NAN, 0.05).is_err());
        assert!(ballast.update(std::f64::INFINITY, 0.05).is_err());
    }

    #[test]
    fn test_deadzone_exactness() -> Result<(), BallastError> {
        let mut ballast = BallastModel::new(test_params(), 147.15)?;

        // Commands at or below the threshold are filtered to exactly zero
        ballast.update(1.2, 0.05)?;
        assert_eq!(ballast.effective_command(), 0.0);
        assert_eq!(ballast.flow_rate_n_s(), 0.0);

        ballast.update(-0.9, 0.05)?;
        assert_eq!(ballast.effective_command(), 0.0);

        // Just above the threshold the command passes unchanged
        ballast.update(1.21, 0.05)?;
        assert_eq!(ballast.effective_command(), 1.21);

        Ok(())
    }

    #[test]
    fn test_flow_converges_to_sustained_command() -> Result<(), BallastError> {
        let mut ballast = BallastModel::new(test_params(), 147.15)?;

        // The lag filter's steady state gain is one, so a sustained command
        // outside the deadzone is eventually tracked exactly
        for _ in 0..600 {
            ballast.update(5.0, 0.05)?;
        }

        assert!((ballast.flow_rate_n_s() - 5.0).abs() < 1e-6);

        Ok(())
    }

    #[test]
    fn test_buoyancy_integrates_flow() -> Result<(), BallastError> {
        let mut ballast = BallastModel::new(test_params(), 100.0)?;

        let buoyancy = ballast.update(10.0, 0.05)?;

        // One step from rest: flow is command * inertia, buoyancy gains
        // flow * dt
        assert!((ballast.flow_rate_n_s() - 1.5).abs() < 1e-12);
        assert!((buoyancy - 100.075).abs() < 1e-12);

        Ok(())
    }
}
