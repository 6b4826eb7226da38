//! Implementations for the dynamics model state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
use super::{DynamicsError, Params, GRAV_ACCEL_MS2};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Rigid body state of the vehicle's depth axis.
#[derive(Debug, Clone)]
pub struct SubDynamics {
    params: Params,

    /// Vehicle weight in newtons, derived from the mass
    weight_n: f64,

    /// Descent velocity in metres per second (positive is descending)
    velocity_ms: f64,

    /// Depth in metres (positive is below the surface)
    depth_m: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SubDynamics {
    /// Create a new model from the parameters and an initial depth.
    pub fn new(params: Params, initial_depth_m: f64) -> Result<Self, DynamicsError> {
        if !params.mass_kg.is_finite() || params.mass_kg <= 0.0 {
            return Err(DynamicsError::InvalidParameter {
                name: "mass_kg",
                value: params.mass_kg,
            });
        }
        if !params.drag_coeff.is_finite() || params.drag_coeff <= 0.0 {
            return Err(DynamicsError::InvalidParameter {
                name: "drag_coeff",
                value: params.drag_coeff,
            });
        }
        if !initial_depth_m.is_finite() {
            return Err(DynamicsError::InvalidParameter {
                name: "initial_depth_m",
                value: initial_depth_m,
            });
        }

        Ok(Self {
            weight_n: params.mass_kg * GRAV_ACCEL_MS2,
            params,
            velocity_ms: 0.0,
            depth_m: initial_depth_m,
        })
    }

    /// Advance the rigid body one step under the given buoyancy.
    ///
    /// A positive net force accelerates descent: weight pulls the vehicle
    /// down while buoyancy and drag oppose the motion. Returns the updated
    /// depth.
    pub fn update(&mut self, buoyancy_n: f64, dt_s: f64) -> f64 {
        let drag_force_n = self.params.drag_coeff * self.velocity_ms;
        let net_force_n = self.weight_n - buoyancy_n - drag_force_n;

        let accel_ms2 = net_force_n / self.params.mass_kg;
        self.velocity_ms += accel_ms2 * dt_s;
        self.depth_m += self.velocity_ms * dt_s;

        self.depth_m
    }

    /// Vehicle weight in newtons.
    pub fn weight_n(&self) -> f64 {
        self.weight_n
    }

    /// Current descent velocity in metres per second.
    pub fn velocity_ms(&self) -> f64 {
        self.velocity_ms
    }

    /// Current depth in metres.
    pub fn depth_m(&self) -> f64 {
        self.depth_m
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
            mass_kg: 15.0,
            drag_coeff: 0.5,
        }
    }

    #[test]
    fn test_rejects_invalid_params() {
        let mut params = test_params();
        params.mass_kg = 0.0;
        assert!(SubDynamics::new(params, 0.0).is_err());

        let mut params = test_params();
        params.drag_coeff = -0.5;
        assert!(SubDynamics::new(params, 0.0).is_err());

        assert!(SubDynamics::new(test_params(), std::f64::NAN).is_err());
        assert!(SubDynamics::new(test_params(), 0.0).is_ok());
    }

    #[test]
    fn test_weight_derived_from_mass() {
        let dynamics = SubDynamics::new(test_params(), 0.0).unwrap();
        assert!((dynamics.weight_n() - 147.15).abs() < 1e-9);
    }

    #[test]
    fn test_equilibrium_at_neutral_buoyancy() {
        let mut dynamics = SubDynamics::new(test_params(), 4.0).unwrap();
        let weight = dynamics.weight_n();

        // Neutral buoyancy and zero velocity is a stable equilibrium: the
        // depth must not move at all
        for _ in 0..1000 {
            assert_eq!(dynamics.update(weight, 0.05), 4.0);
            assert_eq!(dynamics.velocity_ms(), 0.0);
        }
    }

    #[test]
    fn test_negative_buoyancy_offset_descends() {
        let mut dynamics = SubDynamics::new(test_params(), 0.0).unwrap();
        let weight = dynamics.weight_n();

        // Buoyancy below weight must produce descent (increasing depth)
        for _ in 0..100 {
            dynamics.update(weight - 5.0, 0.05);
        }

        assert!(dynamics.depth_m() > 0.0);
        assert!(dynamics.velocity_ms() > 0.0);
    }

    #[test]
    fn test_drag_opposes_motion() {
        let mut with_drag = SubDynamics::new(test_params(), 0.0).unwrap();
        let mut low_drag = SubDynamics::new(
            Params {
                drag_coeff: 0.01,
                ..test_params()
            },
            0.0,
        )
        .unwrap();
        let weight = with_drag.weight_n();

        for _ in 0..200 {
            with_drag.update(weight - 10.0, 0.05);
            low_drag.update(weight - 10.0, 0.05);
        }

        // The same net driving force produces less speed under more drag
        assert!(with_drag.velocity_ms() < low_drag.velocity_ms());
    }
}
