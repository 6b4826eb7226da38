//! # Simulation module
//!
//! Composes the depth control cascade with the ballast and rigid body
//! models and steps them on a fixed timestep, producing one record per
//! tick. A driver runs exactly once: build it, run it, consume the
//! records. The loop itself performs no I/O, archiving happens afterwards
//! from the finished record sequence.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod record;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info};

// Internal
pub use params::*;
pub use record::*;

use crate::{
    ballast::{self, BallastModel},
    depth_ctrl::{self, DepthCtrl, InputData},
    dynamics::{self, SubDynamics},
    setpoint::ProfileError,
};
use util::module::State;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Execution state of the driver.
///
/// A driver moves from `Idle` through `Running` to `Completed` exactly
/// once. `Completed` is terminal, a fresh instance is required for a new
/// run.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SimMode {
    Idle,
    Running,
    Completed,
}

/// Possible errors raised while building or running a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("Timestep must be positive and finite, got {0}")]
    InvalidTimestep(f64),

    #[error("Duration must be positive and finite, got {0}")]
    InvalidDuration(f64),

    #[error("Exactly one of total_steps and duration_s must be given")]
    AmbiguousStepCount,

    #[error("The run must contain at least one step")]
    EmptyRun,

    #[error("Invalid setpoint profile: {0}")]
    InvalidProfile(#[from] ProfileError),

    #[error("Depth control error: {0}")]
    DepthCtrl(#[from] depth_ctrl::DepthCtrlError),

    #[error("Ballast model error: {0}")]
    Ballast(#[from] ballast::BallastError),

    #[error("Dynamics model error: {0}")]
    Dynamics(#[from] dynamics::DynamicsError),

    #[error("Attempted to run a driver which has already completed")]
    AlreadyCompleted,
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Fixed timestep simulation driver.
///
/// Owns one instance of the cascade controller and of each plant model
/// for the lifetime of the run, plus the record sequence.
pub struct SimDriver {
    params: Params,

    /// Execution state
    mode: SimMode,

    /// Number of steps this run executes
    total_steps: u64,

    /// The cascade controller
    depth_ctrl: DepthCtrl,

    /// The ballast actuator plant
    ballast: BallastModel,

    /// The rigid body plant
    dynamics: SubDynamics,

    /// One record per executed tick, in time order
    records: Vec<SimRecord>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SimDriver {
    /// Build a new driver from the scenario parameters, an initialised
    /// cascade controller and the plant model parameters.
    ///
    /// All validation happens here: timestep, step count, profile and
    /// plant parameters. A driver which builds successfully will not fail
    /// during the run itself.
    pub fn new(
        params: Params,
        depth_ctrl: DepthCtrl,
        ballast_params: ballast::Params,
        dynamics_params: dynamics::Params,
    ) -> Result<Self, SimError> {
        if !params.dt_s.is_finite() || params.dt_s <= 0.0 {
            return Err(SimError::InvalidTimestep(params.dt_s));
        }

        let total_steps = match (params.total_steps, params.duration_s) {
            (Some(n), None) => n,
            (None, Some(d)) => {
                if !d.is_finite() || d <= 0.0 {
                    return Err(SimError::InvalidDuration(d));
                }
                // Round so that durations which are whole multiples of dt
                // in decimal do not lose their final step to representation
                // error
                (d / params.dt_s).round() as u64
            }
            _ => return Err(SimError::AmbiguousStepCount),
        };

        if total_steps == 0 {
            return Err(SimError::EmptyRun);
        }

        params.profile.validate()?;

        let dynamics = SubDynamics::new(
            dynamics_params,
            params.initial_depth_m.unwrap_or(0.0),
        )?;

        // Default to neutral buoyancy, the vehicle's weight
        let initial_buoyancy_n = params
            .initial_buoyancy_n
            .unwrap_or_else(|| dynamics.weight_n());
        let ballast = BallastModel::new(ballast_params, initial_buoyancy_n)?;

        Ok(Self {
            params,
            mode: SimMode::Idle,
            total_steps,
            depth_ctrl,
            ballast,
            dynamics,
            records: Vec::new(),
        })
    }

    /// Run the simulation to completion.
    ///
    /// A driver runs exactly once. Calling `run` again after completion is
    /// an error, build a fresh driver for a new run.
    pub fn run(&mut self) -> Result<(), SimError> {
        match self.mode {
            SimMode::Idle => (),
            _ => return Err(SimError::AlreadyCompleted),
        }

        self.mode = SimMode::Running;
        self.records.reserve(self.total_steps as usize);

        info!(
            "Simulation start: {} steps at dt = {} s ({:.2} s simulated)",
            self.total_steps,
            self.params.dt_s,
            self.total_steps as f64 * self.params.dt_s
        );

        for step in 0..self.total_steps {
            self.step_once(step)?;
        }

        self.mode = SimMode::Completed;

        debug!("Simulation complete, {} records", self.records.len());

        Ok(())
    }

    /// Execute one tick.
    ///
    /// The tick order is load-bearing: the controller reads the plant
    /// state of the previous tick, and the plant models are only advanced
    /// afterwards. Reordering this breaks the causal structure of the
    /// cascade.
    fn step_once(&mut self, step: u64) -> Result<(), SimError> {
        let dt_s = self.params.dt_s;
        let time_s = step as f64 * dt_s;

        // (1) evaluate the setpoint at the current time
        let target = self.params.profile.target(time_s);

        // (2)-(4) run the cascade against the previous tick's plant state
        let (output, target_depth_m) = match self.params.mode {
            ScenarioMode::DepthCascade => {
                let input = InputData {
                    target_depth_m: target,
                    depth_m: self.dynamics.depth_m(),
                    buoyancy_n: self.ballast.buoyancy_n(),
                    dt_s,
                };
                let (output, _report) = self.depth_ctrl.proc(&input)?;
                (output, Some(target))
            }
            ScenarioMode::BuoyancyHold => {
                let (output, _report) = self.depth_ctrl.proc_buoyancy_hold(
                    target,
                    self.ballast.buoyancy_n(),
                    dt_s,
                )?;
                (output, None)
            }
        };

        // (5)-(6) advance the plant
        let buoyancy_n = self.ballast.update(output.pump_command, dt_s)?;
        let depth_m = self.dynamics.update(buoyancy_n, dt_s);

        // (7) record the tick
        self.records.push(SimRecord {
            time_s,
            depth_m,
            target_depth_m,
            buoyancy_n,
            target_buoyancy_n: output.target_buoyancy_n,
            pump_command: output.pump_command,
            flow_rate_n_s: self.ballast.flow_rate_n_s(),
            pump_effective_command: self.ballast.effective_command(),
        });

        Ok(())
    }

    /// The records produced so far, one per executed tick.
    pub fn records(&self) -> &[SimRecord] {
        &self.records
    }

    /// Execution state of the driver.
    pub fn mode(&self) -> SimMode {
        self.mode
    }

    /// The number of steps this run executes.
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// The fixed timestep in seconds.
    pub fn dt_s(&self) -> f64 {
        self.params.dt_s
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
