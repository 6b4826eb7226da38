//! Implementations for the DepthCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use serde::Serialize;

// Internal
use super::{DepthCtrlError, Params};
use crate::pid::PidController;
use util::{module::State, params, session::Session};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Depth control module state.
#[derive(Debug, Default)]
pub struct DepthCtrl {
    pub(crate) params: Params,

    /// Outer loop controller, depth error to buoyancy offset demand
    depth_pid: PidController,

    /// Inner loop controller, buoyancy error to pump command
    buoyancy_pid: PidController,
}

/// Input data to depth control.
///
/// On a vehicle these are the latest sensed values, in the simulation they
/// are the previous tick's plant state.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputData {
    /// Demanded depth in metres (increasing downwards).
    pub target_depth_m: f64,

    /// Measured depth in metres.
    pub depth_m: f64,

    /// Measured net buoyancy in newtons.
    pub buoyancy_n: f64,

    /// Timestep since the previous call, in seconds.
    pub dt_s: f64,
}

/// Output command from DepthCtrl that the ballast system must execute.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OutputData {
    /// Pump command for the ballast system.
    pub pump_command: f64,

    /// Buoyancy target handed to the inner loop, in newtons.
    pub target_buoyancy_n: f64,

    /// Outer loop output, the demanded offset from neutral buoyancy, in
    /// newtons.
    pub buoyancy_offset_n: f64,
}

/// Status report for DepthCtrl processing.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StatusReport {
    /// True if the outer loop output hit its limit this tick.
    pub depth_loop_saturated: bool,

    /// True if the inner loop output hit its limit this tick.
    pub buoyancy_loop_saturated: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for DepthCtrl {
    type InitData = &'static str;
    type InitError = DepthCtrlError;

    type InputData = InputData;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = DepthCtrlError;

    /// Initialise the DepthCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(
        &mut self, init_data: Self::InitData, _session: &Session
    ) -> Result<(), Self::InitError> {
        // Load the parameters
        let params: Params = params::load(init_data)?;

        *self = Self::with_params(params)?;

        Ok(())
    }

    /// Perform one cycle of the cascade.
    ///
    /// This is the boundary operation for a live controller: the caller
    /// supplies the sensed depth and buoyancy and executes the returned
    /// pump command.
    fn proc(
        &mut self, input_data: &Self::InputData
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        // Outer loop: depth error to a desired buoyancy offset from
        // neutral
        let buoyancy_offset_n = self.depth_pid.compute(
            input_data.target_depth_m,
            input_data.depth_m,
            input_data.dt_s,
        )?;

        // A positive offset demands descent, so it lowers the buoyancy
        // target below neutral
        let target_buoyancy_n = self.params.neutral_buoyancy_n - buoyancy_offset_n;

        // Inner loop: buoyancy error to pump command
        let pump_command = self.buoyancy_pid.compute(
            target_buoyancy_n,
            input_data.buoyancy_n,
            input_data.dt_s,
        )?;

        let report = StatusReport {
            depth_loop_saturated: self.depth_pid.is_saturated(),
            buoyancy_loop_saturated: self.buoyancy_pid.is_saturated(),
        };

        trace!(
            "DepthCtrl output:\n    offset: {:.4} N\n    target buoyancy: {:.4} N\n    pump: {:.4}",
            buoyancy_offset_n,
            target_buoyancy_n,
            pump_command
        );

        Ok((
            OutputData {
                pump_command,
                target_buoyancy_n,
                buoyancy_offset_n,
            },
            report,
        ))
    }
}

impl DepthCtrl {
    /// Create a module directly from parameters, validating them.
    ///
    /// Used by the simulation driver and the tests, which build their
    /// parameters in memory rather than from a file.
    pub fn with_params(params: Params) -> Result<Self, DepthCtrlError> {
        if !params.neutral_buoyancy_n.is_finite() || params.neutral_buoyancy_n <= 0.0 {
            return Err(DepthCtrlError::InvalidNeutralBuoyancy(
                params.neutral_buoyancy_n,
            ));
        }

        Ok(Self {
            depth_pid: PidController::new(params.depth_pid)?,
            buoyancy_pid: PidController::new(params.buoyancy_pid)?,
            params,
        })
    }

    /// Run only the inner loop, holding an externally supplied buoyancy
    /// target.
    ///
    /// Used for runs which regulate buoyancy directly rather than through
    /// the depth loop. The outer controller is left untouched.
    pub fn proc_buoyancy_hold(
        &mut self, target_buoyancy_n: f64, buoyancy_n: f64, dt_s: f64
    ) -> Result<(OutputData, StatusReport), DepthCtrlError> {
        let pump_command = self
            .buoyancy_pid
            .compute(target_buoyancy_n, buoyancy_n, dt_s)?;

        let report = StatusReport {
            depth_loop_saturated: false,
            buoyancy_loop_saturated: self.buoyancy_pid.is_saturated(),
        };

        Ok((
            OutputData {
                pump_command,
                target_buoyancy_n,
                buoyancy_offset_n: 0.0,
            },
            report,
        ))
    }

    /// The configured neutral buoyancy in newtons.
    pub fn neutral_buoyancy_n(&self) -> f64 {
        self.params.neutral_buoyancy_n
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
