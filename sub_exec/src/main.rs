//! Main simulation executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise the session and logging
//!     - Load the scenario and plant parameters
//!     - Initialise the depth control module
//!     - Build the simulation driver and run it to completion
//!     - Archive the record sequence and write the run summary
//!
//! The control loop itself performs no I/O. All reporting happens after
//! the run completes, from the finished record sequence.

// ---------------------------------------------------------------------------
// USE MODULES FROM LIBRARY
// ---------------------------------------------------------------------------

use sub_lib::{
    ballast,
    depth_ctrl::DepthCtrl,
    dynamics,
    sim::{self, SimDriver},
};

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Report,
};
use log::info;
use serde::Serialize;
use std::env;

// Internal
use util::{
    archive::Archiver,
    logger::{logger_init, LevelFilter},
    module::State,
    params,
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Scenario parameter file used when none is given on the command line.
const DEFAULT_SCENARIO_FILE: &str = "sim.toml";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Summary of a completed run, saved as JSON into the session directory.
#[derive(Serialize)]
struct RunSummary {
    total_steps: u64,
    dt_s: f64,
    final_depth_m: f64,
    final_buoyancy_n: f64,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session =
        Session::new("sub_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Submarine Depth Control Simulation\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    // An optional single argument names the scenario parameter file
    let args: Vec<String> = env::args().collect();

    let scenario_file = match args.len() {
        1 => DEFAULT_SCENARIO_FILE.to_string(),
        2 => args[1].clone(),
        n => {
            return Err(eyre!(
                "Expected either zero or one argument, found {}",
                n - 1
            ))
        }
    };

    info!("Loading scenario from \"{}\"", scenario_file);

    let sim_params: sim::Params = params::load(scenario_file.as_str())
        .wrap_err("Could not load the scenario params")?;

    let ballast_params: ballast::Params =
        params::load("ballast.toml").wrap_err("Could not load ballast params")?;

    let dynamics_params: dynamics::Params =
        params::load("dynamics.toml").wrap_err("Could not load dynamics params")?;

    info!("Plant parameters loaded");

    // ---- INITIALISE MODULES ----

    let mut depth_ctrl = DepthCtrl::default();
    depth_ctrl
        .init("depth_ctrl.toml", &session)
        .wrap_err("Failed to initialise DepthCtrl")?;
    info!("DepthCtrl init complete\n");

    // ---- BUILD AND RUN ----

    let mut driver = SimDriver::new(sim_params, depth_ctrl, ballast_params, dynamics_params)
        .wrap_err("Failed to build the simulation driver")?;

    driver.run().wrap_err("Simulation run failed")?;

    // ---- ARCHIVE RESULTS ----

    let mut archiver = Archiver::from_path(&session, "sim/records.csv")
        .wrap_err("Failed to create the records archive")?;

    for record in driver.records() {
        archiver
            .serialise(record)
            .wrap_err("Failed to archive a record")?;
    }
    archiver
        .flush()
        .wrap_err("Failed to flush the records archive")?;

    info!("Records archived to sim/records.csv");

    // ---- RUN SUMMARY ----

    let last = match driver.records().last() {
        Some(r) => r,
        None => return Err(eyre!("Completed run produced no records")),
    };

    info!(
        "Final depth: {:.3} m (target {:?})",
        last.depth_m, last.target_depth_m
    );
    info!(
        "Final buoyancy: {:.3} N (target {:.3})",
        last.buoyancy_n, last.target_buoyancy_n
    );

    session
        .save(
            "run_summary.json",
            &RunSummary {
                total_steps: driver.total_steps(),
                dt_s: driver.dt_s(),
                final_depth_m: last.depth_m,
                final_buoyancy_n: last.buoyancy_n,
            },
        )
        .wrap_err("Failed to save the run summary")?;

    info!("End of execution");

    Ok(())
}
