//! # Simulation driver benchmark

use criterion::{criterion_group, criterion_main, Criterion};

use sub_lib::{
    ballast,
    depth_ctrl::{self, DepthCtrl},
    dynamics,
    pid::PidParams,
    setpoint::SetpointProfile,
    sim::{Params, ScenarioMode, SimDriver},
};

fn sim_benchmark(c: &mut Criterion) {
    // ---- Scenario: constant 10 m depth demand, full cascade, 60 s ----

    let ctrl_params = depth_ctrl::Params {
        neutral_buoyancy_n: 147.15,
        depth_pid: PidParams {
            k_p: 0.06,
            k_i: 0.1,
            k_d: 7.5,
            output_limit: 20.0,
            integral_limit: 10.0,
        },
        buoyancy_pid: PidParams {
            k_p: 1.25,
            k_i: 0.1025,
            k_d: 0.0125,
            output_limit: 10.0,
            integral_limit: 5.0,
        },
    };

    let ballast_params = ballast::Params {
        deadzone_threshold: 1.2,
        inertia_coeff: 0.15,
        max_pump_power: 10.0,
    };

    let dynamics_params = dynamics::Params {
        mass_kg: 15.0,
        drag_coeff: 0.5,
    };

    let sim_params = Params {
        dt_s: 0.05,
        total_steps: Some(1200),
        duration_s: None,
        initial_depth_m: None,
        initial_buoyancy_n: None,
        mode: ScenarioMode::DepthCascade,
        profile: SetpointProfile::Constant { value: 10.0 },
    };

    // Bench a full build-and-run cycle, a driver cannot be re-run
    c.bench_function("SimDriver::run", |b| {
        b.iter(|| {
            let mut driver = SimDriver::new(
                sim_params.clone(),
                DepthCtrl::with_params(ctrl_params).unwrap(),
                ballast_params,
                dynamics_params,
            )
            .unwrap();

            driver.run().unwrap();

            driver
        })
    });
}

criterion_group!(benches, sim_benchmark);
criterion_main!(benches);
