//! Closed-loop convergence validation.
//!
//! Runs the reference wheelbase configuration against its step setpoint and
//! checks the response summary: steady-state error, settling time, overshoot,
//! and torque-ceiling contact during the transient.

use ffb_sim::config::SimConfig;
use ffb_sim::metrics::step_response;
use ffb_sim::scenario::Setpoint;
use ffb_sim::sim::{SimResult, StepRecord, simulate};

/// Settling band half-width for convergence checks [rad].
const SETTLE_TOLERANCE: f64 = 0.1;

fn reference_setpoint(config: &SimConfig) -> Setpoint {
    Setpoint::StepTo {
        angle: config.target_angle,
        engage_time: config.engage_time,
    }
}

fn reference_run(config: &SimConfig) -> SimResult {
    simulate(config, &reference_setpoint(config)).unwrap()
}

// ─── Steady-state accuracy and settling ─────────────────────────────

#[test]
fn reference_run_settles_on_the_target_angle() {
    let config = SimConfig::default();
    let result = reference_run(&config);
    let response = step_response(&result, &config, config.target_angle, SETTLE_TOLERANCE);

    assert!(
        response.steady_state_error < 0.05,
        "steady-state error {:.4} rad exceeds 0.05 rad for a {:.4} rad step",
        response.steady_state_error,
        config.target_angle,
    );

    let settle = response
        .settling_time
        .expect("run never settled inside the tolerance band");
    assert!(
        settle < 1.5,
        "settling time {:.3} s exceeds 1.5 s limit",
        settle,
    );
}

#[test]
fn reference_run_overshoot_stays_bounded() {
    let config = SimConfig::default();
    let result = reference_run(&config);
    let response = step_response(&result, &config, config.target_angle, SETTLE_TOLERANCE);

    // Underdamped at the reference gains, but well under a full revolution.
    assert!(
        response.overshoot < 0.8,
        "overshoot {:.2} of a {:.4} rad step exceeds the 0.8 limit",
        response.overshoot,
        config.target_angle,
    );
}

// ─── Transient torque demand ────────────────────────────────────────

#[test]
fn reference_run_saturates_during_the_transient() {
    let config = SimConfig::default();
    let result = reference_run(&config);
    let response = step_response(&result, &config, config.target_angle, SETTLE_TOLERANCE);

    assert!(
        response.saturated_steps > 0,
        "reference transient never reached the {:.1} Nm ceiling",
        config.max_torque,
    );
    assert!(
        response.peak_torque <= config.max_torque,
        "peak torque {:.6} Nm exceeds the {:.1} Nm ceiling",
        response.peak_torque,
        config.max_torque,
    );
}

// ─── Engage phase and final state ───────────────────────────────────

#[test]
fn rotor_holds_at_rest_until_the_step_engages() {
    let config = SimConfig::default();
    let result = reference_run(&config);
    let engage_index = (config.engage_time / config.dt) as usize;

    for (i, step) in result.steps[..engage_index].iter().enumerate() {
        assert_eq!(
            *step,
            StepRecord::default(),
            "rotor moved at step {} before the setpoint engaged",
            i,
        );
    }
}

#[test]
fn reference_run_ends_near_rest() {
    let config = SimConfig::default();
    let result = reference_run(&config);
    let last = result.steps.last().unwrap();

    assert!(
        last.velocity.abs() < 1.0,
        "final velocity {:.4} rad/s is not near rest",
        last.velocity,
    );
}
