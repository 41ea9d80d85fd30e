//! Whole-run physical invariants.
//!
//! Scans complete runs for the actuator guarantees: the torque ceiling is
//! never exceeded, per-step torque changes stay inside the slew budget, the
//! integral gate keeps the command responsive through deep saturation, and
//! back-EMF derating freezes the rotor above the speed limit.

use ffb_sim::config::SimConfig;
use ffb_sim::scenario::Setpoint;
use ffb_sim::sim::{StepRecord, simulate, simulate_sequence};

// ─── Actuator limit scans ───────────────────────────────────────────

#[test]
fn torque_never_exceeds_the_ceiling() {
    let config = SimConfig::default();
    let setpoint = Setpoint::StepTo {
        angle: config.target_angle,
        engage_time: config.engage_time,
    };
    let result = simulate(&config, &setpoint).unwrap();

    for (i, step) in result.steps.iter().enumerate() {
        assert!(
            step.torque.abs() <= config.max_torque,
            "step {}: torque {:.6} Nm outside ±{:.1} Nm",
            i,
            step.torque,
            config.max_torque,
        );
    }
}

#[test]
fn torque_rate_stays_inside_the_slew_budget() {
    let config = SimConfig::default();
    let setpoint = Setpoint::StepTo {
        angle: config.target_angle,
        engage_time: config.engage_time,
    };
    let result = simulate(&config, &setpoint).unwrap();

    // The actuator starts from 0 Nm, so the first step is bounded too.
    let budget = config.slew_rate * config.dt + 1e-9;
    let mut prev = 0.0;
    for (i, step) in result.steps.iter().enumerate() {
        assert!(
            (step.torque - prev).abs() <= budget,
            "step {}: torque jumped {:.6} Nm, budget is {:.6} Nm",
            i,
            (step.torque - prev).abs(),
            config.slew_rate * config.dt,
        );
        prev = step.torque;
    }
}

// ─── Zero-gain transparency ─────────────────────────────────────────

#[test]
fn zero_gains_leave_the_rotor_untouched() {
    let config = SimConfig {
        kp: 0.0,
        ki: 0.0,
        kd: 0.0,
        sim_time: 0.5,
        ..SimConfig::default()
    };
    let setpoint = Setpoint::StepTo {
        angle: config.target_angle,
        engage_time: config.engage_time,
    };
    let result = simulate(&config, &setpoint).unwrap();

    for (i, step) in result.steps.iter().enumerate() {
        assert_eq!(
            *step,
            StepRecord::default(),
            "step {} drifted with all gains at zero",
            i,
        );
    }
}

// ─── Integral gate through saturation ───────────────────────────────

/// Drives the actuator into deep saturation for 1 s, then drops the target
/// to zero. With the integral gated during saturation the command reverses
/// within a couple of steps; a wound-up integral would hold it positive for
/// the rest of the run.
#[test]
fn integral_gate_keeps_the_command_responsive() {
    let config = SimConfig {
        max_torque: 1.0,
        slew_rate: 1000.0,
        max_speed_rpm: 1e9,
        inertia: 1.0,
        kp: 50.0,
        ki: 20.0,
        kd: 0.0,
        dt: 0.001,
        ..SimConfig::default()
    };

    let mut targets = vec![10.0; 1000];
    targets.resize(2000, 0.0);
    let result = simulate_sequence(&config, &targets).unwrap();

    assert_eq!(
        result.steps[999].torque, 1.0,
        "actuator left the ceiling while the far target was still applied",
    );
    assert_eq!(
        result.steps[1000].torque, 0.0,
        "first step after the target drop should slew a full budget down",
    );
    assert_eq!(
        result.steps[1001].torque, -1.0,
        "command failed to reverse right after the target drop",
    );
}

// ─── Permanent saturation ───────────────────────────────────────────

#[test]
fn overdriven_run_rides_the_ceiling_exactly() {
    // Far target, heavy rotor, slew budget wider than the ceiling: the
    // torque pins at +max_torque from the first step onwards.
    let config = SimConfig {
        max_torque: 5.0,
        slew_rate: 1e5,
        inertia: 10.0,
        kp: 100.0,
        ki: 0.0,
        kd: 0.0,
        dt: 0.001,
        sim_time: 0.2,
        ..SimConfig::default()
    };
    let result = simulate(&config, &Setpoint::Hold(1000.0)).unwrap();

    assert_eq!(result.len(), 200);
    for (i, step) in result.steps.iter().enumerate() {
        assert_eq!(
            step.torque, config.max_torque,
            "step {}: torque left the ceiling during an overdriven run",
            i,
        );
    }
}

// ─── Back-EMF derating ──────────────────────────────────────────────

/// One overpowered step flings the rotor far past the speed limit; from
/// then on the derating factor floors at zero and the velocity freezes
/// while the position keeps advancing.
#[test]
fn derating_freezes_velocity_beyond_the_speed_limit() {
    let config = SimConfig {
        max_torque: 100.0,
        slew_rate: 1e9,
        max_speed_rpm: 10.0,
        inertia: 0.001,
        kp: 1000.0,
        ki: 0.0,
        kd: 0.0,
        dt: 0.01,
        sim_time: 0.05,
        ..SimConfig::default()
    };
    let result = simulate(&config, &Setpoint::Hold(1e6)).unwrap();

    assert_eq!(result.len(), 5);
    let first = &result.steps[0];
    assert!(
        first.velocity.abs() > config.max_speed(),
        "first step should overshoot the {:.3} rad/s speed limit, got {:.3}",
        config.max_speed(),
        first.velocity,
    );

    for (i, step) in result.steps.iter().enumerate().skip(1) {
        assert_eq!(
            step.acceleration, 0.0,
            "step {}: rotor accelerated past the speed limit",
            i,
        );
        assert_eq!(
            step.velocity, first.velocity,
            "step {}: velocity changed while derating floored the torque",
            i,
        );
        assert!(
            step.position > result.steps[i - 1].position,
            "step {}: position stopped advancing while coasting",
            i,
        );
    }
}
