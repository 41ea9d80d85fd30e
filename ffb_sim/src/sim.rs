//! Closed-loop simulation pipeline and run driver.
//!
//! Each step runs the stages in a fixed order:
//!
//! ```text
//! error    = target − prev_position
//! command  = Kp·error + Ki·∫error + Kd·d(error)/dt   (old integral)
//! torque   = saturate(slew(command))                 (slew first)
//! gate     : ∫error advances only while |torque| < max_torque
//! factor   = max(0, 1 − |prev_velocity| / max_speed)
//! accel    = torque·factor / inertia
//! velocity = prev_velocity + accel·dt
//! position = prev_position + velocity·dt             (new velocity)
//! ```
//!
//! Step 0 runs from the all-zero state with an implicit previous torque of
//! zero. NaN or Inf values propagate through the arithmetic untouched; use
//! [`StepRecord::is_finite`] to audit outputs.

use static_assertions::const_assert_eq;
use tracing::debug;

use crate::config::{ConfigError, SimConfig};
use crate::control::actuator::{ActuatorLimits, apply_limits};
use crate::control::pid::{PidGains, PidState, pid_accumulate, pid_command};
use crate::plant::{RotorParams, rotor_step};
use crate::scenario::Setpoint;

// ─── Step Types ─────────────────────────────────────────────────────

/// Outputs of one simulation step — 4 × f64 = 32 bytes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct StepRecord {
    /// Final applied torque [Nm].
    pub torque: f64,
    /// Rotor angular velocity [rad/s].
    pub velocity: f64,
    /// Rotor position [rad].
    pub position: f64,
    /// Rotor angular acceleration [rad/s²].
    pub acceleration: f64,
}

const_assert_eq!(core::mem::size_of::<StepRecord>(), 32);

impl Default for StepRecord {
    fn default() -> Self {
        Self {
            torque: 0.0,
            velocity: 0.0,
            position: 0.0,
            acceleration: 0.0,
        }
    }
}

impl StepRecord {
    /// Returns true if all fields are finite (not NaN, not Inf).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.torque.is_finite()
            && self.velocity.is_finite()
            && self.position.is_finite()
            && self.acceleration.is_finite()
    }
}

/// Input data for one simulation step.
#[derive(Debug, Clone, Copy)]
pub struct StepInput {
    /// Target position [rad].
    pub target: f64,
    /// Previous step's outputs (all-zero before step 0).
    pub prev: StepRecord,
    /// Cycle period [s].
    pub dt: f64,
}

// ─── Step Pipeline ──────────────────────────────────────────────────

/// Advance the closed loop by one step.
///
/// Runs controller, actuator, anti-windup gate, and plant in order and
/// returns the step's outputs. `state` carries the integral accumulator and
/// previous error between calls; everything else flows through `input.prev`.
pub fn step_wheelbase(state: &mut PidState, config: &SimConfig, input: &StepInput) -> StepRecord {
    let dt = input.dt;

    // ── Controller ──────────────────────────────────────────
    let error = input.target - input.prev.position;
    let gains = PidGains {
        kp: config.kp,
        ki: config.ki,
        kd: config.kd,
    };
    let command = pid_command(state, &gains, error, dt);

    // ── Actuator: slew, then saturation ─────────────────────
    let limits = ActuatorLimits {
        max_torque: config.max_torque,
        slew_rate: config.slew_rate,
    };
    let actuator = apply_limits(&limits, command, input.prev.torque, dt);

    // ── Anti-windup gate on the final torque ────────────────
    pid_accumulate(state, error, dt, actuator.saturated);

    // ── Plant ───────────────────────────────────────────────
    let rotor = RotorParams {
        inertia: config.inertia,
        max_speed: config.max_speed(),
    };
    let plant = rotor_step(
        &rotor,
        actuator.torque,
        input.prev.velocity,
        input.prev.position,
        dt,
    );

    StepRecord {
        torque: actuator.torque,
        velocity: plant.velocity,
        position: plant.position,
        acceleration: plant.acceleration,
    }
}

// ─── Run Driver ─────────────────────────────────────────────────────

/// Complete output of a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimResult {
    /// Cycle period [s].
    pub dt: f64,
    /// Per-step target positions [rad].
    pub targets: Vec<f64>,
    /// Per-step outputs, one record per step.
    pub steps: Vec<StepRecord>,
}

impl SimResult {
    /// Simulation time of step `i` [s].
    #[inline]
    pub fn time(&self, i: usize) -> f64 {
        i as f64 * self.dt
    }

    /// Number of steps in the run.
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True when the run holds no steps.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Run a full simulation for `config` under a setpoint profile.
///
/// Validates the configuration, generates `config.total_steps()` targets,
/// and runs the pipeline from the all-zero initial state.
pub fn simulate(config: &SimConfig, setpoint: &Setpoint) -> Result<SimResult, ConfigError> {
    config.validate().map_err(ConfigError::ValidationError)?;
    let targets = setpoint.targets(config.total_steps(), config.dt);
    Ok(run_loop(config, targets))
}

/// Run a simulation over an explicit per-step target sequence.
///
/// The sequence length defines the step count and must not be empty.
pub fn simulate_sequence(config: &SimConfig, targets: &[f64]) -> Result<SimResult, ConfigError> {
    config.validate().map_err(ConfigError::ValidationError)?;
    if targets.is_empty() {
        return Err(ConfigError::ValidationError(
            "target sequence is empty".to_string(),
        ));
    }
    Ok(run_loop(config, targets.to_vec()))
}

fn run_loop(config: &SimConfig, targets: Vec<f64>) -> SimResult {
    let mut state = PidState::default();
    let mut steps = Vec::with_capacity(targets.len());
    let mut prev = StepRecord::default();

    for &target in &targets {
        let record = step_wheelbase(
            &mut state,
            config,
            &StepInput {
                target,
                prev,
                dt: config.dt,
            },
        );
        steps.push(record);
        prev = record;
    }

    debug!(
        "run complete: steps={}, final pos={:.6} rad, final vel={:.4} rad/s, final torque={:.4} Nm",
        steps.len(),
        prev.position,
        prev.velocity,
        prev.torque
    );

    SimResult {
        dt: config.dt,
        targets,
        steps,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
