//! Actuator torque limits.
//!
//! Two clamps in fixed order: slew rate first, then absolute saturation.
//! The slew clamp measures against the previous cycle's *final* torque, so a
//! saturated cycle still bounds how fast the next cycle can move.

/// Actuator limits — extracted from `SimConfig` for the control path.
#[derive(Debug, Clone, Copy)]
pub struct ActuatorLimits {
    /// Torque ceiling [Nm].
    pub max_torque: f64,
    /// Maximum torque change rate [Nm/s].
    pub slew_rate: f64,
}

/// Result of one actuator cycle.
#[derive(Debug, Clone, Copy)]
pub struct ActuatorOutput {
    /// Final torque after both clamps [Nm].
    pub torque: f64,
    /// True when `|torque|` reached `max_torque`. Strict comparison: exact
    /// equality counts as saturated.
    pub saturated: bool,
}

/// Apply the actuator limits to a commanded torque.
///
/// 1. Slew: the change from `prev_torque` is clamped to ±`slew_rate`·dt.
/// 2. Saturation: the result is clamped to ±`max_torque`.
///
/// # Arguments
/// - `limits`: Actuator limits for this run.
/// - `command`: Unclamped torque command from the controller [Nm].
/// - `prev_torque`: Previous cycle's final torque [Nm] (0 before the first
///   cycle).
/// - `dt`: Cycle period [s].
#[inline]
pub fn apply_limits(
    limits: &ActuatorLimits,
    command: f64,
    prev_torque: f64,
    dt: f64,
) -> ActuatorOutput {
    let max_delta = limits.slew_rate * dt;
    let delta = (command - prev_torque).clamp(-max_delta, max_delta);
    let torque = (prev_torque + delta).clamp(-limits.max_torque, limits.max_torque);

    ActuatorOutput {
        torque,
        saturated: torque.abs() >= limits.max_torque,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
