//! Discrete-time PID position controller with conditional integration.
//!
//! The command for a cycle uses the integral accumulated through the previous
//! cycle. Accumulation itself happens afterwards, gated on the cycle's final
//! (slew- and saturation-limited) torque: while that torque sits at the
//! ceiling, the accumulator holds.

/// Internal state of the PID controller.
///
/// Preserves the integral accumulator and previous error across cycles.
/// Zeroed at the start of every run.
#[derive(Debug, Clone, Copy)]
pub struct PidState {
    /// Integral accumulator: Σ error·dt [rad·s].
    integral: f64,
    /// Previous position error [rad] (for derivative).
    prev_error: f64,
}

impl Default for PidState {
    fn default() -> Self {
        Self {
            integral: 0.0,
            prev_error: 0.0,
        }
    }
}

impl PidState {
    /// Reset all internal state to zero.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// PID gains — extracted from `SimConfig` for the control path.
#[derive(Debug, Clone, Copy)]
pub struct PidGains {
    /// Proportional gain.
    pub kp: f64,
    /// Integral gain.
    pub ki: f64,
    /// Derivative gain.
    pub kd: f64,
}

/// Compute the unclamped torque command for one cycle.
///
/// `Kp·error + Ki·∫error + Kd·d(error)/dt`, where the integral is the value
/// accumulated through the previous cycle. The previous error is updated
/// unconditionally, before the actuator stage runs.
///
/// # Arguments
/// - `state`: Mutable PID internal state.
/// - `gains`: PID gains for this run.
/// - `error`: Current position error (target − actual) [rad].
/// - `dt`: Cycle period [s]. Must be positive; guaranteed by config
///   validation.
///
/// # Returns
/// Torque command [Nm] (unclamped — slew and saturation are applied in the
/// actuator stage).
#[inline]
pub fn pid_command(state: &mut PidState, gains: &PidGains, error: f64, dt: f64) -> f64 {
    let derivative = (error - state.prev_error) / dt;
    state.prev_error = error;

    gains.kp * error + gains.ki * state.integral + gains.kd * derivative
}

/// Advance the integral accumulator for one cycle.
///
/// Conditional-integration anti-windup: the accumulator holds on any cycle
/// whose final torque reached the ceiling (`saturated`). Called after the
/// actuator stage, so the gate reflects both the slew and saturation clamps.
#[inline]
pub fn pid_accumulate(state: &mut PidState, error: f64, dt: f64, saturated: bool) {
    if !saturated {
        state.integral += error * dt;
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
