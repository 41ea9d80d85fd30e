//! Step-response summary metrics.
//!
//! Evaluates a finished run against a constant reference angle: steady-state
//! error, settling time, overshoot, peaks, and time spent at the torque
//! ceiling. Consumed by the CLI summary and the convergence tests.

use crate::config::SimConfig;
use crate::sim::SimResult;

/// Summary of a run against a constant reference angle.
#[derive(Debug, Clone, Copy)]
pub struct StepResponse {
    /// `|reference − position|` at the final step [rad].
    pub steady_state_error: f64,
    /// Time of the last entry into the tolerance band [s], if the run ends
    /// inside the band. Leaving the band restarts the settling clock.
    pub settling_time: Option<f64>,
    /// Peak excursion beyond the reference, as a fraction of `|reference|`
    /// (0 when the reference is 0 or never exceeded).
    pub overshoot: f64,
    /// Peak `|torque|` over the run [Nm].
    pub peak_torque: f64,
    /// Peak `|velocity|` over the run [rad/s].
    pub peak_velocity: f64,
    /// Steps whose torque sat at the ceiling.
    pub saturated_steps: usize,
}

/// Evaluate the response of `result` against a reference angle.
///
/// # Arguments
/// - `result`: A finished run.
/// - `config`: The run's configuration (for the torque ceiling).
/// - `reference`: Reference angle the run is judged against [rad].
/// - `tolerance`: Settling band half-width [rad].
pub fn step_response(
    result: &SimResult,
    config: &SimConfig,
    reference: f64,
    tolerance: f64,
) -> StepResponse {
    let mut settled_step = None;
    let mut max_excess = 0.0f64;
    let mut peak_torque = 0.0f64;
    let mut peak_velocity = 0.0f64;
    let mut saturated_steps = 0;

    for (i, step) in result.steps.iter().enumerate() {
        let error = (reference - step.position).abs();
        if error < tolerance && settled_step.is_none() {
            settled_step = Some(i);
        }
        // Drifting back out of tolerance restarts the clock.
        if error >= tolerance {
            settled_step = None;
        }

        // Excursion past the reference, in the reference's direction.
        let excess = if reference > 0.0 {
            step.position - reference
        } else if reference < 0.0 {
            reference - step.position
        } else {
            0.0
        };
        max_excess = max_excess.max(excess);

        peak_torque = peak_torque.max(step.torque.abs());
        peak_velocity = peak_velocity.max(step.velocity.abs());
        if step.torque.abs() >= config.max_torque {
            saturated_steps += 1;
        }
    }

    let steady_state_error = result
        .steps
        .last()
        .map_or(0.0, |s| (reference - s.position).abs());

    let overshoot = if reference != 0.0 {
        max_excess / reference.abs()
    } else {
        0.0
    };

    StepResponse {
        steady_state_error,
        settling_time: settled_step.map(|i| result.time(i)),
        overshoot,
        peak_torque,
        peak_velocity,
        saturated_steps,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
