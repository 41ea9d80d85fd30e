//! Setpoint profiles.
//!
//! A `Setpoint` turns a step index into a target angle. The step profile
//! matches the reference scenario: target 0 from the start of the run, then
//! a constant angle from the engage index onward.

/// Target-angle profile over a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Setpoint {
    /// Constant target for the whole run.
    Hold(f64),
    /// Zero until `engage_time`, then `angle` for the rest of the run.
    ///
    /// The engage index is `engage_time / dt` truncated toward zero, so an
    /// `engage_time` of 0 engages at the first step.
    StepTo {
        /// Target angle after the step [rad].
        angle: f64,
        /// Engage time [s].
        engage_time: f64,
    },
}

impl Setpoint {
    /// Target angle at step index `i` for cycle period `dt`.
    #[inline]
    pub fn target_at(&self, i: usize, dt: f64) -> f64 {
        match *self {
            Setpoint::Hold(angle) => angle,
            Setpoint::StepTo { angle, engage_time } => {
                let engage_index = (engage_time / dt) as usize;
                if i >= engage_index { angle } else { 0.0 }
            }
        }
    }

    /// Materialize the profile into a per-step target vector.
    pub fn targets(&self, steps: usize, dt: f64) -> Vec<f64> {
        (0..steps).map(|i| self.target_at(i, dt)).collect()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
