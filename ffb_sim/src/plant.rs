//! Rotor plant model.
//!
//! First-order rotational dynamics with a linear back-EMF torque derating:
//! available torque falls linearly with speed and reaches zero at
//! `max_speed`. Integration is semi-implicit Euler: velocity is updated
//! first and the position update uses the new velocity.
//!
//! Velocity itself is never clamped. A single step can carry it past
//! `max_speed`, after which the derating factor floors at zero and the rotor
//! coasts.

use tracing::trace;

/// Rotor parameters — extracted from `SimConfig` for the plant stage.
#[derive(Debug, Clone, Copy)]
pub struct RotorParams {
    /// Rotor inertia [kg·m²].
    pub inertia: f64,
    /// Speed at which available torque reaches zero [rad/s].
    pub max_speed: f64,
}

/// Rotor state after one integration step.
#[derive(Debug, Clone, Copy)]
pub struct PlantStep {
    /// Angular acceleration [rad/s²].
    pub acceleration: f64,
    /// Angular velocity [rad/s].
    pub velocity: f64,
    /// Position [rad].
    pub position: f64,
}

/// Torque derating factor at a given rotor speed.
///
/// `max(0, 1 − |velocity| / max_speed)` — 1 at standstill, 0 at and beyond
/// `max_speed`, direction-independent.
#[inline]
pub fn speed_factor(params: &RotorParams, velocity: f64) -> f64 {
    (1.0 - velocity.abs() / params.max_speed).max(0.0)
}

/// Integrate the rotor one step under an applied torque.
///
/// The derating factor is evaluated at the previous cycle's velocity, then:
///
/// ```text
/// acceleration = torque · factor / inertia
/// velocity     = prev_velocity + acceleration · dt
/// position     = prev_position + velocity · dt
/// ```
pub fn rotor_step(
    params: &RotorParams,
    torque: f64,
    prev_velocity: f64,
    prev_position: f64,
    dt: f64,
) -> PlantStep {
    let effective_torque = torque * speed_factor(params, prev_velocity);
    let acceleration = effective_torque / params.inertia;
    let velocity = prev_velocity + acceleration * dt;
    let position = prev_position + velocity * dt;

    trace!(
        "rotor: torque={:.4}, effective={:.4}, vel={:.4}, pos={:.4}",
        torque, effective_torque, velocity, position
    );

    PlantStep {
        acceleration,
        velocity,
        position,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
