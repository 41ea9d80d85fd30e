//! Control stages: PID command generation and actuator limiting.
//!
//! The anti-windup gate couples the two stages: the integral accumulator
//! advances only on cycles where the actuator's final torque stays strictly
//! below the ceiling, so the gate is evaluated after both clamps.

pub mod actuator;
pub mod pid;
