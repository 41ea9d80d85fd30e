//! # FFB Wheelbase Simulation Library
//!
//! Closed-loop simulation of a force-feedback motor wheelbase: a discrete-time
//! PID position controller with conditional-integration anti-windup drives an
//! actuator with slew and saturation limits, which in turn drives a rotor with
//! back-EMF torque derating. Fixed time step, semi-implicit Euler integration,
//! deterministic output series.
//!
//! ## Pipeline
//!
//! Each step runs the stages in a fixed order:
//!
//! 1. **Controller**: PID command from the integral accumulated through the
//!    previous step
//! 2. **Actuator**: slew clamp, then saturation clamp
//! 3. **Anti-windup gate**: the integral advances only while the final torque
//!    stays strictly below the ceiling
//! 4. **Plant**: derated torque into semi-implicit Euler rotor integration
//!
//! ## Determinism
//!
//! A run is a pure function of its configuration and target sequence. All
//! state lives in a per-run [`control::pid::PidState`] and the previous step's
//! [`sim::StepRecord`]; identical inputs reproduce bit-identical output.

#![deny(clippy::disallowed_types)]

pub mod config;
pub mod control;
pub mod metrics;
pub mod plant;
pub mod scenario;
pub mod sim;
pub mod sweep;
