//! Simulation configuration: TOML loading, defaults, and validation.
//!
//! `SimConfig` carries every parameter of a run. Absent TOML keys fall back
//! to the reference wheelbase setup (18 Nm direct-drive motor, 10 kHz loop,
//! step to π at t = 0.1 s). Validation rejects non-positive or non-finite
//! physical parameters before a run starts; nothing is checked inside the
//! step loop.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Conversion factor from RPM to rad/s (2π/60).
pub const RPM_TO_RAD_PER_SEC: f64 = std::f64::consts::PI / 30.0;

// ─── Error Type ─────────────────────────────────────────────────────

/// Configuration loading/validation error.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("Failed to read configuration: {0}")]
    IoError(String),
    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

// ─── SimConfig ──────────────────────────────────────────────────────

/// Complete configuration of one simulation run.
///
/// Immutable once a run starts. Each field has a reference default, so a
/// partial (or empty) TOML document is a valid configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimConfig {
    // ─── Wheelbase ──────────────────────────────────
    /// Torque ceiling [Nm].
    #[serde(default = "default_max_torque")]
    pub max_torque: f64,
    /// Maximum torque change rate [Nm/s].
    #[serde(default = "default_slew_rate")]
    pub slew_rate: f64,
    /// Speed at which available torque reaches zero [RPM].
    #[serde(default = "default_max_speed_rpm")]
    pub max_speed_rpm: f64,
    /// Rotor inertia [kg·m²].
    #[serde(default = "default_inertia")]
    pub inertia: f64,

    // ─── PID ────────────────────────────────────────
    /// Proportional gain.
    #[serde(default = "default_kp")]
    pub kp: f64,
    /// Integral gain.
    #[serde(default = "default_ki")]
    pub ki: f64,
    /// Derivative gain.
    #[serde(default = "default_kd")]
    pub kd: f64,

    // ─── Timing ─────────────────────────────────────
    /// Cycle period [s].
    #[serde(default = "default_dt")]
    pub dt: f64,
    /// Simulated duration [s].
    #[serde(default = "default_sim_time")]
    pub sim_time: f64,

    // ─── Setpoint ───────────────────────────────────
    /// Step target angle [rad].
    #[serde(default = "default_target_angle")]
    pub target_angle: f64,
    /// Time at which the target steps from 0 to `target_angle` [s].
    #[serde(default = "default_engage_time")]
    pub engage_time: f64,
}

fn default_max_torque() -> f64 {
    18.0
}

fn default_slew_rate() -> f64 {
    1000.0
}

fn default_max_speed_rpm() -> f64 {
    3000.0
}

fn default_inertia() -> f64 {
    0.01
}

fn default_kp() -> f64 {
    10.0
}

fn default_ki() -> f64 {
    10.0
}

fn default_kd() -> f64 {
    0.1
}

fn default_dt() -> f64 {
    0.0001
}

fn default_sim_time() -> f64 {
    2.0
}

fn default_target_angle() -> f64 {
    std::f64::consts::PI
}

fn default_engage_time() -> f64 {
    0.1
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_torque: default_max_torque(),
            slew_rate: default_slew_rate(),
            max_speed_rpm: default_max_speed_rpm(),
            inertia: default_inertia(),
            kp: default_kp(),
            ki: default_ki(),
            kd: default_kd(),
            dt: default_dt(),
            sim_time: default_sim_time(),
            target_angle: default_target_angle(),
            engage_time: default_engage_time(),
        }
    }
}

impl SimConfig {
    /// Derating knee speed in loop units [rad/s].
    #[inline]
    pub fn max_speed(&self) -> f64 {
        self.max_speed_rpm * RPM_TO_RAD_PER_SEC
    }

    /// Number of steps in a run: `ceil(sim_time / dt)`.
    ///
    /// At the reference timing (2.0 s at 10 kHz) this is 20000.
    #[inline]
    pub fn total_steps(&self) -> usize {
        (self.sim_time / self.dt).ceil() as usize
    }

    /// Check all parameter bounds.
    ///
    /// Physical parameters (`dt`, `sim_time`, `max_torque`, `slew_rate`,
    /// `max_speed_rpm`, `inertia`) must be positive and finite. Gains and the
    /// target angle may take any finite value; `engage_time` must be finite
    /// and non-negative.
    pub fn validate(&self) -> Result<(), String> {
        require_positive("dt", self.dt)?;
        require_positive("sim_time", self.sim_time)?;
        require_positive("max_torque", self.max_torque)?;
        require_positive("slew_rate", self.slew_rate)?;
        require_positive("max_speed_rpm", self.max_speed_rpm)?;
        require_positive("inertia", self.inertia)?;
        require_finite("kp", self.kp)?;
        require_finite("ki", self.ki)?;
        require_finite("kd", self.kd)?;
        require_finite("target_angle", self.target_angle)?;
        require_finite("engage_time", self.engage_time)?;
        if self.engage_time < 0.0 {
            return Err(format!("engage_time {} must be >= 0", self.engage_time));
        }
        Ok(())
    }
}

fn require_positive(name: &str, value: f64) -> Result<(), String> {
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("{name} {value} must be > 0 and finite"));
    }
    Ok(())
}

fn require_finite(name: &str, value: f64) -> Result<(), String> {
    if !value.is_finite() {
        return Err(format!("{name} {value} must be finite"));
    }
    Ok(())
}

// ─── Loading Functions ──────────────────────────────────────────────

/// Load and validate a simulation configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<SimConfig, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.display())))?;
    load_config_from_str(&raw)
}

/// Load and validate a simulation configuration from a TOML string.
pub fn load_config_from_str(raw: &str) -> Result<SimConfig, ConfigError> {
    let config: SimConfig =
        toml::from_str(raw).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    config.validate().map_err(ConfigError::ValidationError)?;
    Ok(config)
}

// ─── Tests ──────────────────────────────────────────────────────────
