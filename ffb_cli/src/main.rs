//! # FFB Wheelbase Simulator
//!
//! Closed-loop simulation of a force-feedback motor wheelbase: a PID
//! position controller driving a slew- and torque-limited actuator into a
//! back-EMF derated rotor model.
//!
//! Loads a TOML configuration (or starts from the reference defaults),
//! applies command-line overrides, runs the configured step scenario, and
//! logs a response summary. `--csv` exports the per-step series.

use clap::Parser;
use ffb_sim::config::{ConfigError, SimConfig, load_config};
use ffb_sim::metrics::step_response;
use ffb_sim::scenario::Setpoint;
use ffb_sim::sim::simulate;
use std::path::PathBuf;
use std::process;
use std::time::Instant;
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

mod export;

/// Settling band half-width for the run summary [rad].
const SETTLE_TOLERANCE: f64 = 0.05;

/// FFB Wheelbase Simulator — closed-loop step-response runs
#[derive(Parser, Debug)]
#[command(name = "ffb_cli")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Closed-loop simulation of a force-feedback motor wheelbase")]
struct Args {
    /// Path to a simulation TOML. Missing fields fall back to the
    /// reference wheelbase defaults; without this flag the defaults run.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the proportional gain.
    #[arg(long, value_name = "GAIN")]
    kp: Option<f64>,

    /// Override the integral gain.
    #[arg(long, value_name = "GAIN")]
    ki: Option<f64>,

    /// Override the derivative gain.
    #[arg(long, value_name = "GAIN")]
    kd: Option<f64>,

    /// Override the torque ceiling [Nm].
    #[arg(long, value_name = "NM")]
    max_torque: Option<f64>,

    /// Override the torque slew limit [Nm/s].
    #[arg(long, value_name = "NM_PER_S")]
    slew_rate: Option<f64>,

    /// Override the step target angle [rad].
    #[arg(long, value_name = "RAD")]
    target_angle: Option<f64>,

    /// Override the simulated duration [s].
    #[arg(long, value_name = "S")]
    sim_time: Option<f64>,

    /// Write the per-step series to a CSV file.
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();
    setup_tracing(&args);

    info!(
        "FFB wheelbase simulator v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    if let Err(e) = run(&args) {
        error!("FATAL: {e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match args.config {
        Some(ref path) => {
            info!("Loading configuration from {}", path.display());
            load_config(path)?
        }
        None => SimConfig::default(),
    };
    apply_overrides(&mut config, args);
    config.validate().map_err(ConfigError::ValidationError)?;

    info!(
        "Config OK: dt={}s, steps={}, target={:.4} rad, engage at {}s",
        config.dt,
        config.total_steps(),
        config.target_angle,
        config.engage_time,
    );

    let setpoint = Setpoint::StepTo {
        angle: config.target_angle,
        engage_time: config.engage_time,
    };

    let started = Instant::now();
    let result = simulate(&config, &setpoint)?;
    info!(
        "Run complete: {} steps in {:.1} ms",
        result.len(),
        started.elapsed().as_secs_f64() * 1000.0,
    );

    let response = step_response(&result, &config, config.target_angle, SETTLE_TOLERANCE);
    info!(
        "Response: steady-state error {:.4} rad, overshoot {:.1}%, peak torque {:.2} Nm, peak velocity {:.1} rad/s",
        response.steady_state_error,
        response.overshoot * 100.0,
        response.peak_torque,
        response.peak_velocity,
    );
    match response.settling_time {
        Some(t) => info!("Settled within ±{SETTLE_TOLERANCE} rad after {t:.3} s"),
        None => warn!("Run ended outside the ±{SETTLE_TOLERANCE} rad settling band"),
    }
    if response.saturated_steps > 0 {
        info!(
            "Torque ceiling reached on {} of {} steps",
            response.saturated_steps,
            result.len(),
        );
    }

    if let Some(ref path) = args.csv {
        export::write_csv(path, &result)?;
        info!("Wrote {} rows to {}", result.len(), path.display());
    }

    Ok(())
}

/// Apply command-line overrides on top of the loaded configuration.
fn apply_overrides(config: &mut SimConfig, args: &Args) {
    if let Some(kp) = args.kp {
        config.kp = kp;
    }
    if let Some(ki) = args.ki {
        config.ki = ki;
    }
    if let Some(kd) = args.kd {
        config.kd = kd;
    }
    if let Some(max_torque) = args.max_torque {
        config.max_torque = max_torque;
    }
    if let Some(slew_rate) = args.slew_rate {
        config.slew_rate = slew_rate;
    }
    if let Some(target_angle) = args.target_angle {
        config.target_angle = target_angle;
    }
    if let Some(sim_time) = args.sim_time {
        config.sim_time = sim_time;
    }
}

/// Setup tracing subscriber based on CLI arguments.
fn setup_tracing(args: &Args) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}
