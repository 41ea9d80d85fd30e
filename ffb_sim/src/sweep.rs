//! Parallel parameter sweeps.
//!
//! Each run owns its controller state and output buffer; runs share nothing
//! mutable. One worker thread per configuration, results returned in input
//! order. Sweep output is bit-identical to running the same configurations
//! serially.

use std::thread;

use tracing::debug;

use crate::config::{ConfigError, SimConfig};
use crate::scenario::Setpoint;
use crate::sim::{SimResult, simulate};

/// Run one simulation per configuration, in parallel, under a shared
/// setpoint profile.
///
/// All configurations are validated before any worker starts; the first
/// invalid one fails the whole sweep and nothing runs.
pub fn sweep(configs: &[SimConfig], setpoint: &Setpoint) -> Result<Vec<SimResult>, ConfigError> {
    for config in configs {
        config.validate().map_err(ConfigError::ValidationError)?;
    }

    debug!("sweep: launching {} runs", configs.len());

    thread::scope(|scope| {
        let handles: Vec<_> = configs
            .iter()
            .map(|config| scope.spawn(move || simulate(config, setpoint)))
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().expect("simulation worker panicked"))
            .collect()
    })
}

// ─── Tests ──────────────────────────────────────────────────────────
