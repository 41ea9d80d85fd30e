//! Per-step series export.
//!
//! Writes a finished run as CSV, one row per step, for plotting and
//! offline analysis.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ffb_sim::sim::SimResult;

/// Write `result` to `path` as CSV.
///
/// One row per step: step index, time [s], target [rad], torque [Nm],
/// velocity [rad/s], position [rad], acceleration [rad/s²].
pub fn write_csv(path: &Path, result: &SimResult) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);

    writeln!(w, "step,time,target,torque,velocity,position,acceleration")?;
    for (i, step) in result.steps.iter().enumerate() {
        writeln!(
            w,
            "{},{},{},{},{},{},{}",
            i,
            result.time(i),
            result.targets[i],
            step.torque,
            step.velocity,
            step.position,
            step.acceleration,
        )?;
    }

    w.flush()
}
