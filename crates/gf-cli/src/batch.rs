//! Slurm array-job command assembly.
//!
//! This layer only builds strings and (on request) runs `sbatch`; scheduler
//! semantics stay external. Every shard is an independent `genflat convert`
//! invocation, so failed jobs can simply be resubmitted.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;
use std::str::FromStr;

/// Per-job runtime budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Runtime {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Runtime {
    /// Slurm `-t` time string.
    pub fn to_slurm(self) -> String {
        format!("{}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }

    /// Partition matching the budget: short queue up to one hour.
    pub fn partition(self) -> &'static str {
        if self.hours == 0 || (self.hours == 1 && self.minutes == 0 && self.seconds == 0) {
            "short"
        } else {
            "standard"
        }
    }
}

impl FromStr for Runtime {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 3 {
            return Err(format!("invalid runtime '{s}': expected H:MM:SS"));
        }
        let parse = |p: &str| p.parse::<u32>().map_err(|_| format!("invalid runtime '{s}'"));
        let (hours, minutes, seconds) = (parse(parts[0])?, parse(parts[1])?, parse(parts[2])?);
        if minutes >= 60 || seconds >= 60 {
            return Err(format!("invalid runtime '{s}': minutes/seconds must be < 60"));
        }
        Ok(Self { hours, minutes, seconds })
    }
}

/// Assemble the `sbatch` array submission for one command file.
///
/// Job `i` of the array runs line `i` of `command_file`.
pub fn sbatch_command(
    command_file: &Path,
    njobs: usize,
    jobname: &str,
    log_dir: &Path,
    runtime: Runtime,
    ncores: usize,
) -> String {
    format!(
        "sbatch --parsable -a 1-{njobs} -J convert_{jobname} -p {} -t {} \
         --mem-per-cpu 2000 --cpus-per-task {ncores} --ntasks-per-core 1 \
         --chdir {} submit_array.sh {}",
        runtime.partition(),
        runtime.to_slurm(),
        log_dir.display(),
        command_file.display(),
    )
}

/// Run an assembled sbatch command and parse the job id from its stdout
/// (`--parsable` prints the bare id).
pub fn submit(command: &str) -> Result<u64> {
    let mut parts = command.split_whitespace();
    let program = parts.next().context("empty submit command")?;
    let output = Command::new(program)
        .args(parts)
        .output()
        .with_context(|| format!("failed to run '{program}'"))?;
    if !output.status.success() {
        anyhow::bail!(
            "sbatch failed ({}): {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .trim()
        .parse::<u64>()
        .with_context(|| format!("could not parse job id from sbatch output '{}'", stdout.trim()))
}
