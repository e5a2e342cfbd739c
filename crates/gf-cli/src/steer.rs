//! `genflat steer` — per-sample command assembly for batch conversion and
//! plotting.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::batch::{sbatch_command, submit, Runtime};

/// Steering configuration, one run over one or more samples.
pub struct SteerConfig {
    pub samples: Vec<String>,
    pub input_dir: PathBuf,
    pub out_dir: PathBuf,
    pub command_dir: PathBuf,
    pub log_dir: PathBuf,
    pub plot_dir: Option<PathBuf>,
    pub file_base: String,
    pub nfiles: usize,
    pub runtime: Runtime,
    pub cores: usize,
    pub convert: bool,
    pub plot: bool,
    pub submit: bool,
    pub resubmit: bool,
}

/// One sample's generated command lists.
struct SampleCommands {
    /// All per-file convert commands, in file order.
    all: Vec<String>,
    /// The subset whose output file does not exist yet.
    missing_output: Vec<String>,
}

pub fn cmd_steer(config: &SteerConfig) -> Result<()> {
    if config.convert && config.plot {
        anyhow::bail!("cannot steer conversion and plotting in the same run");
    }
    if !config.convert && !config.plot {
        anyhow::bail!("nothing to steer: pass --convert or --plot");
    }

    let exe = std::env::current_exe().context("cannot locate own binary")?;
    if config.convert {
        steer_convert(&exe, config)
    } else {
        steer_plot(&exe, config)
    }
}

/// Assemble (and optionally submit) the per-file conversion array jobs.
fn steer_convert(exe: &Path, config: &SteerConfig) -> Result<()> {
    fs::create_dir_all(&config.command_dir)
        .with_context(|| format!("failed to create {}", config.command_dir.display()))?;
    fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("failed to create {}", config.log_dir.display()))?;

    for sample in &config.samples {
        fs::create_dir_all(config.out_dir.join(sample))
            .with_context(|| format!("failed to create output folder for '{sample}'"))?;

        let commands = build_convert_commands(exe, config, sample);
        let all_file = config.command_dir.join(format!("{sample}_convert.txt"));
        let resub_file = config.command_dir.join(format!("{sample}_convert_resub.txt"));
        write_command_file(&all_file, &commands.all)?;
        write_command_file(&resub_file, &commands.missing_output)?;

        let (script, njobs) = if config.resubmit {
            (&resub_file, commands.missing_output.len())
        } else {
            (&all_file, commands.all.len())
        };
        if njobs == 0 {
            tracing::info!("sample '{sample}': nothing to submit");
            continue;
        }

        let cmd = sbatch_command(script, njobs, sample, &config.log_dir, config.runtime, config.cores);
        if config.submit {
            let job_id = submit(&cmd)
                .with_context(|| format!("submission failed for sample '{sample}'"))?;
            tracing::info!("submitted {njobs} conversion job(s) for '{sample}' with id {job_id}");
            eprintln!("Submitted {njobs} job(s) for '{sample}' (job id {job_id})");
        } else {
            eprintln!("Dry run for '{sample}' ({njobs} job(s)), would run:\n  {cmd}");
        }
    }

    Ok(())
}

/// Run (or dry-run) one `plot` invocation per sample over that sample's
/// converted row files. Plotting is local, not a batch job; `--submit`
/// gates execution the same way it gates sbatch.
fn steer_plot(exe: &Path, config: &SteerConfig) -> Result<()> {
    let plot_dir =
        config.plot_dir.as_ref().context("--plot-dir is required when steering plots")?;

    for sample in &config.samples {
        let rows = sample_row_files(&config.out_dir, sample)?;
        if rows.is_empty() {
            tracing::warn!(
                "sample '{sample}': no row files under {}, skipping",
                config.out_dir.join(sample).display()
            );
            continue;
        }

        let args = plot_args(&plot_dir.join(sample), &rows);
        if config.submit {
            let status = Command::new(exe)
                .args(&args)
                .status()
                .with_context(|| format!("failed to run plot for sample '{sample}'"))?;
            if !status.success() {
                anyhow::bail!("plot failed for sample '{sample}' ({status})");
            }
            tracing::info!("plotted sample '{sample}' from {} row file(s)", rows.len());
        } else {
            eprintln!(
                "Dry run for '{sample}' ({} row file(s)), would run:\n  {} {}",
                rows.len(),
                exe.display(),
                args.join(" ")
            );
        }
    }

    Ok(())
}

/// Build the per-file convert command lines for one sample.
///
/// Input/output paths are positional on the convert subcommand so each line
/// is directly shell-invocable by the array job wrapper.
fn build_convert_commands(exe: &Path, config: &SteerConfig, sample: &str) -> SampleCommands {
    let mut all = Vec::with_capacity(config.nfiles);
    let mut missing_output = Vec::new();
    for i in 1..=config.nfiles {
        let infile = config.input_dir.join(sample).join(format!("{}_{i}.jsonl", config.file_base));
        let outfile = config.out_dir.join(sample).join(format!("rows_{i}.jsonl"));
        let command =
            format!("{} convert {} {}", exe.display(), outfile.display(), infile.display());
        if !outfile.is_file() {
            missing_output.push(command.clone());
        }
        all.push(command);
    }
    SampleCommands { all, missing_output }
}

/// One sample's converted row files, sorted for a stable plot input order.
fn sample_row_files(out_dir: &Path, sample: &str) -> Result<Vec<PathBuf>> {
    let folder = out_dir.join(sample);
    let mut rows = Vec::new();
    for entry in fs::read_dir(&folder)
        .with_context(|| format!("cannot list row folder {}", folder.display()))?
    {
        let path = entry?.path();
        if path.is_file() {
            rows.push(path);
        }
    }
    rows.sort();
    Ok(rows)
}

/// Argument vector for one per-sample plot invocation.
fn plot_args(plot_out: &Path, rows: &[PathBuf]) -> Vec<String> {
    let mut args = vec!["plot".to_string(), plot_out.display().to_string()];
    args.extend(rows.iter().map(|r| r.display().to_string()));
    args
}

fn write_command_file(path: &Path, commands: &[String]) -> Result<()> {
    let mut f = fs::File::create(path)
        .with_context(|| format!("failed to create command file {}", path.display()))?;
    for c in commands {
        writeln!(f, "{c}")?;
    }
    tracing::debug!("wrote {} command(s) to {}", commands.len(), path.display());
    Ok(())
}
