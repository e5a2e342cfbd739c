//! genflat CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod batch;
mod convert;
mod plot;
mod source;
mod steer;

use batch::Runtime;

#[derive(Parser)]
#[command(name = "genflat")]
#[command(about = "genflat - Generator-event flattening and histogram pipeline")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flatten event files into rows (JSON Lines).
    ///
    /// Arguments are purely positional so the same binary serves both
    /// interactive runs and batch array jobs.
    Convert {
        /// Output rows file (JSON Lines, one row per event).
        output: PathBuf,

        /// Input event files (JSON Lines, one event per line). Missing
        /// files are skipped with a warning.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Absolute pdg code of the species to select.
        #[arg(long, default_value = "15")]
        type_code: u32,
    },

    /// Aggregate row files into weighted histogram artifacts.
    Plot {
        /// Output directory for histogram artifacts (one JSON per
        /// histogram).
        out_dir: PathBuf,

        /// Input row files (JSON Lines). Missing files are skipped with a
        /// warning.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Signal cross section in pb.
        #[arg(long, default_value = "1.0")]
        cross_section: f64,

        /// Integrated luminosity in 1/pb (full Run 2 = 138e3).
        #[arg(long, default_value = "138e3")]
        lumi: f64,

        /// Normalize histogram contents to bin width before writing.
        #[arg(long)]
        normalize_to_bin_width: bool,
    },

    /// Steer batch conversion or per-sample plotting.
    ///
    /// Exactly one of --convert / --plot must be chosen; --submit actually
    /// runs the assembled commands, otherwise they are printed as a dry
    /// run.
    Steer {
        /// Sample name(s) to steer. Repeatable.
        #[arg(long = "sample", required = true)]
        samples: Vec<String>,

        /// Assemble per-file conversion array jobs.
        #[arg(long)]
        convert: bool,

        /// Run one plot invocation per sample over its converted rows.
        #[arg(long)]
        plot: bool,

        /// Output directory for per-sample plot artifacts (with --plot).
        #[arg(long)]
        plot_dir: Option<PathBuf>,

        /// Directory holding per-sample event file folders.
        #[arg(long)]
        input_dir: PathBuf,

        /// Directory for per-sample row file folders.
        #[arg(long)]
        out_dir: PathBuf,

        /// Directory for generated command files.
        #[arg(long)]
        command_dir: PathBuf,

        /// Directory for batch job logs.
        #[arg(long)]
        log_dir: PathBuf,

        /// Event file basename (files are `<base>_<i>.jsonl`, i = 1..nfiles).
        #[arg(long, default_value = "events")]
        file_base: String,

        /// Number of per-sample input files.
        #[arg(long, default_value = "100")]
        nfiles: usize,

        /// Runtime budget per job, `H:MM:SS`.
        #[arg(long, default_value = "0:10:00")]
        runtime: Runtime,

        /// Cores per job.
        #[arg(long, default_value = "1")]
        cores: usize,

        /// Actually run sbatch. Without this, print the dry-run command.
        #[arg(long)]
        submit: bool,

        /// Only (re)submit jobs whose output file is missing.
        #[arg(long)]
        resubmit: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_max_level(cli.log_level).with_target(false).init();

    match cli.command {
        Commands::Convert { output, inputs, type_code } => {
            convert::cmd_convert(&output, &inputs, type_code)
        }
        Commands::Plot { out_dir, inputs, cross_section, lumi, normalize_to_bin_width } => {
            plot::cmd_plot(&out_dir, &inputs, cross_section, lumi, normalize_to_bin_width)
        }
        Commands::Steer {
            samples,
            convert,
            plot,
            plot_dir,
            input_dir,
            out_dir,
            command_dir,
            log_dir,
            file_base,
            nfiles,
            runtime,
            cores,
            submit,
            resubmit,
        } => steer::cmd_steer(&steer::SteerConfig {
            samples,
            input_dir,
            out_dir,
            command_dir,
            log_dir,
            plot_dir,
            file_base,
            nfiles,
            runtime,
            cores,
            convert,
            plot,
            submit,
            resubmit,
        }),
    }
}
