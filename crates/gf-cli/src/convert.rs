//! `genflat convert` — event files → flat rows.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use gf_core::ChargeConvention;
use gf_event::Flattener;

use crate::source::{existing_files, EventReader};

/// How often the event loop logs progress.
const PROGRESS_EVERY: u64 = 1000;

pub fn cmd_convert(output: &Path, inputs: &[PathBuf], type_code: u32) -> Result<()> {
    let existing = existing_files(inputs);
    if existing.is_empty() {
        anyhow::bail!("none of the {} input file(s) exist", inputs.len());
    }
    tracing::info!("loaded {} of {} input file(s)", existing.len(), inputs.len());

    let flattener = Flattener::new(type_code, ChargeConvention::charged_leptons())
        .context("invalid flattener configuration")?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    let file = File::create(output)
        .with_context(|| format!("failed to create output file {}", output.display()))?;
    let mut writer = BufWriter::new(file);

    let mut n_events: u64 = 0;
    let mut n_rows: u64 = 0;
    let mut n_skipped: u64 = 0;

    for path in &existing {
        tracing::info!("reading events from {}", path.display());
        for event in EventReader::open(path)? {
            let event = event?;
            if n_events % PROGRESS_EVERY == 0 {
                tracing::info!("processing event no. {n_events}");
            }
            n_events += 1;

            match flattener.flatten(&event) {
                Ok(row) => {
                    let json = serde_json::to_string(&row)?;
                    writeln!(writer, "{json}")?;
                    n_rows += 1;
                }
                // A bad decay graph aborts this event only; the loop goes
                // on with the next one.
                Err(e @ gf_core::Error::MalformedGraph { .. }) => {
                    tracing::error!("skipping event: {e}");
                    n_skipped += 1;
                }
                Err(e) => return Err(e).context("event flattening failed"),
            }
        }
    }

    writer.flush()?;

    eprintln!(
        "Converted {n_rows} of {n_events} events → {}{}",
        output.display(),
        if n_skipped > 0 { format!(" ({n_skipped} malformed events skipped)") } else { String::new() },
    );

    Ok(())
}
