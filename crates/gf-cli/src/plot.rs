//! `genflat plot` — row files → weighted histogram artifacts.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use gf_core::FlatRow;
use gf_hist::{book_default_hists, fill_flat_rows, HistRegistry};
use gf_viz::HistArtifact;

use crate::source::{existing_files, read_rows};

/// Event selection hook. Always true for now; swap in cuts here.
fn keep_event(_row: &FlatRow) -> bool {
    true
}

pub fn cmd_plot(
    out_dir: &Path,
    inputs: &[PathBuf],
    cross_section: f64,
    lumi: f64,
    normalize_to_bin_width: bool,
) -> Result<()> {
    let existing = existing_files(inputs);
    if existing.is_empty() {
        anyhow::bail!("none of the {} row file(s) exist", inputs.len());
    }

    let mut rows: Vec<FlatRow> = Vec::new();
    for path in &existing {
        rows.extend(read_rows(path)?);
    }
    let n_total = rows.len();
    if n_total == 0 {
        anyhow::bail!("row files contain no rows");
    }
    tracing::info!("loaded {} file(s) with {n_total} rows", existing.len());

    // Per-event weight scaling the sample to the target luminosity.
    let weight = cross_section * lumi / n_total as f64;

    let mut registry = HistRegistry::new();
    book_default_hists(&mut registry).context("failed to book default histograms")?;
    let n_selected = fill_flat_rows(&mut registry, rows, weight, keep_event)
        .context("failed to fill histograms")?;
    tracing::info!(
        "selected {n_selected} events out of {n_total} ({:.1}%)",
        n_selected as f64 / n_total as f64 * 100.0
    );

    if normalize_to_bin_width {
        let names: Vec<String> = registry.iter().map(|h| h.name.clone()).collect();
        for name in names {
            registry.normalize_to_bin_width(&name).context("normalization failed")?;
        }
    }

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    for hist in registry.iter() {
        let artifact = HistArtifact::from_histogram(hist);
        let path = out_dir.join(format!("{}.json", hist.name));
        std::fs::write(&path, artifact.to_pretty_json()? + "\n")
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!("wrote {}", path.display());
    }

    eprintln!(
        "Filled {} histogram(s) from {n_selected}/{n_total} rows → {}",
        registry.len(),
        out_dir.display()
    );

    Ok(())
}
