//! JSONL event/row sources with skip-if-missing validation.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use gf_core::FlatRow;
use gf_event::EventRecord;

/// Keep only inputs that exist as regular files; log and drop the rest.
///
/// A missing input is non-fatal per file: the pipeline proceeds with
/// whatever remains, mirroring the batch resubmission model.
pub fn existing_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    paths
        .iter()
        .filter(|p| {
            let exists = p.is_file();
            if !exists {
                tracing::warn!("input file does not exist, skipping: {}", p.display());
            }
            exists
        })
        .cloned()
        .collect()
}

/// Streaming reader over one JSONL event file.
pub struct EventReader {
    lines: Lines<BufReader<File>>,
    path: PathBuf,
    line_no: usize,
}

impl EventReader {
    /// Open an event file for streaming.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open event file {}", path.display()))?;
        Ok(Self { lines: BufReader::new(file).lines(), path: path.to_path_buf(), line_no: 0 })
    }
}

impl Iterator for EventReader {
    type Item = Result<EventRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line_no += 1;
            match self.lines.next()? {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    return Some(serde_json::from_str(&line).with_context(|| {
                        format!("bad event at {}:{}", self.path.display(), self.line_no)
                    }));
                }
                Err(e) => {
                    return Some(Err(e).with_context(|| {
                        format!("read error at {}:{}", self.path.display(), self.line_no)
                    }))
                }
            }
        }
    }
}

/// Read all rows from one JSONL row file.
pub fn read_rows(path: &Path) -> Result<Vec<FlatRow>> {
    let file =
        File::open(path).with_context(|| format!("failed to open row file {}", path.display()))?;
    let mut rows = Vec::new();
    for (i, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("read error at {}:{}", path.display(), i + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        rows.push(
            serde_json::from_str(&line)
                .with_context(|| format!("bad row at {}:{}", path.display(), i + 1))?,
        );
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn tmp_file(name: &str, contents: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("genflat_source_{}_{}", std::process::id(), name));
        let mut f = File::create(&p).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        p
    }

    #[test]
    fn missing_files_are_dropped() {
        let present = tmp_file("present.jsonl", "");
        let missing = PathBuf::from("/nonexistent/genflat/events.jsonl");
        let kept = existing_files(&[present.clone(), missing]);
        assert_eq!(kept, vec![present.clone()]);
        std::fs::remove_file(present).unwrap();
    }

    #[test]
    fn event_reader_streams_and_skips_blank_lines() {
        let path = tmp_file(
            "events.jsonl",
            concat!(
                r#"{"index":0,"particles":[]}"#,
                "\n\n",
                r#"{"index":1,"particles":[{"pdg_id":15,"px":1.0,"py":0.0,"pz":0.0,"e":1.0}]}"#,
                "\n"
            ),
        );
        let events: Vec<EventRecord> =
            EventReader::open(&path).unwrap().collect::<Result<_>>().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].index, 1);
        assert_eq!(events[1].particles.len(), 1);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn event_reader_reports_file_and_line_on_bad_json() {
        let path = tmp_file("bad.jsonl", "{not json}\n");
        let err = EventReader::open(&path).unwrap().next().unwrap().unwrap_err();
        assert!(format!("{err:#}").contains(":1"));
        std::fs::remove_file(path).unwrap();
    }
}
