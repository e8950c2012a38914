use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::warn;

use crate::models::HistoryEntry;
use crate::utils::validate_file_size;

const MAX_CONSECUTIVE_ERRORS: usize = 100;

/// Read the durable usage log
///
/// A missing file is an empty history. Malformed lines are logged and skipped;
/// returns an error if more than 50% of lines fail or 100 fail in a row.
pub fn read_history_file(path: &Path) -> Result<Vec<HistoryEntry>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to open history file: {}", path.display()));
        }
    };
    validate_file_size(&file, path)?;

    let reader = BufReader::new(file);
    let mut entries = Vec::new();
    let mut skipped_count = 0;
    let mut total_lines = 0;
    let mut consecutive_errors = 0;

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read line from history file")?;
        if line.trim().is_empty() {
            continue;
        }

        total_lines += 1;

        match serde_json::from_str::<HistoryEntry>(&line) {
            Ok(entry) => {
                entries.push(entry);
                consecutive_errors = 0;
            }
            Err(e) => {
                warn!("Skipping line {} in {}: {}", line_num + 1, path.display(), e);
                skipped_count += 1;
                consecutive_errors += 1;

                if consecutive_errors >= MAX_CONSECUTIVE_ERRORS {
                    bail!(
                        "Too many consecutive parse errors ({}) in history file - file may be corrupted",
                        consecutive_errors
                    );
                }
            }
        }
    }

    if total_lines > 0 {
        let failure_rate = (skipped_count as f64) / (total_lines as f64);
        if failure_rate > 0.5 {
            bail!(
                "Too many parse failures in history file: {} of {} lines failed ({:.1}%)",
                skipped_count,
                total_lines,
                failure_rate * 100.0
            );
        }
    }

    Ok(entries)
}
