use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

use crate::models::HistoryEntry;

/// File name of the usage log inside the data directory
pub const HISTORY_FILENAME: &str = "chat_history.json";

/// Append-only usage log
///
/// Entries live in memory for the lifetime of the process and are mirrored
/// line by line to the log file. The file is never read back here; a new
/// process starts with an empty in-memory history (see
/// [`read_history_file`](super::read_history_file) for the full record).
#[derive(Debug, Default)]
pub struct HistoryLog {
    path: Option<PathBuf>,
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    /// Log mirrored to the JSONL file at `path`
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self { path: Some(path.into()), entries: Vec::new() }
    }

    /// Log kept only in memory
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Record a use of `response` stamped with the current local time
    ///
    /// The entry is always kept in memory. An error means only the file
    /// append failed.
    pub fn record(&mut self, context: &str, response: &str) -> Result<&HistoryEntry> {
        self.record_at(Local::now(), context, response)
    }

    pub fn record_at(
        &mut self,
        at: DateTime<Local>,
        context: &str,
        response: &str,
    ) -> Result<&HistoryEntry> {
        let entry = HistoryEntry::new(at, context, response);
        let appended = match &self.path {
            Some(path) => append_entry(path, &entry),
            None => Ok(()),
        };
        self.entries.push(entry);
        appended?;

        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Up to the last `n` entries, most recent first
    pub fn recent(&self, n: usize) -> Vec<&HistoryEntry> {
        self.entries.iter().rev().take(n).collect()
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Append one JSON line to the log file, creating it (and its directory) on first use
fn append_entry(path: &Path, entry: &HistoryEntry) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut line = serde_json::to_string(entry).context("Failed to serialize history entry")?;
    line.push('\n');

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open history file: {}", path.display()))?;
    file.write_all(line.as_bytes())
        .with_context(|| format!("Failed to append to history file: {}", path.display()))?;

    Ok(())
}
