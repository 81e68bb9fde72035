use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::SubmitError;

// ---------------------------------------------------------------------------
// Submission log entry (JSONL)
// ---------------------------------------------------------------------------

/// Which surface a submission came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Cli,
    Web,
}

impl Surface {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cli => "cli",
            Self::Web => "web",
        }
    }
}

/// A single entry in the submission log (`~/.bfhl/submit-log.jsonl`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitLogEntry {
    pub timestamp: String,
    pub surface: String,
    /// `"success"` or `"error"`.
    pub outcome: String,
    /// `"invalid_input"` or `"api"` for failed submissions.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error_kind: Option<String>,
    /// HTTP status of a rejected request.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<u16>,
    /// Length of the `data` array that was sent.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub item_count: Option<usize>,
    pub latency_ms: u64,
}

impl SubmitLogEntry {
    /// Build an entry stamped with the current time.
    pub fn new(
        surface: Surface,
        result: Result<(), &SubmitError>,
        item_count: Option<usize>,
        latency: Duration,
    ) -> Self {
        let (outcome, error_kind, status) = match result {
            Ok(()) => ("success", None, None),
            Err(err) => ("error", Some(err.kind().to_string()), err.status()),
        };

        Self {
            timestamp: Utc::now().to_rfc3339(),
            surface: surface.as_str().to_string(),
            outcome: outcome.to_string(),
            error_kind,
            status,
            item_count,
            latency_ms: latency.as_millis() as u64,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == "success"
    }
}

// ---------------------------------------------------------------------------
// Logging functions
// ---------------------------------------------------------------------------

/// Append a submission record to the default log. Failures are ignored so a
/// broken log never breaks a submit.
pub fn log_submission(
    surface: Surface,
    result: Result<(), &SubmitError>,
    item_count: Option<usize>,
    latency: Duration,
) {
    let Some(path) = submit_log_path() else {
        return;
    };
    let entry = SubmitLogEntry::new(surface, result, item_count, latency);
    let _ = append_log_entry(&path, &entry);
}

// ---------------------------------------------------------------------------
// Reading log entries
// ---------------------------------------------------------------------------

/// Read all entries from `~/.bfhl/submit-log.jsonl`.
pub fn read_all_entries() -> Vec<SubmitLogEntry> {
    submit_log_path()
        .map(|path| read_entries(&path))
        .unwrap_or_default()
}

/// Read entries from a log file, skipping malformed lines. Returns an empty
/// vec if the file does not exist or cannot be read.
pub fn read_entries(path: &Path) -> Vec<SubmitLogEntry> {
    let Ok(file) = fs::File::open(path) else {
        return Vec::new();
    };

    BufReader::new(file)
        .lines()
        .map_while(Result::ok)
        .filter_map(|line| serde_json::from_str::<SubmitLogEntry>(&line).ok())
        .collect()
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

pub fn append_log_entry(path: &Path, entry: &SubmitLogEntry) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(entry)?;
    writeln!(file, "{json}")?;

    Ok(())
}

/// Return the path to the submission log file.
pub fn submit_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".bfhl").join("submit-log.jsonl"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("bfhl-logger-{}-{name}", std::process::id()))
            .join("submit-log.jsonl")
    }

    #[test]
    fn success_entry_has_no_error_fields() {
        let entry = SubmitLogEntry::new(Surface::Cli, Ok(()), Some(6), Duration::from_millis(42));
        assert!(entry.is_success());
        assert_eq!(entry.surface, "cli");
        assert_eq!(entry.error_kind, None);
        assert_eq!(entry.latency_ms, 42);

        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("error_kind"));
        assert!(json.contains("\"item_count\":6"));
    }

    #[test]
    fn error_entry_records_kind_and_status() {
        let err = SubmitError::Api { status: 404 };
        let entry = SubmitLogEntry::new(Surface::Web, Err(&err), None, Duration::ZERO);
        assert!(!entry.is_success());
        assert_eq!(entry.error_kind.as_deref(), Some("api"));
        assert_eq!(entry.status, Some(404));
    }

    #[test]
    fn append_then_read_skips_garbage_lines() {
        let path = scratch_path("append");
        let _ = fs::remove_file(&path);

        let entry = SubmitLogEntry::new(Surface::Cli, Ok(()), Some(2), Duration::from_millis(5));
        append_log_entry(&path, &entry).unwrap();
        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file, "not json").unwrap();
        append_log_entry(&path, &entry).unwrap();

        let entries = read_entries(&path);
        assert_eq!(entries, vec![entry.clone(), entry]);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn missing_file_reads_empty() {
        assert!(read_entries(&scratch_path("missing")).is_empty());
    }
}
