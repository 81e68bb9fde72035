//! Submission history aggregation for `bfhl history`.

use crate::analytics::logger::{self, SubmitLogEntry};

/// Summary of the submission log.
#[derive(Debug, Default)]
pub struct History {
    pub total: usize,
    pub successes: usize,
    pub invalid_input: usize,
    pub api_errors: usize,
    pub avg_latency_ms: u64,
    /// Most recent entries, newest first.
    pub recent: Vec<SubmitLogEntry>,
}

impl History {
    /// Percentage of successful submissions, 0.0 for an empty log.
    pub fn success_pct(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.successes as f64 / self.total as f64) * 100.0
        }
    }
}

/// Summarize the default submission log, keeping the last `limit` entries.
pub fn compute_history(limit: usize) -> History {
    build_history(&logger::read_all_entries(), limit)
}

pub fn build_history(entries: &[SubmitLogEntry], limit: usize) -> History {
    if entries.is_empty() {
        return History::default();
    }

    let total = entries.len();
    let successes = entries.iter().filter(|e| e.is_success()).count();
    let kind_count = |kind: &str| {
        entries
            .iter()
            .filter(|e| e.error_kind.as_deref() == Some(kind))
            .count()
    };
    let latency_sum: u64 = entries.iter().map(|e| e.latency_ms).sum();

    History {
        total,
        successes,
        invalid_input: kind_count("invalid_input"),
        api_errors: kind_count("api"),
        avg_latency_ms: latency_sum / total as u64,
        recent: entries.iter().rev().take(limit).cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(outcome: &str, kind: Option<&str>, latency_ms: u64) -> SubmitLogEntry {
        SubmitLogEntry {
            timestamp: "2026-10-01T12:00:00+00:00".to_string(),
            surface: "cli".to_string(),
            outcome: outcome.to_string(),
            error_kind: kind.map(str::to_string),
            status: None,
            item_count: Some(3),
            latency_ms,
        }
    }

    #[test]
    fn history_counts_outcomes() {
        let entries = vec![
            entry("success", None, 100),
            entry("error", Some("invalid_input"), 0),
            entry("error", Some("api"), 200),
            entry("success", None, 300),
        ];
        let history = build_history(&entries, 10);
        assert_eq!(history.total, 4);
        assert_eq!(history.successes, 2);
        assert_eq!(history.invalid_input, 1);
        assert_eq!(history.api_errors, 1);
        assert_eq!(history.avg_latency_ms, 150);
        assert!((history.success_pct() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn recent_is_newest_first_and_limited() {
        let entries = vec![
            entry("success", None, 1),
            entry("success", None, 2),
            entry("success", None, 3),
        ];
        let history = build_history(&entries, 2);
        let latencies: Vec<u64> = history.recent.iter().map(|e| e.latency_ms).collect();
        assert_eq!(latencies, vec![3, 2]);
    }

    #[test]
    fn empty_log_is_all_zero() {
        let history = build_history(&[], 5);
        assert_eq!(history.total, 0);
        assert!(history.recent.is_empty());
        assert_eq!(history.success_pct(), 0.0);
    }
}
