//! Submission log: one JSONL record per submit, plus the aggregation behind
//! `bfhl history`.

pub mod logger;
pub mod reporter;
