//! JSONL structured logging for scenario runs.
//!
//! Trimmed to the fields a fuzzy-extractor conformance run actually
//! needs: a scenario name, pass/fail outcome, and free-form details —
//! no healing/decision fields, since nothing in this boundary ever
//! heals a bad call.

use serde::{Deserialize, Serialize};
use std::io::Write;

/// Severity of a single log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

/// Outcome of one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    Fail,
}

/// One JSONL record: a scenario's name, outcome, and free-form details
/// (e.g. measured error rate, elapsed milliseconds).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub seq: u64,
    pub level: LogLevel,
    pub scenario: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Writes [`LogEntry`] records as JSONL to any `Write` sink (a file, or
/// an in-memory buffer for tests).
pub struct LogEmitter {
    writer: Box<dyn Write>,
    seq: u64,
}

impl LogEmitter {
    /// Creates an emitter writing to the given path, truncating it.
    pub fn to_file(path: &std::path::Path) -> std::io::Result<Self> {
        let file = std::fs::File::create(path)?;
        Ok(Self {
            writer: Box::new(std::io::BufWriter::new(file)),
            seq: 0,
        })
    }

    /// Creates an emitter writing to stdout.
    #[must_use]
    pub fn to_stdout() -> Self {
        Self {
            writer: Box::new(std::io::stdout()),
            seq: 0,
        }
    }

    /// Emits one scenario result as a JSONL line.
    pub fn emit(
        &mut self,
        level: LogLevel,
        scenario: &str,
        outcome: Option<Outcome>,
        details: Option<serde_json::Value>,
    ) -> std::io::Result<()> {
        self.seq += 1;
        let entry = LogEntry {
            seq: self.seq,
            level,
            scenario: scenario.to_string(),
            outcome,
            details,
        };
        let line = serde_json::to_string(&entry).map_err(std::io::Error::other)?;
        writeln!(self.writer, "{line}")?;
        self.writer.flush()
    }
}
