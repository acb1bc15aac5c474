//! Conformance/property scenario harness for X-Lock.
//!
//! Runs a fixed set of end-to-end scenarios against `xlock-core` and
//! reports pass/fail, optionally as a JSONL structured log. This is
//! test/diagnostic tooling, not a benchmark driver or a production CLI.

#![forbid(unsafe_code)]

pub mod scenarios;
pub mod structured_log;

pub use scenarios::{ScenarioResult, run_all};
