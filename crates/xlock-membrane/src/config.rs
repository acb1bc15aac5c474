//! Ambient logging verbosity, read once from the environment and
//! cached for the rest of the process. There is no healing-level axis
//! here (quiet/hardened/off) — only a verbosity knob for
//! `xlock-harness`'s structured logger, since this workspace's
//! boundary never silently corrects a bad call.

use std::sync::OnceLock;

/// How much detail `xlock-harness` should log per scenario.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogVerbosity {
    /// Suppress everything but failures.
    Quiet,
    /// One line per scenario.
    #[default]
    Normal,
    /// Per-step detail (index materialization, unlock, token check).
    Verbose,
}

impl LogVerbosity {
    /// Parses a verbosity name case-insensitively, defaulting to
    /// [`LogVerbosity::Normal`] on anything unrecognized.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "silent" => Self::Quiet,
            "verbose" | "debug" => Self::Verbose,
            _ => Self::Normal,
        }
    }
}

static GLOBAL_VERBOSITY: OnceLock<LogVerbosity> = OnceLock::new();

/// Returns the configured log verbosity, reading the `XLOCK_LOG`
/// environment variable on first call and caching the result for the
/// life of the process.
#[must_use]
pub fn log_verbosity() -> LogVerbosity {
    *GLOBAL_VERBOSITY.get_or_init(|| {
        std::env::var("XLOCK_LOG")
            .map(|v| LogVerbosity::from_str_loose(&v))
            .unwrap_or_default()
    })
}
