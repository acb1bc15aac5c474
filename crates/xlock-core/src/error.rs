//! Typed error surface for the core.
//!
//! Every primitive that can fail returns one of these instead of a
//! negative sentinel or a null pointer: errors are surfaced to the
//! caller at the boundary of each primitive, with no silent correction.

use thiserror::Error;

/// Failure conditions for [`crate::indexes::generate`].
///
/// Mirrors the four boundary conditions a debug-gated C implementation
/// would assert on, promoted here to always-checked typed errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    /// `size < 1`.
    #[error("requested index count {0} is less than 1")]
    SizeTooSmall(usize),
    /// `high <= low`.
    #[error("range is empty: low={low} >= high={high}")]
    EmptyRange { low: u32, high: u32 },
    /// `!replacement && high - low < size`.
    #[error(
        "range [{low}, {high}) has only {available} values, cannot draw {requested} without replacement"
    )]
    RangeTooSmallForNoReplacement {
        low: u32,
        high: u32,
        available: u32,
        requested: usize,
    },
    /// The output slice does not have room for `size` values — the Rust
    /// analogue of the C API's null-output-pointer check.
    #[error("output slice has length {actual}, need {expected}")]
    OutputTooSmall { expected: usize, actual: usize },
}

/// Invariant violations in a [`crate::params::Params`] value. Catastrophic
/// invariants like these must be checked before Gen/Rep proceed, not
/// discovered mid-computation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamError {
    /// `source_bits < pool_bits * n_locks * n_xoration`.
    #[error(
        "source_bits ({source_bits}) is too small to draw {needed} indexes without replacement"
    )]
    SourceTooSmall { source_bits: u32, needed: u64 },
    /// `pool_bits < key_pre_bits`.
    #[error("pool_bits ({pool_bits}) is smaller than key_pre_bits ({key_pre_bits})")]
    PoolTooSmall { pool_bits: u32, key_pre_bits: u32 },
    /// `n_xoration == 0`.
    #[error("n_xoration must be at least 1")]
    ZeroXoration,
    /// `n_locks == 0`.
    #[error("n_locks must be at least 1")]
    ZeroLocks,
}

/// Outcome of [`crate::extractor::rep`]: a recovered key, or an explicit
/// failure signal distinct from any error type above — this is not an
/// error, it is the defined "token did not verify" outcome of a
/// reproduction attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepOutcome {
    /// Reproduction succeeded; carries the recovered key.
    Key(Vec<u8>),
    /// The robustness token did not verify. The caller's key buffer
    /// contract is satisfied by `Key`'s absence here — callers that
    /// need a zeroed buffer should write `vec![0u8; key_bytes]`
    /// themselves, which is exactly what `xlock-abi` does to match the
    /// C ABI's "zero the caller's buffer" contract.
    Failed,
}

impl RepOutcome {
    /// Returns the recovered key, or `None` on reproduction failure.
    pub fn into_key(self) -> Option<Vec<u8>> {
        match self {
            RepOutcome::Key(k) => Some(k),
            RepOutcome::Failed => None,
        }
    }

    /// Returns `true` if reproduction succeeded.
    pub fn is_ok(&self) -> bool {
        matches!(self, RepOutcome::Key(_))
    }
}
