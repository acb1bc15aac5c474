//! Boundary validation errors.

use thiserror::Error;

/// A buffer handed to the ABI boundary does not match the size its
/// accompanying parameters imply.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MembraneError {
    /// `source` buffer too small for `source_bits`.
    #[error("source buffer is {actual} bytes, expected at least {expected}")]
    SourceTooSmall { expected: u32, actual: usize },
    /// `pool` buffer too small for `pool_bits`.
    #[error("pool buffer is {actual} bytes, expected at least {expected}")]
    PoolTooSmall { expected: u32, actual: usize },
    /// `vault` buffer too small for `pool_bits * n_locks` bits.
    #[error("vault buffer is {actual} bytes, expected at least {expected}")]
    VaultTooSmall { expected: u32, actual: usize },
    /// `key` buffer too small for `key_bits`.
    #[error("key buffer is {actual} bytes, expected at least {expected}")]
    KeyTooSmall { expected: u32, actual: usize },
    /// `token` buffer too small for `token_bytes`.
    #[error("token buffer is {actual} bytes, expected at least {expected}")]
    TokenTooSmall { expected: u32, actual: usize },
    /// The parameters themselves violate a size or ordering invariant.
    #[error(transparent)]
    InvalidParams(#[from] xlock_core::ParamError),
}
