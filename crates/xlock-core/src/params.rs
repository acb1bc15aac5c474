//! Construction parameters, shared by every operation in this crate.
//!
//! Every field is unsigned; constraints are checked by
//! [`Params::validate`], not re-derived piecemeal by each primitive.

use crate::error::ParamError;

/// All sizes that determine the shape of a vault and its key.
///
/// Byte-size helpers (`source_bytes`, `pool_bytes`, `vault_bytes`,
/// `key_bytes`) are derived, not stored, so they can never drift from
/// the bit counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    /// Length of the source in bits.
    pub source_bits: u32,
    /// Length of the pool in bits.
    pub pool_bits: u32,
    /// Length of the pre-key in bits.
    pub key_pre_bits: u32,
    /// Length of the final key in bits.
    pub key_bits: u32,
    /// Length of the robustness token in bytes.
    pub token_bytes: u32,
    /// Replication factor per pool bit.
    pub n_locks: u32,
    /// Source bits XORed into each lock cell.
    pub n_xoration: u32,
}

/// Smallest integer greater than or equal to `bits / 8`.
///
/// The usual `CEIL`-style bit-to-byte rounding macro, spelled as a
/// function.
#[inline]
#[must_use]
pub const fn bits_to_bytes(bits: u32) -> u32 {
    bits.div_ceil(8)
}

impl Params {
    /// The reference parameter set used by property tests and the
    /// harness scenarios.
    #[must_use]
    pub const fn reference() -> Self {
        Params {
            source_bits: 64032,
            pool_bits: 256,
            key_pre_bits: 80,
            key_bits: 256,
            token_bytes: 32,
            n_locks: 64,
            n_xoration: 2,
        }
    }

    /// Number of source indexes consumed by one full vault: `pool_bits *
    /// n_locks * n_xoration`.
    #[must_use]
    pub fn source_index_count(&self) -> u64 {
        u64::from(self.pool_bits) * u64::from(self.n_locks) * u64::from(self.n_xoration)
    }

    /// Size of the vault in bytes: `ceil(pool_bits * n_locks / 8)`.
    #[must_use]
    pub fn vault_bytes(&self) -> u32 {
        bits_to_bytes(self.pool_bits * self.n_locks)
    }

    /// Size of the source in bytes.
    #[must_use]
    pub fn source_bytes(&self) -> u32 {
        bits_to_bytes(self.source_bits)
    }

    /// Size of the pool in bytes.
    #[must_use]
    pub fn pool_bytes(&self) -> u32 {
        bits_to_bytes(self.pool_bits)
    }

    /// Size of the pre-key in bytes.
    #[must_use]
    pub fn key_pre_bytes(&self) -> u32 {
        bits_to_bytes(self.key_pre_bits)
    }

    /// Size of the final key in bytes.
    #[must_use]
    pub fn key_bytes(&self) -> u32 {
        bits_to_bytes(self.key_bits)
    }

    /// Checks the construction invariants:
    /// - `source_bits >= pool_bits * n_locks * n_xoration`
    /// - `pool_bits >= key_pre_bits`
    /// - `n_locks >= 1`
    /// - `n_xoration >= 1`
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.n_xoration == 0 {
            return Err(ParamError::ZeroXoration);
        }
        if self.n_locks == 0 {
            return Err(ParamError::ZeroLocks);
        }
        let needed = self.source_index_count();
        if u64::from(self.source_bits) < needed {
            return Err(ParamError::SourceTooSmall {
                source_bits: self.source_bits,
                needed,
            });
        }
        if self.pool_bits < self.key_pre_bits {
            return Err(ParamError::PoolTooSmall {
                pool_bits: self.pool_bits,
                key_pre_bits: self.key_pre_bits,
            });
        }
        Ok(())
    }
}
