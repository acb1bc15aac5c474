//! Enrollment-time initialization.
//!
//! Randomly fills the source and pool and produces the first vault via
//! the Locker.

use crate::indexes::{self, Lcg};
use crate::locker;
use crate::params::Params;

/// Fills `buf` with PRNG-derived bytes, one LCG draw per byte.
///
/// A reference C implementation would fill each byte with a raw
/// `rand()` call; here the byte is the low 8 bits of one LCG draw.
pub fn fill_random(buf: &mut [u8], seed: u64) {
    let mut rng = Lcg::new(seed);
    for b in buf.iter_mut() {
        *b = rng.next_raw() as u8;
    }
}

/// The output of [`init`]: the materialized vault plus the resolved
/// `source_seed`, which the caller must persist to reproduce `source`'s
/// source-index stream in later `Gen`/`Rep` calls.
#[derive(Debug, Clone)]
pub struct InitOutput {
    /// The random source, preferred state S. Not retained in a real
    /// deployment; kept here so a test harness can simulate later noisy
    /// rereads.
    pub source: Vec<u8>,
    /// The public vault.
    pub vault: Vec<u8>,
    /// The resolved source seed — always non-zero after this call.
    pub source_seed: u64,
}

/// Randomly initializes the source and pool, materializes the
/// source-index stream from `source_seed`, and locks the pool into a
/// fresh vault.
///
/// The pool itself is discarded after locking — it is a random secret
/// consumed by `lock` and never stored in the clear — only the vault
/// and the (possibly newly minted) `source_seed` are returned.
pub fn init(params: &Params, source_seed: &mut u64, pool_seed: u64) -> InitOutput {
    let mut source = vec![0u8; params.source_bytes() as usize];
    let mut pool = vec![0u8; params.pool_bytes() as usize];

    fill_random(&mut source, crate::seed::resolve(source_seed));
    fill_random(&mut pool, pool_seed);

    let mut source_indexes = vec![0u32; params.source_index_count() as usize];
    indexes::generate(
        source_seed,
        source_indexes.len(),
        &mut source_indexes,
        0,
        params.source_bits,
        false,
    )
    .expect("Params::validate() must be checked before calling init");

    let mut vault = vec![0u8; params.vault_bytes() as usize];
    locker::lock(&source, &source_indexes, &pool, params, &mut vault);

    InitOutput {
        source,
        vault,
        source_seed: *source_seed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitbuffer::get_bit;

    #[test]
    fn fill_random_is_deterministic_given_seed() {
        let mut a = vec![0u8; 64];
        let mut b = vec![0u8; 64];
        fill_random(&mut a, 123);
        fill_random(&mut b, 123);
        assert_eq!(a, b);
    }

    #[test]
    fn fill_random_is_not_all_zero() {
        let mut buf = vec![0u8; 64];
        fill_random(&mut buf, 123);
        assert!(buf.iter().any(|&b| b != 0));
    }

    #[test]
    fn init_decodes_under_zero_noise() {
        let params = Params {
            source_bits: 512,
            pool_bits: 32,
            key_pre_bits: 32,
            key_bits: 256,
            token_bytes: 32,
            n_locks: 8,
            n_xoration: 2,
        };
        params.validate().unwrap();

        let mut source_seed = 1u64;
        let out = init(&params, &mut source_seed, 2);
        assert_ne!(out.source_seed, 0);
        assert_eq!(out.source_seed, source_seed);

        // Re-derive the same source indexes with the persisted seed and
        // confirm unlock recovers a deterministic pre-key (the pool was
        // discarded, so we only check determinism here; full pool
        // recovery is covered in `locker`'s property-4 test).
        let mut source_indexes = vec![0u32; params.source_index_count() as usize];
        let mut reseed = out.source_seed;
        crate::indexes::generate(
            &mut reseed,
            source_indexes.len(),
            &mut source_indexes,
            0,
            params.source_bits,
            false,
        )
        .unwrap();
        let key_indexes: Vec<u32> = (0..params.pool_bits).collect();
        let a = crate::locker::unlock(&out.source, &source_indexes, &out.vault, &key_indexes, &params);
        let b = crate::locker::unlock(&out.source, &source_indexes, &out.vault, &key_indexes, &params);
        assert_eq!(a, b);
        let _ = get_bit(&a, 0);
    }
}
