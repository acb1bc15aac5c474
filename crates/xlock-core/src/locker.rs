//! The vault builder (`lock`) and majority-vote decoder (`unlock`):
//! the heart of the construction.

use crate::bitbuffer::{get_bit, get_bit_2d, get_u32_3d, set_bit_2d};
use crate::params::Params;

/// Builds the vault from `source`, `pool`, and the already-materialized
/// source-index stream.
///
/// For each pool bit `i` and lock `j`, XORs the pool bit with
/// `n_xoration` distinct source bits (consumed linearly from
/// `source_indexes`) and stores the result at vault cell `(i, j)`.
/// Because `source_indexes` was drawn without replacement, no source
/// bit is reused across the whole vault.
///
/// `source_indexes` must have exactly `pool_bits * n_locks * n_xoration`
/// entries, in that iteration order; `vault` must be
/// `params.vault_bytes()` bytes.
pub fn lock(source: &[u8], source_indexes: &[u32], pool: &[u8], params: &Params, vault: &mut [u8]) {
    let n_locks = params.n_locks as usize;
    let n_xoration = params.n_xoration as usize;

    let mut idx = 0usize;
    for i in 0..params.pool_bits as usize {
        let b = get_bit(pool, i);
        for j in 0..n_locks {
            let mut t = b;
            for _ in 0..n_xoration {
                let source_bit = get_bit(source, source_indexes[idx] as usize);
                t ^= source_bit;
                idx += 1;
            }
            set_bit_2d(vault, i, j, n_locks, t);
        }
    }
}

/// Recovers `key_pre_bits` pre-key bits from `vault` by majority vote
/// over each pool bit's `n_locks` lock cells.
///
/// `key_indexes` selects which pool bits become pre-key bits, in order;
/// its length is the pre-key length in bits. `source_indexes` is
/// re-interpreted as the same flat stream `lock` consumed, now indexed
/// three-dimensionally as `(pool_bit, lock, xoration)` with strides
/// `(n_locks * n_xoration, n_xoration)`.
///
/// Ties (`n_locks` even, count exactly `n_locks / 2`) resolve to `0` —
/// this exact tie-break policy must be preserved.
#[must_use]
pub fn unlock(
    source: &[u8],
    source_indexes: &[u32],
    vault: &[u8],
    key_indexes: &[u32],
    params: &Params,
) -> Vec<u8> {
    let n_locks = params.n_locks as usize;
    let n_xoration = params.n_xoration as usize;
    let di = n_locks * n_xoration;
    let mid = n_locks / 2;

    let mut key_pre = vec![0u8; params.key_pre_bytes() as usize];

    for (i, &i0) in key_indexes.iter().enumerate() {
        let i0 = i0 as usize;
        let mut count = 0usize;
        for j in 0..n_locks {
            let mut b = get_bit_2d(vault, i0, j, n_locks);
            for k in 0..n_xoration {
                let source_bit_index = get_u32_3d(source_indexes, i0, j, k, di, n_xoration);
                b ^= get_bit(source, source_bit_index as usize);
            }
            if b == 1 {
                count += 1;
            }
        }
        let bit = u8::from(count > mid);
        crate::bitbuffer::set_bit(&mut key_pre, i, bit);
    }

    key_pre
}
