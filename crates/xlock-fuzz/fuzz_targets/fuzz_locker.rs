#![no_main]
use libfuzzer_sys::fuzz_target;

use xlock_core::bitbuffer::get_bit;
use xlock_core::params::Params;
use xlock_core::{indexes, locker};

/// Builds a small `Params` from arbitrary bytes, locks a vault, then
/// unlocks it against the very same (noiseless) source and checks the
/// majority vote recovers the exact pool bits it started from — the
/// no-noise case of the vault's correctness property.
fuzz_target!(|data: &[u8]| {
    if data.len() < 24 {
        return;
    }

    let pool_bits = 8 + (data[0] % 24) as u32;
    let n_locks = 2 + (data[1] % 6) as u32;
    let n_xoration = 1 + (data[2] % 3) as u32;
    let source_bits = 256 + (u32::from(data[3]) * 16);

    let params = Params {
        source_bits,
        pool_bits,
        key_pre_bits: pool_bits,
        key_bits: 256,
        token_bytes: 32,
        n_locks,
        n_xoration,
    };

    let mut source = vec![0u8; params.source_bytes() as usize];
    for (i, b) in source.iter_mut().enumerate() {
        *b = data[(8 + i) % data.len()];
    }
    let mut pool = vec![0u8; params.pool_bytes() as usize];
    for (i, b) in pool.iter_mut().enumerate() {
        *b = data[(16 + i) % data.len()];
    }

    let mut source_seed = u64::from_le_bytes([
        data[4], data[5], data[6], data[7], data[4], data[5], data[6], data[7],
    ]) | 1;
    let mut source_indexes = vec![0u32; params.source_index_count() as usize];
    if indexes::generate(&mut source_seed, source_indexes.len(), &mut source_indexes, 0, params.source_bits, false)
        .is_err()
    {
        return;
    }

    let mut key_seed = source_seed ^ 0xdead_beef;
    let mut key_indexes = vec![0u32; params.key_pre_bits as usize];
    if indexes::generate(&mut key_seed, key_indexes.len(), &mut key_indexes, 0, params.pool_bits, false).is_err() {
        return;
    }

    let mut vault = vec![0u8; params.vault_bytes() as usize];
    locker::lock(&source, &source_indexes, &pool, &params, &mut vault);
    let key_pre = locker::unlock(&source, &source_indexes, &vault, &key_indexes, &params);

    for (i, &pool_bit_index) in key_indexes.iter().enumerate() {
        let expected = get_bit(&pool, pool_bit_index as usize);
        let actual = get_bit(&key_pre, i);
        assert_eq!(actual, expected, "noiseless unlock must recover the original pool bit");
    }
});
