//! Drives the `extern "C"` surface the way a C caller would: raw
//! pointers into plain `Vec<u8>`/`Vec<u32>` buffers, sized exactly per
//! `xlock.h`'s contract, no `xlock-core` types in sight.

use xlock_abi::{XLOCK_ERR_INVALID_PARAMS, XLOCK_ERR_NULL_POINTER, XLOCK_OK, XLOCK_REP_FAILED};
use xlock_core::params::bits_to_bytes;

struct TinyParams {
    source_bits: u32,
    pool_bits: u32,
    key_pre_bits: u32,
    key_bits: u32,
    token_bytes: u32,
    n_locks: u32,
    n_xoration: u32,
}

const PARAMS: TinyParams = TinyParams {
    source_bits: 4096,
    pool_bits: 64,
    key_pre_bits: 20,
    key_bits: 256,
    token_bytes: 32,
    n_locks: 16,
    n_xoration: 2,
};

#[test]
fn trivial_reproduction_through_the_c_surface() {
    let p = &PARAMS;
    let mut source = vec![0u8; bits_to_bytes(p.source_bits) as usize];
    let mut pool = vec![0u8; bits_to_bytes(p.pool_bits) as usize];
    let mut vault = vec![0u8; bits_to_bytes(p.pool_bits * p.n_locks) as usize];
    let mut key_gen = vec![0u8; bits_to_bytes(p.key_bits) as usize];
    let mut key_rep = vec![0u8; bits_to_bytes(p.key_bits) as usize];
    let mut token_gen = vec![0u8; p.token_bytes as usize];
    let mut source_seed: u64 = 0x0001;
    let mut pool_seed_source_seed = source_seed;
    let mut key_seed: u64 = 0x0002;
    let mut nonce: u64 = 0;

    let status = unsafe {
        xlock_abi::init(
            source.as_mut_ptr(),
            &mut pool_seed_source_seed,
            p.source_bits,
            bits_to_bytes(p.source_bits),
            pool.as_mut_ptr(),
            p.pool_bits,
            bits_to_bytes(p.pool_bits),
            vault.as_mut_ptr(),
            p.n_locks,
            p.n_xoration,
        )
    };
    assert_eq!(status, XLOCK_OK);
    source_seed = pool_seed_source_seed;

    let gen_elapsed_ms = unsafe {
        xlock_abi::gen(
            source.as_ptr(),
            &mut source_seed,
            p.source_bits,
            vault.as_ptr(),
            key_gen.as_mut_ptr(),
            &mut key_seed,
            p.key_bits,
            p.key_pre_bits,
            &mut nonce,
            token_gen.as_mut_ptr(),
            p.token_bytes,
            p.pool_bits,
            p.n_locks,
            p.n_xoration,
        )
    };
    assert!(gen_elapsed_ms >= 0.0, "gen should succeed: {gen_elapsed_ms}");

    let mut rep_source_seed = source_seed;
    let mut rep_key_seed = key_seed;
    let rep_elapsed_ms = unsafe {
        xlock_abi::rep(
            source.as_ptr(),
            &mut rep_source_seed,
            p.source_bits,
            vault.as_ptr(),
            key_rep.as_mut_ptr(),
            &mut rep_key_seed,
            p.key_bits,
            p.key_pre_bits,
            &mut nonce,
            token_gen.as_ptr(),
            p.token_bytes,
            p.pool_bits,
            p.n_locks,
            p.n_xoration,
        )
    };
    assert!(rep_elapsed_ms >= 0.0, "rep should succeed: {rep_elapsed_ms}");
    assert_eq!(key_gen, key_rep);
}

#[test]
fn rep_mismatch_zeroes_the_callers_key_buffer() {
    let p = &PARAMS;
    let mut source = vec![0u8; bits_to_bytes(p.source_bits) as usize];
    let mut pool = vec![0u8; bits_to_bytes(p.pool_bits) as usize];
    let mut vault = vec![0u8; bits_to_bytes(p.pool_bits * p.n_locks) as usize];
    let mut key_gen = vec![0u8; bits_to_bytes(p.key_bits) as usize];
    let mut key_rep = vec![0xAAu8; bits_to_bytes(p.key_bits) as usize];
    let mut token_gen = vec![0u8; p.token_bytes as usize];
    let mut source_seed: u64 = 7;
    let mut key_seed: u64 = 8;
    let mut nonce: u64 = 0;

    let status = unsafe {
        xlock_abi::init(
            source.as_mut_ptr(),
            &mut source_seed,
            p.source_bits,
            bits_to_bytes(p.source_bits),
            pool.as_mut_ptr(),
            p.pool_bits,
            bits_to_bytes(p.pool_bits),
            vault.as_mut_ptr(),
            p.n_locks,
            p.n_xoration,
        )
    };
    assert_eq!(status, XLOCK_OK);

    unsafe {
        xlock_abi::gen(
            source.as_ptr(),
            &mut source_seed,
            p.source_bits,
            vault.as_ptr(),
            key_gen.as_mut_ptr(),
            &mut key_seed,
            p.key_bits,
            p.key_pre_bits,
            &mut nonce,
            token_gen.as_mut_ptr(),
            p.token_bytes,
            p.pool_bits,
            p.n_locks,
            p.n_xoration,
        )
    };

    // Perturb the vault by a single bit between gen and rep.
    vault[0] ^= 1;

    let mut rep_source_seed = source_seed;
    let mut rep_key_seed = key_seed;
    let rep_result = unsafe {
        xlock_abi::rep(
            source.as_ptr(),
            &mut rep_source_seed,
            p.source_bits,
            vault.as_ptr(),
            key_rep.as_mut_ptr(),
            &mut rep_key_seed,
            p.key_bits,
            p.key_pre_bits,
            &mut nonce,
            token_gen.as_ptr(),
            p.token_bytes,
            p.pool_bits,
            p.n_locks,
            p.n_xoration,
        )
    };

    assert_eq!(rep_result, XLOCK_REP_FAILED);
    assert!(key_rep.iter().all(|&b| b == 0), "key buffer must be zeroed");
}

#[test]
fn gen_rejects_undersized_token_buffer_before_touching_core() {
    let p = &PARAMS;
    let source = vec![0u8; bits_to_bytes(p.source_bits) as usize];
    let vault = vec![0u8; bits_to_bytes(p.pool_bits * p.n_locks) as usize];
    let mut key = vec![0u8; bits_to_bytes(p.key_bits) as usize];
    let mut token = vec![0u8; (p.token_bytes - 1) as usize]; // undersized
    let mut source_seed: u64 = 1;
    let mut key_seed: u64 = 1;
    let mut nonce: u64 = 0;

    let result = unsafe {
        xlock_abi::gen(
            source.as_ptr(),
            &mut source_seed,
            p.source_bits,
            vault.as_ptr(),
            key.as_mut_ptr(),
            &mut key_seed,
            p.key_bits,
            p.key_pre_bits,
            &mut nonce,
            token.as_mut_ptr(),
            p.token_bytes,
            p.pool_bits,
            p.n_locks,
            p.n_xoration,
        )
    };
    assert_eq!(result, xlock_abi::XLOCK_INVALID);
}

#[test]
fn lock_rejects_null_source() {
    let status = unsafe {
        xlock_abi::lock(
            std::ptr::null(),
            [0u32; 4].as_ptr(),
            [0u8; 4].as_ptr(),
            8,
            2,
            2,
            [0u8; 4].as_mut_ptr(),
        )
    };
    assert_eq!(status, XLOCK_ERR_NULL_POINTER);
}

#[test]
fn lock_rejects_zero_n_xoration() {
    let source = vec![0u8; 64];
    let pool = vec![0u8; 8];
    let mut vault = vec![0u8; 8];
    let indexes = vec![0u32; 16];
    let status = unsafe {
        xlock_abi::lock(
            source.as_ptr(),
            indexes.as_ptr(),
            pool.as_ptr(),
            64,
            8,
            0,
            vault.as_mut_ptr(),
        )
    };
    assert_eq!(status, XLOCK_ERR_INVALID_PARAMS);
}

#[test]
fn unlock_rejects_null_source() {
    let vault = vec![0u8; 8];
    let key_indexes = vec![0u32; 4];
    let mut key = vec![0u8; 1];
    let status = unsafe {
        xlock_abi::unlock(
            std::ptr::null(),
            [0u32; 4].as_ptr(),
            vault.as_ptr(),
            key.as_mut_ptr(),
            key_indexes.as_ptr(),
            4,
            2,
            2,
        )
    };
    assert_eq!(status, XLOCK_ERR_NULL_POINTER);
}

#[test]
fn unlock_rejects_zero_n_locks() {
    let source = vec![0u8; 64];
    let vault = vec![0u8; 8];
    let source_indexes = vec![0u32; 16];
    let key_indexes = vec![0u32; 4];
    let mut key = vec![0u8; 1];
    let status = unsafe {
        xlock_abi::unlock(
            source.as_ptr(),
            source_indexes.as_ptr(),
            vault.as_ptr(),
            key.as_mut_ptr(),
            key_indexes.as_ptr(),
            4,
            0,
            2,
        )
    };
    assert_eq!(status, XLOCK_ERR_INVALID_PARAMS);
}

#[test]
fn unlock_goes_through_the_membrane_and_rejects_degenerate_key_indexes() {
    // Every key index is 0, so the inferred `pool_bits` (derived from the
    // largest referenced index, per `unlock`'s doc comment) is 1, while
    // `key_pre_bits` is 4 — `Params::validate`'s `pool_bits >=
    // key_pre_bits` invariant is violated, and `xlock-membrane` must
    // catch it before `xlock-core` ever sees these buffers. `n_locks` and
    // `n_xoration` are both 1 so the index count the invariant compares
    // against (`pool_bits * n_locks * n_xoration`) stays small enough
    // that `source_bits` isn't what trips first.
    let source = vec![0u8; 64];
    let vault = vec![0u8; 8];
    let source_indexes = vec![0u32; 4];
    let key_indexes = vec![0u32; 4];
    let mut key = vec![0u8; 1];
    let status = unsafe {
        xlock_abi::unlock(
            source.as_ptr(),
            source_indexes.as_ptr(),
            vault.as_ptr(),
            key.as_mut_ptr(),
            key_indexes.as_ptr(),
            4,
            1,
            1,
        )
    };
    assert_eq!(status, XLOCK_ERR_INVALID_PARAMS);
}

#[test]
fn get_bit_round_trips_with_core() {
    let mut buf = vec![0u8; 4];
    xlock_core::bitbuffer::set_bit(&mut buf, 9, 1);
    assert_eq!(unsafe { xlock_abi::get_bit(buf.as_ptr(), 9) }, 1);
    assert_eq!(unsafe { xlock_abi::get_bit(buf.as_ptr(), 8) }, 0);
}
