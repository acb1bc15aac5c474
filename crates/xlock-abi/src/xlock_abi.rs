//! `extern "C"` boundary for the C-callable `xlock.h` surface: every
//! symbol below has the same name and parameter order a C caller would
//! expect, widened only where Rust needs an explicit result instead of
//! a bare "return 0 or silently misbehave" convention — callers get an
//! explicit result value distinguishing `Ok(elapsed_ms)` from a typed
//! parameter error.
//!
//! Every entry point here is `C caller -> ABI entry (this module) ->
//! xlock-membrane validation -> xlock-core`. Raw pointers are trusted
//! to describe buffers at least as long as the accompanying scalar
//! parameters imply; `xlock-membrane` checks everything that is
//! *derivable* from those parameters before a slice is built over the
//! pointer, but `lock` and `unlock` take no `source_bits` parameter, so
//! the `source` pointer's bounds can never be checked here — that's a
//! property of the interface's shape, not an oversight.

use std::os::raw::{c_float, c_int, c_uint};
use std::slice;

use xlock_core::{HmacSha256Prf, Params, RepOutcome};
use xlock_membrane::error::MembraneError;
use xlock_membrane::validate;

/// Status codes returned by the `c_int`-returning entry points below.
/// Zero is success; every nonzero value is a parameter/boundary
/// rejection, and rejection never comes with a partial write — no
/// buffer is touched on an error path.
pub const XLOCK_OK: c_int = 0;
pub const XLOCK_ERR_INVALID_PARAMS: c_int = -1;
pub const XLOCK_ERR_BUFFER_TOO_SMALL: c_int = -2;
pub const XLOCK_ERR_NULL_POINTER: c_int = -3;

/// Sentinel `rep`/`gen` return values distinguishing a boundary
/// rejection (never reaches `xlock-core`) from `gen`'s success case and
/// from `rep`'s "token did not verify" outcome. A plain "either 0 or
/// the time in milliseconds" contract would make 0.0 ambiguous with a
/// legitimately-fast call, so negative sentinels carry the distinct
/// failure kinds the core always returns as typed values.
pub const XLOCK_REP_FAILED: f64 = -2.0;
pub const XLOCK_INVALID: f64 = -1.0;

fn status_of(err: &MembraneError) -> c_int {
    match err {
        MembraneError::InvalidParams(_) => XLOCK_ERR_INVALID_PARAMS,
        _ => XLOCK_ERR_BUFFER_TOO_SMALL,
    }
}

/// # Safety
/// `b` must point to at least `(i / 8) + 1` readable bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn get_bit(b: *const u8, i: c_int) -> u8 {
    if b.is_null() || i < 0 {
        return 0;
    }
    let byte_len = (i as usize) / 8 + 1;
    let buf = unsafe { slice::from_raw_parts(b, byte_len) };
    xlock_core::bitbuffer::get_bit(buf, i as usize)
}

/// # Safety
/// `b` must point to at least `size` writable bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn init_random(b: *mut u8, size: c_int) -> c_int {
    if b.is_null() || size < 0 {
        return XLOCK_ERR_NULL_POINTER;
    }
    let buf = unsafe { slice::from_raw_parts_mut(b, size as usize) };
    xlock_core::init::fill_random(buf, xlock_core::seed::fresh_seed());
    XLOCK_OK
}

/// # Safety
/// `b` and `out` must each point to at least `size` bytes, readable and
/// writable respectively.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn change_random(
    b: *const u8,
    out: *mut u8,
    size: c_int,
    e_abs: c_float,
) -> c_int {
    if b.is_null() || out.is_null() || size < 0 {
        return XLOCK_ERR_NULL_POINTER;
    }
    let src = unsafe { slice::from_raw_parts(b, size as usize) };
    let dst = unsafe { slice::from_raw_parts_mut(out, size as usize) };
    let changed = xlock_core::noise::change_random(src, e_abs, xlock_core::seed::fresh_seed());
    dst.copy_from_slice(&changed);
    XLOCK_OK
}

/// # Safety
/// `source` must be long enough for whatever `source_indexes` (already
/// materialized by the caller, e.g. via [`generate_indexes`]) actually
/// references — unchecked here, matching the C header. `pool` must be
/// at least `ceil(pool_bits / 8)` bytes; `vault` at least
/// `ceil(pool_bits * n_locks / 8)` bytes; `source_indexes` at least
/// `pool_bits * n_locks * n_xoration` entries.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn lock(
    source: *const u8,
    source_indexes: *const c_uint,
    pool: *const u8,
    pool_bits: c_uint,
    n_locks: c_uint,
    n_xoration: c_uint,
    vault: *mut u8,
) -> c_int {
    if source.is_null() || source_indexes.is_null() || pool.is_null() || vault.is_null() {
        return XLOCK_ERR_NULL_POINTER;
    }
    if n_locks == 0 || n_xoration == 0 {
        return XLOCK_ERR_INVALID_PARAMS;
    }

    let pool_bytes = xlock_core::params::bits_to_bytes(pool_bits);
    let vault_bytes = xlock_core::params::bits_to_bytes(pool_bits * n_locks);
    let index_count = pool_bits as usize * n_locks as usize * n_xoration as usize;

    let pool_buf = unsafe { slice::from_raw_parts(pool, pool_bytes as usize) };
    let vault_buf = unsafe { slice::from_raw_parts_mut(vault, vault_bytes as usize) };
    let indexes = unsafe { slice::from_raw_parts(source_indexes, index_count) };
    // `source`'s length cannot be validated without `source_bits`, per
    // the doc comment above; read as many bytes as the largest index
    // materialized into `indexes` could require.
    let max_index = indexes.iter().copied().max().unwrap_or(0) as usize;
    let source_buf = unsafe { slice::from_raw_parts(source, max_index / 8 + 1) };

    let params = Params {
        source_bits: (max_index as u32) + 1,
        pool_bits,
        key_pre_bits: 0,
        key_bits: 0,
        token_bytes: 0,
        n_locks,
        n_xoration,
    };
    if let Err(e) = validate::validate_lock_buffers(&params, source_buf, pool_buf, vault_buf) {
        return status_of(&e);
    }

    xlock_core::locker::lock(source_buf, indexes, pool_buf, &params, vault_buf);
    XLOCK_OK
}

/// # Safety
/// `key` must be at least `ceil(key_bits / 8)` bytes; `key_indexes` at
/// least `key_bits` entries. The true bounds of `source`/`vault`/
/// `source_indexes` cannot be known here — no `pool_bits` parameter is
/// available to size them, matching the C header — so they are first
/// inferred from the largest index value actually referenced, then
/// checked by `xlock-membrane` like every other entry point before
/// `xlock-core` is reached.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn unlock(
    source: *const u8,
    source_indexes: *const c_uint,
    vault: *const u8,
    key: *mut u8,
    key_indexes: *const c_uint,
    key_bits: c_uint,
    n_locks: c_uint,
    n_xoration: c_uint,
) -> c_int {
    if source.is_null()
        || source_indexes.is_null()
        || vault.is_null()
        || key.is_null()
        || key_indexes.is_null()
    {
        return XLOCK_ERR_NULL_POINTER;
    }
    if n_locks == 0 || n_xoration == 0 {
        return XLOCK_ERR_INVALID_PARAMS;
    }

    let key_bytes = xlock_core::params::bits_to_bytes(key_bits);
    let key_buf = unsafe { slice::from_raw_parts_mut(key, key_bytes as usize) };
    let key_idx = unsafe { slice::from_raw_parts(key_indexes, key_bits as usize) };

    let max_key_index = key_idx.iter().copied().max().unwrap_or(0) as usize;
    let di = n_locks as usize * n_xoration as usize;
    let vault_bits = (max_key_index + 1) * n_locks as usize;
    let vault_buf = unsafe { slice::from_raw_parts(vault, xlock_core::params::bits_to_bytes(vault_bits as u32) as usize) };
    let source_idx_count = (max_key_index + 1) * di;
    let source_idx_buf = unsafe { slice::from_raw_parts(source_indexes, source_idx_count) };
    let max_source_index = source_idx_buf.iter().copied().max().unwrap_or(0) as usize;
    let source_buf = unsafe { slice::from_raw_parts(source, max_source_index / 8 + 1) };

    let params = Params {
        source_bits: (max_source_index as u32) + 1,
        pool_bits: (max_key_index as u32) + 1,
        key_pre_bits: key_bits,
        key_bits,
        token_bytes: 0,
        n_locks,
        n_xoration,
    };
    if let Err(e) = validate::validate_unlock_buffers(&params, source_buf, vault_buf, key_buf) {
        return status_of(&e);
    }

    let recovered = xlock_core::locker::unlock(source_buf, source_idx_buf, vault_buf, key_idx, &params);
    key_buf.copy_from_slice(&recovered);
    XLOCK_OK
}

/// # Safety
/// `source` must be `source_bytes` writable bytes, `pool` `pool_bytes`
/// writable bytes, `vault` `ceil(pool_bits * n_locks / 8)` writable
/// bytes, `source_seed` one readable/writable `u64`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn init(
    source: *mut u8,
    source_seed: *mut u64,
    source_bits: c_uint,
    source_bytes: c_uint,
    pool: *mut u8,
    pool_bits: c_uint,
    pool_bytes: c_uint,
    vault: *mut u8,
    n_locks: c_uint,
    n_xoration: c_uint,
) -> c_int {
    if source.is_null() || pool.is_null() || vault.is_null() || source_seed.is_null() {
        return XLOCK_ERR_NULL_POINTER;
    }

    let params = Params {
        source_bits,
        pool_bits,
        key_pre_bits: 0,
        key_bits: 0,
        token_bytes: 0,
        n_locks,
        n_xoration,
    };
    if let Err(e) = validate::validate_params(&params) {
        return status_of(&e);
    }
    if source_bytes < params.source_bytes() || pool_bytes < params.pool_bytes() {
        return XLOCK_ERR_BUFFER_TOO_SMALL;
    }

    let vault_buf =
        unsafe { slice::from_raw_parts_mut(vault, params.vault_bytes() as usize) };
    if let Err(e) = validate::validate_vault(&params, vault_buf) {
        return status_of(&e);
    }

    let seed_ref = unsafe { &mut *source_seed };
    let out = xlock_core::init::init(&params, seed_ref, xlock_core::seed::fresh_seed());

    let source_buf = unsafe { slice::from_raw_parts_mut(source, source_bytes as usize) };
    source_buf[..out.source.len()].copy_from_slice(&out.source);
    vault_buf.copy_from_slice(&out.vault);
    XLOCK_OK
}

/// # Safety
/// See `xlock.h`'s `gen` doc comment; every buffer must be at least as
/// long as the byte size implied by its accompanying bit-count
/// parameter. `source_seed`, `key_seed`, and `nonce` must each point to
/// one readable/writable `u64`.
///
/// Returns the elapsed time in milliseconds on success (never
/// negative), or [`XLOCK_INVALID`] if the parameters/buffers failed
/// boundary validation before `xlock-core` was reached.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn gen(
    read: *const u8,
    source_seed: *mut u64,
    source_bits: c_uint,
    vault: *const u8,
    key: *mut u8,
    key_seed: *mut u64,
    key_bits: c_uint,
    key_pre_bits: c_uint,
    nonce: *mut u64,
    token: *mut u8,
    token_bytes: c_uint,
    pool_bits: c_uint,
    n_locks: c_uint,
    n_xoration: c_uint,
) -> f64 {
    if read.is_null()
        || source_seed.is_null()
        || vault.is_null()
        || key.is_null()
        || key_seed.is_null()
        || nonce.is_null()
        || token.is_null()
    {
        return XLOCK_INVALID;
    }

    let params = Params {
        source_bits,
        pool_bits,
        key_pre_bits,
        key_bits,
        token_bytes,
        n_locks,
        n_xoration,
    };

    let read_buf = unsafe { slice::from_raw_parts(read, params.source_bytes() as usize) };
    let vault_buf = unsafe { slice::from_raw_parts(vault, params.vault_bytes() as usize) };
    let key_buf = unsafe { slice::from_raw_parts_mut(key, params.key_bytes() as usize) };
    let token_buf = unsafe { slice::from_raw_parts_mut(token, token_bytes as usize) };

    if validate::validate_extractor_buffers(&params, read_buf, vault_buf, key_buf, token_buf)
        .is_err()
    {
        return XLOCK_INVALID;
    }

    let source_seed_ref = unsafe { &mut *source_seed };
    let key_seed_ref = unsafe { &mut *key_seed };

    let start = std::time::Instant::now();
    let out = match xlock_core::extractor::gen(
        &HmacSha256Prf,
        read_buf,
        source_seed_ref,
        key_seed_ref,
        vault_buf,
        &params,
    ) {
        Ok(out) => out,
        Err(_) => return XLOCK_INVALID,
    };
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    key_buf.copy_from_slice(&out.key);
    token_buf.copy_from_slice(&out.token);
    unsafe {
        *nonce = out.nonce;
    }

    elapsed_ms
}

/// # Safety
/// Same buffer contract as [`gen`], plus `nonce` and `token` must be
/// populated by a prior `gen` call (read-only here).
///
/// Returns the elapsed time in milliseconds if the token verified (the
/// caller's `key` buffer then holds the reproduced key), or
/// [`XLOCK_REP_FAILED`] if the token did not verify (the caller's `key`
/// buffer is zeroed instead), or [`XLOCK_INVALID`] if boundary
/// validation rejected the call before `xlock-core` was reached.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rep(
    read: *const u8,
    source_seed: *mut u64,
    source_bits: c_uint,
    vault: *const u8,
    key: *mut u8,
    key_seed: *mut u64,
    key_bits: c_uint,
    key_pre_bits: c_uint,
    nonce: *mut u64,
    token: *const u8,
    token_bytes: c_uint,
    pool_bits: c_uint,
    n_locks: c_uint,
    n_xoration: c_uint,
) -> f64 {
    if read.is_null()
        || source_seed.is_null()
        || vault.is_null()
        || key.is_null()
        || key_seed.is_null()
        || nonce.is_null()
        || token.is_null()
    {
        return XLOCK_INVALID;
    }

    let params = Params {
        source_bits,
        pool_bits,
        key_pre_bits,
        key_bits,
        token_bytes,
        n_locks,
        n_xoration,
    };

    let read_buf = unsafe { slice::from_raw_parts(read, params.source_bytes() as usize) };
    let vault_buf = unsafe { slice::from_raw_parts(vault, params.vault_bytes() as usize) };
    let key_buf = unsafe { slice::from_raw_parts_mut(key, params.key_bytes() as usize) };
    let token_buf = unsafe { slice::from_raw_parts(token, token_bytes as usize) };

    if validate::validate_extractor_buffers(&params, read_buf, vault_buf, key_buf, token_buf)
        .is_err()
    {
        return XLOCK_INVALID;
    }

    let source_seed_ref = unsafe { &mut *source_seed };
    let key_seed_ref = unsafe { &mut *key_seed };
    let nonce_val = unsafe { *nonce };

    let start = std::time::Instant::now();
    let outcome = match xlock_core::extractor::rep(
        &HmacSha256Prf,
        read_buf,
        source_seed_ref,
        key_seed_ref,
        vault_buf,
        nonce_val,
        token_buf,
        &params,
    ) {
        Ok(outcome) => outcome,
        Err(_) => return XLOCK_INVALID,
    };
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    match outcome {
        RepOutcome::Key(k) => {
            key_buf.copy_from_slice(&k);
            elapsed_ms
        }
        RepOutcome::Failed => {
            key_buf.fill(0);
            XLOCK_REP_FAILED
        }
    }
}
