//! `Gen` and `Rep`: the orchestration layer that ties the Locker, the
//! Index Generator, and the PRF capability together.

use crate::error::{IndexError, RepOutcome};
use crate::indexes;
use crate::locker;
use crate::params::Params;
use crate::prf::Prf;
use crate::seed;

/// Re-derives `(source_indexes, key_indexes)` from `source_seed` and
/// `key_seed`, writing back either seed that was zero on entry. Shared
/// by `gen` and `rep` since both must rematerialize the identical
/// streams — each is a deterministic function of its seed, and must be
/// rematerialized identically by Gen and Rep.
fn derive_indexes(
    params: &Params,
    source_seed: &mut u64,
    key_seed: &mut u64,
) -> Result<(Vec<u32>, Vec<u32>), IndexError> {
    let mut source_indexes = vec![0u32; params.source_index_count() as usize];
    indexes::generate(
        source_seed,
        source_indexes.len(),
        &mut source_indexes,
        0,
        params.source_bits,
        false,
    )?;

    let mut key_indexes = vec![0u32; params.key_pre_bits as usize];
    indexes::generate(
        key_seed,
        key_indexes.len(),
        &mut key_indexes,
        0,
        params.pool_bits,
        false,
    )?;

    Ok((source_indexes, key_indexes))
}

/// Public output of [`gen`]: the secret key plus the helper data that
/// must be published alongside the vault.
#[derive(Debug, Clone)]
pub struct GenOutput {
    /// The derived key. Secret.
    pub key: Vec<u8>,
    /// The freshly drawn nonce. Public.
    pub nonce: u64,
    /// The robustness token. Public.
    pub token: Vec<u8>,
}

/// Runs Gen: derives the key from a (possibly noisy) enrollment-time
/// reading `read` and the published `vault`, producing a key plus the
/// helper data (`nonce`, `token`) that `rep` will need.
///
/// `source_seed` and `key_seed` are resolved in place (minted if zero)
/// exactly as [`indexes::generate`] does; the caller must persist
/// whatever values come back out in order to call `rep` later.
///
/// # Errors
///
/// Propagates [`IndexError`] if `params` makes index materialization
/// infeasible — callers should prefer calling
/// [`Params::validate`](crate::params::Params::validate) up front so
/// this never fires deep inside `gen`.
pub fn gen<P: Prf>(
    prf: &P,
    read: &[u8],
    source_seed: &mut u64,
    key_seed: &mut u64,
    vault: &[u8],
    params: &Params,
) -> Result<GenOutput, IndexError> {
    let (source_indexes, key_indexes) = derive_indexes(params, source_seed, key_seed)?;

    let key_pre = locker::unlock(read, &source_indexes, vault, &key_indexes, params);

    // Unlike `source_seed`/`key_seed`, the nonce is always freshly
    // drawn and written back, never reused even if the caller passed a
    // non-zero value in.
    let nonce = seed::fresh_seed();

    let key = prf.mac(&nonce.to_le_bytes(), &key_pre, params.key_bytes() as usize);
    let token = prf.mac(
        &key_seed.to_le_bytes(),
        &key,
        params.token_bytes as usize,
    );

    Ok(GenOutput { key, nonce, token })
}

/// Runs Rep: reproduces the key from a (possibly noisy) reading `read`
/// and the published helper data, validating against `token`.
///
/// Returns [`RepOutcome::Failed`] (not an error) when the recomputed
/// token does not match `token`. Comparison is constant-time: a
/// short-circuiting `strncmp`-style comparison both leaks timing on the
/// position of the first mismatch and mistreats embedded NUL bytes in
/// what is an opaque token buffer, not a C string, so that style of
/// comparison is deliberately not used here.
///
/// # Errors
///
/// Propagates [`IndexError`], same caveat as [`gen`].
pub fn rep<P: Prf>(
    prf: &P,
    read: &[u8],
    source_seed: &mut u64,
    key_seed: &mut u64,
    vault: &[u8],
    nonce: u64,
    token: &[u8],
    params: &Params,
) -> Result<RepOutcome, IndexError> {
    let (source_indexes, key_indexes) = derive_indexes(params, source_seed, key_seed)?;

    let key_pre = locker::unlock(read, &source_indexes, vault, &key_indexes, params);

    let key = prf.mac(&nonce.to_le_bytes(), &key_pre, params.key_bytes() as usize);
    let recomputed_token = prf.mac(
        &key_seed.to_le_bytes(),
        &key,
        params.token_bytes as usize,
    );

    if constant_time_eq(&recomputed_token, token) {
        Ok(RepOutcome::Key(key))
    } else {
        Ok(RepOutcome::Failed)
    }
}

/// Compares two byte slices for equality without early-exit on the
/// first mismatch, and without leaking length differences beyond "not
/// equal" (unequal lengths fail immediately, since that case can never
/// arise for conformant helper data and is not a secret-dependent
/// branch on the token's *content*).
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
