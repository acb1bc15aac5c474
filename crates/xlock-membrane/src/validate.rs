//! Boundary validation: checks that caller-supplied buffer slices are
//! large enough for the parameters that describe them, *before*
//! `xlock-abi`'s `extern "C"` entry points are allowed to hand those
//! slices to `xlock-core`.
//!
//! Every check here is a length comparison. There is no repair path: a
//! mismatch always becomes a [`MembraneError`], never a clamp or a
//! truncation.

use xlock_core::Params;

use crate::error::MembraneError;

/// Runs [`Params::validate`] and maps its error into the membrane's
/// error type, so ABI callers see one error enum at the boundary.
pub fn validate_params(params: &Params) -> Result<(), MembraneError> {
    params.validate().map_err(MembraneError::from)
}

/// Checks that `source` has at least `params.source_bytes()` bytes.
pub fn validate_source(params: &Params, source: &[u8]) -> Result<(), MembraneError> {
    let expected = params.source_bytes();
    if source.len() < expected as usize {
        return Err(MembraneError::SourceTooSmall {
            expected,
            actual: source.len(),
        });
    }
    Ok(())
}

/// Checks that `pool` has at least `params.pool_bytes()` bytes.
pub fn validate_pool(params: &Params, pool: &[u8]) -> Result<(), MembraneError> {
    let expected = params.pool_bytes();
    if pool.len() < expected as usize {
        return Err(MembraneError::PoolTooSmall {
            expected,
            actual: pool.len(),
        });
    }
    Ok(())
}

/// Checks that `vault` has at least `params.vault_bytes()` bytes.
pub fn validate_vault(params: &Params, vault: &[u8]) -> Result<(), MembraneError> {
    let expected = params.vault_bytes();
    if vault.len() < expected as usize {
        return Err(MembraneError::VaultTooSmall {
            expected,
            actual: vault.len(),
        });
    }
    Ok(())
}

/// Checks that `key` has at least `params.key_bytes()` bytes.
pub fn validate_key(params: &Params, key: &[u8]) -> Result<(), MembraneError> {
    let expected = params.key_bytes();
    if key.len() < expected as usize {
        return Err(MembraneError::KeyTooSmall {
            expected,
            actual: key.len(),
        });
    }
    Ok(())
}

/// Checks that `token` has at least `params.token_bytes` bytes.
pub fn validate_token(params: &Params, token: &[u8]) -> Result<(), MembraneError> {
    let expected = params.token_bytes;
    if token.len() < expected as usize {
        return Err(MembraneError::TokenTooSmall {
            expected,
            actual: token.len(),
        });
    }
    Ok(())
}

/// All the checks `lock` needs: valid parameters plus correctly sized
/// source, pool, and vault buffers.
pub fn validate_lock_buffers(
    params: &Params,
    source: &[u8],
    pool: &[u8],
    vault: &[u8],
) -> Result<(), MembraneError> {
    validate_params(params)?;
    validate_source(params, source)?;
    validate_pool(params, pool)?;
    validate_vault(params, vault)?;
    Ok(())
}

/// All the checks `unlock` needs: valid parameters plus correctly sized
/// source, vault, and key buffers. `unlock` has no `pool` buffer of its
/// own (it reads pool bits back out of `vault`), so this omits
/// [`validate_pool`] where [`validate_lock_buffers`] includes it.
pub fn validate_unlock_buffers(
    params: &Params,
    source: &[u8],
    vault: &[u8],
    key: &[u8],
) -> Result<(), MembraneError> {
    validate_params(params)?;
    validate_source(params, source)?;
    validate_vault(params, vault)?;
    validate_key(params, key)?;
    Ok(())
}

/// All the checks `gen`/`rep` need: valid parameters plus correctly
/// sized read, vault, key, and token buffers.
pub fn validate_extractor_buffers(
    params: &Params,
    read: &[u8],
    vault: &[u8],
    key: &[u8],
    token: &[u8],
) -> Result<(), MembraneError> {
    validate_params(params)?;
    validate_source(params, read)?;
    validate_vault(params, vault)?;
    validate_key(params, key)?;
    validate_token(params, token)?;
    Ok(())
}
