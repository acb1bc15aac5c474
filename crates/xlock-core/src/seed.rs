//! Wall-clock seed minting.
//!
//! Every seed field in this crate (`source_seed`, `key_seed`, `nonce`)
//! follows the same "pointer or null" convention: zero on entry means
//! "mint a fresh value and hand it back". This module is the single
//! place that talks to the wall clock so the rest of the crate stays
//! pure.

use std::time::{SystemTime, UNIX_EPOCH};

/// Mints a new 64-bit seed from the wall clock.
///
/// Never returns zero — zero is reserved as the "please generate"
/// sentinel on seed fields, so a freshly minted seed that happened to be
/// zero would be indistinguishable from "not yet generated" on the next
/// call.
#[must_use]
pub fn fresh_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    if nanos == 0 { 1 } else { nanos }
}

/// Resolves an in/out seed slot: if `*seed` is zero, mints a fresh one
/// and writes it back; otherwise leaves it untouched. Returns the
/// resolved value either way.
pub fn resolve(seed: &mut u64) -> u64 {
    if *seed == 0 {
        *seed = fresh_seed();
    }
    *seed
}
