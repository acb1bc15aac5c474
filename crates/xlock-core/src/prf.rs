//! The PRF capability.
//!
//! The PRF is the one pluggable primitive in the construction — a
//! keyed pseudorandom function with 256-bit output and domain
//! separation by key-vs-message. Exposed as a trait so `Gen`/`Rep` are
//! generic over it, with a tagged pair of implementations:
//! `HmacSha256Prf` (the production choice) and `StubPrf` (a fast
//! deterministic stand-in for property tests that don't care about
//! HMAC's specific mixing, only about its role as an opaque compression
//! step).

use hmac::{Hmac, Mac};
use sha2::Sha256;

/// A keyed pseudorandom function with domain separation between `key`
/// and `msg`.
pub trait Prf {
    /// Computes the tag for `msg` under `key`, truncated or extended to
    /// exactly `out_len` bytes.
    fn mac(&self, key: &[u8], msg: &[u8], out_len: usize) -> Vec<u8>;
}

/// HMAC-SHA256, the reference PRF for this construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSha256Prf;

impl Prf for HmacSha256Prf {
    fn mac(&self, key: &[u8], msg: &[u8], out_len: usize) -> Vec<u8> {
        extend_by_counter(out_len, |counter, out| {
            let mut mac = <Hmac<Sha256> as Mac>::new_from_slice(key)
                .expect("HMAC accepts keys of any length");
            mac.update(msg);
            if counter > 0 {
                mac.update(&counter.to_le_bytes());
            }
            out.copy_from_slice(&mac.finalize().into_bytes());
        })
    }
}

/// A deterministic, non-cryptographic stand-in for `HmacSha256Prf` used
/// by fast property tests where HMAC's cost is irrelevant to what is
/// being tested. Built on the `blake3` keyed-hash mode, which already
/// ships in this workspace.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubPrf;

impl Prf for StubPrf {
    fn mac(&self, key: &[u8], msg: &[u8], out_len: usize) -> Vec<u8> {
        let mut key32 = [0u8; 32];
        let n = key.len().min(32);
        key32[..n].copy_from_slice(&key[..n]);
        extend_by_counter(out_len, |counter, out| {
            let mut hasher = blake3::Hasher::new_keyed(&key32);
            hasher.update(msg);
            if counter > 0 {
                hasher.update(&counter.to_le_bytes());
            }
            let mut xof = hasher.finalize_xof();
            xof.fill(out);
        })
    }
}

/// Produces `out_len` bytes by calling `block` with an increasing
/// counter until enough 32-byte blocks have accumulated, then
/// truncating to `out_len`. `counter == 0` is the first, un-suffixed
/// block, so `out_len <= 32` (the reference parameters' case) costs
/// exactly one `block` call.
fn extend_by_counter(out_len: usize, mut block: impl FnMut(u64, &mut [u8])) -> Vec<u8> {
    let mut out = Vec::with_capacity(out_len);
    let mut counter = 0u64;
    let mut scratch = [0u8; 32];
    while out.len() < out_len {
        block(counter, &mut scratch);
        let take = (out_len - out.len()).min(scratch.len());
        out.extend_from_slice(&scratch[..take]);
        counter += 1;
    }
    out
}
