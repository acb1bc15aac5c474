//! Deterministic index generation.
//!
//! A reference C implementation of this construction would seed libc's
//! global `rand()`/`srand()`; this crate cannot depend on libc PRNG
//! state, so it carries its own linear-congruential generator with the
//! same well-known `TYPE_0` constants glibc's `rand()` uses internally,
//! giving a standard linear-congruential-style PRNG without tying
//! correctness to any particular libc.

use std::time::Instant;

use crate::error::IndexError;
use crate::seed;

const LCG_MULTIPLIER: u64 = 1_103_515_245;
const LCG_INCREMENT: u64 = 12_345;
const LCG_MASK: u64 = 0x7fff_ffff;

/// A minimal linear-congruential generator, seeded once and then
/// queried repeatedly — the Rust stand-in for `srand()` + repeated
/// `rand()` calls.
pub(crate) struct Lcg {
    state: u64,
}

impl Lcg {
    pub(crate) fn new(seed: u64) -> Self {
        Lcg { state: seed & LCG_MASK }
    }

    /// Next raw value in `[0, 2^31)`, matching the range of libc `rand()`.
    pub(crate) fn next_raw(&mut self) -> u32 {
        self.state = (self.state.wrapping_mul(LCG_MULTIPLIER) + LCG_INCREMENT) & LCG_MASK;
        self.state as u32
    }
}

/// Produces `size` PRNG-derived indexes in `[0, high)`, with or without
/// replacement, writing them into `out[..size]`.
///
/// # Semantics
///
/// - If `*seed` is non-zero it is used as-is; otherwise a fresh seed is
///   minted from the wall clock and written back to `*seed`.
/// - Each raw LCG value `r` maps to `(r + low) % high`. Note `low` is
///   added *before* the modulus, so the result always lies in
///   `[0, high)`, not `[low, high)`, unless `low == 0` — this is a
///   parameter contract, not a bug to silently fix.
/// - Without replacement: collisions are resolved by linear probing
///   (`(idx + 1) % high`) until an unseen slot is found.
///
/// Returns the elapsed wall-clock time in milliseconds. This is
/// diagnostic only and must never gate correctness.
///
/// # Errors
///
/// See [`IndexError`] for the four failure conditions. No partial write
/// occurs on any error path.
pub fn generate(
    seed: &mut u64,
    size: usize,
    out: &mut [u32],
    low: u32,
    high: u32,
    replacement: bool,
) -> Result<f64, IndexError> {
    if size < 1 {
        return Err(IndexError::SizeTooSmall(size));
    }
    if high <= low {
        return Err(IndexError::EmptyRange { low, high });
    }
    let available = high - low;
    if !replacement && u64::from(available) < size as u64 {
        return Err(IndexError::RangeTooSmallForNoReplacement {
            low,
            high,
            available,
            requested: size,
        });
    }
    if out.len() < size {
        return Err(IndexError::OutputTooSmall {
            expected: size,
            actual: out.len(),
        });
    }

    let start = Instant::now();

    let resolved_seed = self::seed::resolve(seed);
    let mut rng = Lcg::new(resolved_seed);

    // Seen-set sized over [0, high): index values always land in that
    // range regardless of `low` (see the doc comment above), so this is
    // always large enough, unlike the fixed-size C99 stack array it
    // replaces.
    let mut seen = (!replacement).then(|| vec![false; high as usize]);

    for slot in out.iter_mut().take(size) {
        let raw = rng.next_raw();
        let mut index = raw.wrapping_add(low) % high;
        if let Some(seen) = seen.as_mut() {
            while seen[index as usize] {
                index = (index + 1) % high;
            }
            seen[index as usize] = true;
        }
        *slot = index;
    }

    Ok(start.elapsed().as_secs_f64() * 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn rejects_size_below_one() {
        let mut seed = 1u64;
        let mut out = [0u32; 4];
        assert_eq!(
            generate(&mut seed, 0, &mut out, 0, 10, true),
            Err(IndexError::SizeTooSmall(0))
        );
    }

    #[test]
    fn rejects_empty_range() {
        let mut seed = 1u64;
        let mut out = [0u32; 4];
        assert_eq!(
            generate(&mut seed, 1, &mut out, 5, 5, true),
            Err(IndexError::EmptyRange { low: 5, high: 5 })
        );
        assert_eq!(
            generate(&mut seed, 1, &mut out, 6, 5, true),
            Err(IndexError::EmptyRange { low: 6, high: 5 })
        );
    }

    #[test]
    fn rejects_too_small_range_without_replacement() {
        let mut seed = 1u64;
        let mut out = [0u32; 10];
        assert_eq!(
            generate(&mut seed, 10, &mut out, 0, 5, false),
            Err(IndexError::RangeTooSmallForNoReplacement {
                low: 0,
                high: 5,
                available: 5,
                requested: 10,
            })
        );
    }

    #[test]
    fn rejects_output_too_small() {
        let mut seed = 1u64;
        let mut out = [0u32; 2];
        assert_eq!(
            generate(&mut seed, 4, &mut out, 0, 10, true),
            Err(IndexError::OutputTooSmall {
                expected: 4,
                actual: 2,
            })
        );
    }

    #[test]
    fn no_replacement_yields_permutation() {
        // generate(seed=42, size=10, out, low=0, high=10, replacement=false)
        // produces a permutation of {0,...,9}.
        let mut seed = 42u64;
        let mut out = [0u32; 10];
        generate(&mut seed, 10, &mut out, 0, 10, false).unwrap();
        let mut sorted = out.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn no_replacement_never_duplicates_or_leaves_range() {
        let mut seed = 7u64;
        let mut out = vec![0u32; 500];
        generate(&mut seed, 500, &mut out, 0, 1000, false).unwrap();
        let set: HashSet<u32> = out.iter().copied().collect();
        assert_eq!(set.len(), out.len(), "no duplicates");
        assert!(out.iter().all(|&v| v < 1000));
    }

    #[test]
    fn with_replacement_stays_in_range() {
        let mut seed = 7u64;
        let mut out = vec![0u32; 1000];
        generate(&mut seed, 1000, &mut out, 0, 4, true).unwrap();
        assert!(out.iter().all(|&v| v < 4));
        let set: HashSet<u32> = out.iter().copied().collect();
        assert_eq!(set, HashSet::from([0, 1, 2, 3]));
    }

    #[test]
    fn zero_seed_is_minted_and_written_back() {
        let mut seed = 0u64;
        let mut out = [0u32; 4];
        generate(&mut seed, 4, &mut out, 0, 100, true).unwrap();
        assert_ne!(seed, 0);
    }

    #[test]
    fn same_seed_is_deterministic() {
        let mut seed_a = 99u64;
        let mut out_a = [0u32; 20];
        generate(&mut seed_a, 20, &mut out_a, 0, 1000, false).unwrap();

        let mut seed_b = 99u64;
        let mut out_b = [0u32; 20];
        generate(&mut seed_b, 20, &mut out_b, 0, 1000, false).unwrap();

        assert_eq!(out_a, out_b);
    }

    #[test]
    fn no_partial_write_on_error() {
        let mut seed = 1u64;
        let mut out = [7u32; 4];
        let err = generate(&mut seed, 0, &mut out, 0, 10, true);
        assert!(err.is_err());
        assert_eq!(out, [7, 7, 7, 7]);
    }
}
