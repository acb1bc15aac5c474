#![no_main]
use libfuzzer_sys::fuzz_target;

use xlock_core::indexes;

/// Derives `(seed, size, low, high, replacement)` from arbitrary bytes
/// and checks the two invariants the index generator promises on any
/// `Ok` return: every output lies in `[0, high)`, and without
/// replacement there are no duplicates.
fuzz_target!(|data: &[u8]| {
    if data.len() < 17 {
        return;
    }

    let mut seed = u64::from_le_bytes(data[0..8].try_into().unwrap());
    let size = (u32::from_le_bytes(data[8..12].try_into().unwrap()) % 512) as usize;
    let low = u32::from_le_bytes(data[12..16].try_into().unwrap()) % 1024;
    let high = low.saturating_add(u32::from(data[16]) + 1);
    let replacement = data.len() > 17 && data[17] % 2 == 0;

    let mut out = vec![0u32; size];
    let result = indexes::generate(&mut seed, size, &mut out, low, high, replacement);

    if result.is_ok() {
        for &v in &out {
            assert!(v < high, "index {v} out of range [0, {high})");
        }
        if !replacement {
            let mut sorted = out.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), out.len(), "duplicate index without replacement");
        }
    }
});
