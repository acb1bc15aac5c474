//! Fixed-vector end-to-end scenarios exercising `xlock-core`.
//!
//! Each scenario is a pure function over a fixed seed/parameter set
//! that returns a [`ScenarioResult`]; the `harness` bin and this
//! crate's own integration tests both drive them through
//! [`run_all`].

use serde_json::json;

use xlock_core::prf::HmacSha256Prf;
use xlock_core::{Params, RepOutcome, extractor, init, noise};

/// Outcome of one scenario run, ready to hand to
/// [`crate::structured_log::LogEmitter`].
#[derive(Debug)]
pub struct ScenarioResult {
    pub name: &'static str,
    pub passed: bool,
    pub details: serde_json::Value,
}

fn tiny_params() -> Params {
    Params {
        source_bits: 8192,
        pool_bits: 128,
        key_pre_bits: 40,
        key_bits: 256,
        token_bytes: 32,
        n_locks: 32,
        n_xoration: 2,
    }
}

/// Trivial reproduction under zero noise: `Gen` then `Rep` on the same
/// reading, using the reference parameter set.
pub fn trivial_reproduction() -> ScenarioResult {
    let params = Params::reference();
    let prf = HmacSha256Prf;

    let mut source_seed = 0x0001u64;
    let init_out = init::init(&params, &mut source_seed, 0x0100);

    let mut gen_source_seed = init_out.source_seed;
    let mut gen_key_seed = 0x0002u64;
    let gen_out = extractor::gen(
        &prf,
        &init_out.source,
        &mut gen_source_seed,
        &mut gen_key_seed,
        &init_out.vault,
        &params,
    );

    let gen_out = match gen_out {
        Ok(out) => out,
        Err(e) => {
            return ScenarioResult {
                name: "trivial reproduction",
                passed: false,
                details: json!({ "error": e.to_string() }),
            };
        }
    };

    let mut rep_source_seed = gen_source_seed;
    let mut rep_key_seed = gen_key_seed;
    let rep_out = extractor::rep(
        &prf,
        &init_out.source,
        &mut rep_source_seed,
        &mut rep_key_seed,
        &init_out.vault,
        gen_out.nonce,
        &gen_out.token,
        &params,
    );

    let passed = matches!(rep_out, Ok(RepOutcome::Key(ref k)) if *k == gen_out.key);
    ScenarioResult {
        name: "trivial reproduction",
        passed,
        details: json!({ "token_verified": passed }),
    }
}

/// Noisy reproduction: `Rep` reads a reread perturbed by `e_abs = 0.15`
/// independently per bit, repeated over `trials` independent runs.
/// Reports the empirical failure rate, expected to stay well under 5%
/// for the reference parameter set.
pub fn noisy_reproduction(trials: usize) -> ScenarioResult {
    let params = Params::reference();
    let prf = HmacSha256Prf;
    let e_abs = 0.15f32;
    let mut failures = 0usize;

    for trial in 0..trials {
        let mut source_seed = 0x1000 + trial as u64;
        let init_out = init::init(&params, &mut source_seed, 0x2000 + trial as u64);

        let mut gs = init_out.source_seed;
        let mut gk = 0x3000u64 + trial as u64;
        let gen_out = match extractor::gen(&prf, &init_out.source, &mut gs, &mut gk, &init_out.vault, &params) {
            Ok(out) => out,
            Err(_) => {
                failures += 1;
                continue;
            }
        };

        let noisy = noise::change_random(&init_out.source, e_abs, 0x4000 + trial as u64);

        let mut rs = gs;
        let mut rk = gk;
        let rep_out = extractor::rep(
            &prf,
            &noisy,
            &mut rs,
            &mut rk,
            &init_out.vault,
            gen_out.nonce,
            &gen_out.token,
            &params,
        );

        match rep_out {
            Ok(RepOutcome::Key(k)) if k == gen_out.key => {}
            _ => failures += 1,
        }
    }

    let rate = failures as f64 / trials as f64;
    ScenarioResult {
        name: "noisy reproduction",
        passed: rate < 0.05,
        details: json!({ "trials": trials, "failures": failures, "error_rate": rate }),
    }
}

/// Seed reuse: a second `Rep` call with the same captured seeds
/// reproduces the same key bit-for-bit as the first.
pub fn seed_reuse() -> ScenarioResult {
    let params = tiny_params();
    let prf = HmacSha256Prf;
    let mut source_seed = 0x1234u64;
    let init_out = init::init(&params, &mut source_seed, 0x5678);

    let mut gs = init_out.source_seed;
    let mut gk = 7u64;
    let gen_out = match extractor::gen(&prf, &init_out.source, &mut gs, &mut gk, &init_out.vault, &params) {
        Ok(out) => out,
        Err(e) => {
            return ScenarioResult {
                name: "seed reuse",
                passed: false,
                details: json!({ "error": e.to_string() }),
            };
        }
    };

    let mut rs1 = gs;
    let mut rk1 = gk;
    let rep1 = extractor::rep(&prf, &init_out.source, &mut rs1, &mut rk1, &init_out.vault, gen_out.nonce, &gen_out.token, &params);

    let mut rs2 = gs;
    let mut rk2 = gk;
    let rep2 = extractor::rep(&prf, &init_out.source, &mut rs2, &mut rk2, &init_out.vault, gen_out.nonce, &gen_out.token, &params);

    let passed = matches!((&rep1, &rep2), (Ok(a), Ok(b)) if a == b)
        && matches!(&rep1, Ok(RepOutcome::Key(k)) if *k == gen_out.key);
    ScenarioResult {
        name: "seed reuse",
        passed,
        details: json!({ "reproducible": passed }),
    }
}

/// `generate(seed=42, size=10, out, low=0, high=10, replacement=false)`
/// produces a permutation of `{0,...,9}`.
pub fn index_no_replacement() -> ScenarioResult {
    let mut seed = 42u64;
    let mut out = [0u32; 10];
    let result = xlock_core::indexes::generate(&mut seed, 10, &mut out, 0, 10, false);
    let mut sorted = out.to_vec();
    sorted.sort_unstable();
    let passed = result.is_ok() && sorted == (0..10).collect::<Vec<_>>();
    ScenarioResult {
        name: "index without replacement",
        passed,
        details: json!({ "output": out }),
    }
}

/// `generate(seed=7, size=1000, out, low=0, high=4, replacement=true)`
/// produces values all in `{0,1,2,3}`, each appearing at least once.
pub fn index_with_replacement() -> ScenarioResult {
    let mut seed = 7u64;
    let mut out = vec![0u32; 1000];
    let result = xlock_core::indexes::generate(&mut seed, 1000, &mut out, 0, 4, true);
    let in_range = out.iter().all(|&v| v < 4);
    let covers_all: std::collections::HashSet<u32> = out.iter().copied().collect();
    let passed = result.is_ok() && in_range && covers_all == std::collections::HashSet::from([0, 1, 2, 3]);
    ScenarioResult {
        name: "index with replacement",
        passed,
        details: json!({ "distinct_values_seen": covers_all.len() }),
    }
}

/// Perturbing the vault by a single bit between `Gen` and `Rep` causes
/// the token check to fail and the caller's key to be zeroed.
pub fn rep_mismatch_detection() -> ScenarioResult {
    let params = tiny_params();
    let prf = HmacSha256Prf;
    let mut source_seed = 42u64;
    let init_out = init::init(&params, &mut source_seed, 43);

    let mut gs = init_out.source_seed;
    let mut gk = 44u64;
    let gen_out = match extractor::gen(&prf, &init_out.source, &mut gs, &mut gk, &init_out.vault, &params) {
        Ok(out) => out,
        Err(e) => {
            return ScenarioResult {
                name: "rep mismatch detection",
                passed: false,
                details: json!({ "error": e.to_string() }),
            };
        }
    };

    let mut tampered_vault = init_out.vault.clone();
    tampered_vault[0] ^= 1;

    let mut rs = gs;
    let mut rk = gk;
    let rep_out = extractor::rep(&prf, &init_out.source, &mut rs, &mut rk, &tampered_vault, gen_out.nonce, &gen_out.token, &params);

    let passed = matches!(rep_out, Ok(RepOutcome::Failed));
    ScenarioResult {
        name: "rep mismatch detection",
        passed,
        details: json!({ "outcome": format!("{rep_out:?}") }),
    }
}

/// Runs every scenario in order, using `noisy_trials` for the noisy
/// reproduction scenario's trial count. 10,000 gives a tight estimate
/// of the failure rate; the default CLI value is smaller so the
/// harness stays fast for routine use.
pub fn run_all(noisy_trials: usize) -> Vec<ScenarioResult> {
    vec![
        trivial_reproduction(),
        noisy_reproduction(noisy_trials),
        seed_reuse(),
        index_no_replacement(),
        index_with_replacement(),
        rep_mismatch_detection(),
    ]
}
