//! `extern "C"` ABI boundary for X-Lock.
//!
//! Builds as both `cdylib` (`libxlock.so`, the C-callable surface) and
//! `rlib` (so the contract tests in `tests/` can call these symbols
//! directly without a C shim). Every exported symbol routes through
//! `xlock-membrane` for boundary validation before reaching the pure
//! logic in `xlock-core` — see [`xlock_abi`] for the
//! `C caller -> ABI entry -> membrane validation -> core impl` shape.

#![allow(clippy::missing_safety_doc)]

pub mod xlock_abi;

pub use xlock_abi::*;
