//! Boundary validation and ambient configuration for the X-Lock ABI
//! surface.
//!
//! `xlock-abi`'s `extern "C"` entry points take raw-pointer-backed
//! slices sized only by convention (the caller is trusted to have
//! allocated exactly as many bytes as the parameters imply). This crate
//! is the layer that checks those sizes *before* an ABI call is allowed
//! to reach the pure logic in `xlock-core`:
//! `C caller -> ABI entry -> membrane validation -> core impl`, with no
//! healing step. A bad call is always rejected, never clamped or
//! repaired into something the core would silently accept.

pub mod config;
pub mod error;
pub mod validate;

pub use config::LogVerbosity;
pub use error::MembraneError;
