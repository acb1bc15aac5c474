//! # xlock-core
//!
//! Core of X-Lock, a secure XOR-based fuzzy extractor for resource
//! constrained devices: the bit-level locker (vault construction and
//! majority-vote decoding), the deterministic index-generation PRNG,
//! and the Gen/Rep orchestration that derives a stable key from a
//! noisy, high-entropy physical source.
//!
//! No `unsafe` code is permitted at the crate level — every primitive
//! here is a pure function over caller-owned buffers: single-threaded,
//! non-suspending, no hidden state.

#![deny(unsafe_code)]

pub mod bitbuffer;
pub mod error;
pub mod extractor;
pub mod indexes;
pub mod init;
pub mod locker;
pub mod noise;
pub mod params;
pub mod prf;
pub mod seed;

pub use error::{IndexError, ParamError, RepOutcome};
pub use params::Params;
pub use prf::{HmacSha256Prf, Prf, StubPrf};
