// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

//! compact-proofs: Bandwidth-efficient announcement of proof sets between peers.
//!
//! A sender announces an ordered set of proofs as a [`CompactProofs`]: a few
//! proofs sent in full at their absolute positions, and a 48-bit keyed short
//! id for every other position. The receiver matches short ids against the
//! proofs it already holds ([`reconcile`]) and requests the rest by index
//! ([`ProofsRequest`]).

pub mod config;
pub mod error;
pub mod types;
pub mod wire;
pub mod proof;
pub mod shortid;
pub mod compact;
pub mod request;
pub mod reconcile;

pub use compact::{CompactProofs, Entry, PrefilledProof};
pub use config::DecodeLimits;
pub use error::{CodecError, Result};
pub use proof::{Decodable, Encodable, Proof, RawProof};
pub use reconcile::{reconcile, MatchOutcome, Reconciliation, ShortIdMatcher};
pub use request::ProofsRequest;
pub use shortid::{new_keys, short_id, ShortIdKeyer};
pub use types::{ProofId, ShortId};

#[cfg(test)]
pub mod tests;
