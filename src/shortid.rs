// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Keyed short proof ids.
//!
//! Each message carries two fresh 64-bit keys. A BLAKE3 key is derived from
//! them under [`SHORT_ID_KEY_CONTEXT`], the proof id is hashed in keyed mode
//! and the first 8 output bytes (LE) are truncated to 48 bits. A peer that
//! does not know the keys cannot grind proofs into colliding short ids.

use crate::config::SHORT_ID_KEY_CONTEXT;
use crate::types::{ProofId, ShortId};
use rand::{CryptoRng, RngCore};

/// Draws a fresh key pair. Call once per outgoing message.
pub fn new_keys<R: RngCore + CryptoRng + ?Sized>(rng: &mut R) -> (u64, u64) {
    (rng.next_u64(), rng.next_u64())
}

/// One-shot short id computation. Prefer [`ShortIdKeyer`] when hashing many ids.
pub fn short_id(k0: u64, k1: u64, proof_id: &ProofId) -> ShortId {
    ShortIdKeyer::new(k0, k1).short_id(proof_id)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortIdKeyer {
    k0: u64,
    k1: u64,
    key: [u8; 32],
}

impl ShortIdKeyer {
    pub fn new(k0: u64, k1: u64) -> Self {
        let mut material = [0u8; 16];
        material[..8].copy_from_slice(&k0.to_le_bytes());
        material[8..].copy_from_slice(&k1.to_le_bytes());
        let key = blake3::derive_key(SHORT_ID_KEY_CONTEXT, &material);
        Self { k0, k1, key }
    }

    pub fn random<R: RngCore + CryptoRng + ?Sized>(rng: &mut R) -> Self {
        let (k0, k1) = new_keys(rng);
        Self::new(k0, k1)
    }

    pub fn keys(&self) -> (u64, u64) {
        (self.k0, self.k1)
    }

    pub fn short_id(&self, proof_id: &ProofId) -> ShortId {
        let hash = blake3::keyed_hash(&self.key, proof_id.as_bytes());
        let mut word = [0u8; 8];
        word.copy_from_slice(&hash.as_bytes()[..8]);
        ShortId::new(u64::from_le_bytes(word))
    }
}
