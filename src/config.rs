// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Configuration constants.

use serde::{Deserialize, Serialize};

/// Width in bytes of a short proof id on the wire.
pub const SHORT_ID_LENGTH: usize = 6;

/// Mask keeping the low 48 bits of a keyed hash.
pub const SHORT_ID_MASK: u64 = (1 << (8 * SHORT_ID_LENGTH as u64)) - 1;

/// Largest element count accepted for any length-prefixed vector.
pub const MAX_SIZE: u64 = 0x0200_0000;

/// BLAKE3 key derivation context for short id keys.
pub const SHORT_ID_KEY_CONTEXT: &str = "compact-proofs 2022-03-01 short proof id key";

/// Largest short id bucket tolerated before a message is considered skewed.
pub const MAX_BUCKET_SIZE: usize = 12;

/// Upper bound on up-front allocation while decoding a vector.
pub const MAX_PREALLOC: usize = 4096;

/// Per-message vector limits applied while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeLimits {
    #[serde(default = "default_limit")]
    pub max_short_ids: u64,
    #[serde(default = "default_limit")]
    pub max_prefilled: u64,
}

fn default_limit() -> u64 {
    MAX_SIZE
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_short_ids: MAX_SIZE,
            max_prefilled: MAX_SIZE,
        }
    }
}
