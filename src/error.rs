// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    /// Truncated or unreadable input.
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Vector length {len} exceeds limit {max}")]
    OversizedVector { len: u64, max: u64 },

    #[error("Non-canonical compact size encoding")]
    NonCanonicalCompactSize,

    /// Running sum of index deltas left the target integer range.
    #[error("Differential value overflow")]
    DifferentialOverflow,

    /// Indexes must be strictly ascending.
    #[error("Unsorted index at position {position}")]
    UnsortedIndex { position: usize },

    #[error("Indexes overflowed 32 bits")]
    IndexOverflow,

    #[error("Non contiguous indexes: highest prefilled index {highest} >= size {size}")]
    NonContiguousIndex { highest: u32, size: usize },

    #[error("Index {index} out of range for {len} announced proofs")]
    IndexOutOfRange { index: u32, len: usize },

    #[error("Expected {expected} requested proofs, received {found}")]
    ResponseMismatch { expected: usize, found: usize },

    #[error("Proof received for index {index} does not match its short id")]
    ShortIdMismatch { index: u32 },

    #[error("Short id {0:#x} does not fit in 48 bits")]
    ShortIdOutOfRange(u64),

    #[error("{0} trailing bytes after message")]
    TrailingBytes(usize),

    #[error("Invalid proof payload: {0}")]
    InvalidProof(String),
}

pub type Result<T> = std::result::Result<T, CodecError>;
