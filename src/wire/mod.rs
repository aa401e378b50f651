// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod compact_size;
pub mod difference;

pub use compact_size::{read_compact_size, read_length, write_compact_size};
pub use difference::{decode_deltas, encode_deltas, DeltaDecoder, DeltaEncoder};
