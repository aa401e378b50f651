// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Requests for proofs that could not be resolved from short ids.
//!
//! Wire form: compact-size count, then one compact-size index delta per entry.

use crate::config::MAX_SIZE;
use crate::error::{CodecError, Result};
use crate::wire::{read_compact_size, read_length, write_compact_size, DeltaDecoder, DeltaEncoder};
use serde::Serialize;
use std::io::{Cursor, Read, Write};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProofsRequest {
    indices: Vec<u32>,
}

impl ProofsRequest {
    /// `indices` must be strictly ascending.
    pub fn new(indices: Vec<u32>) -> Result<Self> {
        let mut encoder = DeltaEncoder::new();
        for &index in &indices {
            encoder.next(index)?;
        }
        Ok(Self { indices })
    }

    /// Caller guarantees `indices` is strictly ascending.
    pub(crate) fn from_sorted(indices: Vec<u32>) -> Self {
        Self { indices }
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn encode<W: Write>(&self, wtr: &mut W) -> Result<()> {
        write_compact_size(wtr, self.indices.len() as u64)?;
        let mut deltas = DeltaEncoder::new();
        for &index in &self.indices {
            write_compact_size(wtr, deltas.next(index)?)?;
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.encode(&mut buf)?;
        Ok(buf)
    }

    pub fn decode<R: Read>(rdr: &mut R) -> Result<Self> {
        let count = read_length(rdr, MAX_SIZE)?;
        let mut deltas = DeltaDecoder::new();
        let mut indices = Vec::new();
        for _ in 0..count {
            indices.push(deltas.next::<u32>(read_compact_size(rdr)?)?);
        }
        Ok(Self { indices })
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut rdr = Cursor::new(data);
        let request = Self::decode(&mut rdr)?;
        let consumed = rdr.position() as usize;
        if consumed != data.len() {
            return Err(CodecError::TrailingBytes(data.len() - consumed));
        }
        Ok(request)
    }

    /// Resolves the request against the proofs in the order they were announced.
    pub fn answer<'a, P>(&self, announced: &'a [P]) -> Result<Vec<&'a P>> {
        self.indices
            .iter()
            .map(|&index| {
                announced
                    .get(index as usize)
                    .ok_or(CodecError::IndexOutOfRange {
                        index,
                        len: announced.len(),
                    })
            })
            .collect()
    }
}
