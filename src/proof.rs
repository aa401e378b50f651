//! Proof record seam.

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::config::MAX_SIZE;
use crate::error::{CodecError, Result};
use crate::types::ProofId;
use crate::wire::{read_length, write_compact_size};
use std::io::{Read, Write};
use std::sync::Arc;

/// Writes a value in its own wire encoding.
pub trait Encodable {
    fn encode<W: Write>(&self, wtr: &mut W) -> Result<()>;
}

/// Reads a value from its own wire encoding.
pub trait Decodable: Sized {
    fn decode<R: Read>(rdr: &mut R) -> Result<Self>;
}

/// A full proof as carried in prefilled entries.
///
/// Only the identifier and the opaque encoding matter to the codec.
pub trait Proof: Encodable + Decodable {
    fn proof_id(&self) -> ProofId;
}

impl<P: Encodable> Encodable for Arc<P> {
    fn encode<W: Write>(&self, wtr: &mut W) -> Result<()> {
        self.as_ref().encode(wtr)
    }
}

impl<P: Decodable> Decodable for Arc<P> {
    fn decode<R: Read>(rdr: &mut R) -> Result<Self> {
        P::decode(rdr).map(Arc::new)
    }
}

impl<P: Proof> Proof for Arc<P> {
    fn proof_id(&self) -> ProofId {
        self.as_ref().proof_id()
    }
}

/// Opaque proof payload identified by its BLAKE3 hash.
///
/// Wire form: compact-size length followed by the payload bytes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RawProof {
    payload: Vec<u8>,
    id: ProofId,
}

impl RawProof {
    pub fn new(payload: Vec<u8>) -> Self {
        let id = ProofId(*blake3::hash(&payload).as_bytes());
        Self { payload, id }
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        let payload = hex::decode(s.trim()).map_err(|e| CodecError::InvalidProof(e.to_string()))?;
        Ok(Self::new(payload))
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.payload)
    }
}

impl Encodable for RawProof {
    fn encode<W: Write>(&self, wtr: &mut W) -> Result<()> {
        write_compact_size(wtr, self.payload.len() as u64)?;
        wtr.write_all(&self.payload)?;
        Ok(())
    }
}

impl Decodable for RawProof {
    fn decode<R: Read>(rdr: &mut R) -> Result<Self> {
        let len = read_length(rdr, MAX_SIZE)?;
        // Grows with the input rather than trusting the prefix.
        let mut payload = Vec::new();
        rdr.by_ref().take(len as u64).read_to_end(&mut payload)?;
        if payload.len() != len {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("Proof payload truncated: expected {} bytes, found {}", len, payload.len()),
            )
            .into());
        }
        Ok(Self::new(payload))
    }
}

impl Proof for RawProof {
    fn proof_id(&self) -> ProofId {
        self.id
    }
}
