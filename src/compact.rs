// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Compact proof announcements.
//!
//! Wire format (little-endian):
//! ```text
//! [u64]          k0
//! [u64]          k1
//! [compact size] short id count
//!   [u48...]     short ids, in position order skipping prefilled positions
//! [compact size] prefilled count
//! For each prefilled proof:
//!   [compact size] index delta (absolute for the first entry)
//!   [..]           proof, in its own encoding
//! ```

use crate::config::{DecodeLimits, MAX_PREALLOC};
use crate::error::{CodecError, Result};
use crate::proof::Proof;
use crate::shortid::ShortIdKeyer;
use crate::types::{ProofId, ShortId};
use crate::wire::{read_compact_size, read_length, write_compact_size, DeltaDecoder, DeltaEncoder};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use rand::{CryptoRng, RngCore};
use std::io::{Cursor, Read, Write};
use std::iter::Peekable;
use std::slice;

/// A proof sent in full, addressed by its absolute position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrefilledProof<P> {
    pub index: u32,
    pub proof: P,
}

/// What occupies one logical position of a [`CompactProofs`].
#[derive(Debug, PartialEq, Eq)]
pub enum Entry<'a, P> {
    Prefilled(&'a P),
    Short(ShortId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompactProofs<P> {
    keyer: ShortIdKeyer,
    short_ids: Vec<ShortId>,
    prefilled: Vec<PrefilledProof<P>>,
}

impl<P> CompactProofs<P> {
    /// Empty announcement with fresh keys.
    pub fn new<R: RngCore + CryptoRng + ?Sized>(rng: &mut R) -> Self {
        Self {
            keyer: ShortIdKeyer::random(rng),
            short_ids: Vec::new(),
            prefilled: Vec::new(),
        }
    }

    /// Assembles an announcement from its parts, enforcing the same index
    /// invariants as [`CompactProofs::decode`].
    pub fn from_parts(
        k0: u64,
        k1: u64,
        short_ids: Vec<ShortId>,
        prefilled: Vec<PrefilledProof<P>>,
    ) -> Result<Self> {
        let mut encoder = DeltaEncoder::new();
        for entry in &prefilled {
            encoder.next(entry.index)?;
        }
        let proofs = Self {
            keyer: ShortIdKeyer::new(k0, k1),
            short_ids,
            prefilled,
        };
        proofs.check_indexes()?;
        Ok(proofs)
    }

    pub fn keys(&self) -> (u64, u64) {
        self.keyer.keys()
    }

    pub fn keyer(&self) -> &ShortIdKeyer {
        &self.keyer
    }

    pub fn short_id(&self, proof_id: &ProofId) -> ShortId {
        self.keyer.short_id(proof_id)
    }

    pub fn short_ids(&self) -> &[ShortId] {
        &self.short_ids
    }

    pub fn prefilled(&self) -> &[PrefilledProof<P>] {
        &self.prefilled
    }

    /// Number of logical positions announced.
    pub fn len(&self) -> usize {
        self.short_ids.len() + self.prefilled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.short_ids.is_empty() && self.prefilled.is_empty()
    }

    /// Walks positions `0..len()` in order.
    pub fn entries(&self) -> Entries<'_, P> {
        Entries {
            position: 0,
            short_ids: self.short_ids.iter(),
            prefilled: self.prefilled.iter().peekable(),
        }
    }

    /// Checks that the prefilled and short id position spaces merge into a
    /// gapless range that fits in 32 bits. Assumes `prefilled` is sorted.
    fn check_indexes(&self) -> Result<()> {
        let Some(last) = self.prefilled.last() else {
            return Ok(());
        };
        let highest = last.index;

        if u64::from(highest) + self.short_ids.len() as u64 > u64::from(u32::MAX) {
            return Err(CodecError::IndexOverflow);
        }

        // e.g. no short id and prefilled indexes 0 and 2: index 1 is unrecoverable.
        if highest as usize >= self.len() {
            return Err(CodecError::NonContiguousIndex {
                highest,
                size: self.len(),
            });
        }

        Ok(())
    }
}

impl<P: Proof> CompactProofs<P> {
    /// Builds an announcement from an ordered enumeration of proofs, each
    /// flagged with whether it should be sent in full.
    ///
    /// Positions past `u32::MAX` cannot be addressed; enumeration stops there.
    pub fn from_enumerator<I, R>(proofs: I, rng: &mut R) -> Self
    where
        I: IntoIterator<Item = (P, bool)>,
        R: RngCore + CryptoRng + ?Sized,
    {
        let keyer = ShortIdKeyer::random(rng);
        let mut short_ids = Vec::new();
        let mut prefilled = Vec::new();

        for (index, (proof, send_in_full)) in (0..=u32::MAX).zip(proofs) {
            if send_in_full {
                prefilled.push(PrefilledProof { index, proof });
            } else {
                short_ids.push(keyer.short_id(&proof.proof_id()));
            }
        }

        tracing::debug!(
            short_ids = short_ids.len(),
            prefilled = prefilled.len(),
            "built compact proofs"
        );

        Self {
            keyer,
            short_ids,
            prefilled,
        }
    }

    pub fn encode<W: Write>(&self, wtr: &mut W) -> Result<()> {
        let (k0, k1) = self.keyer.keys();
        wtr.write_u64::<LittleEndian>(k0)?;
        wtr.write_u64::<LittleEndian>(k1)?;

        write_compact_size(wtr, self.short_ids.len() as u64)?;
        for sid in &self.short_ids {
            wtr.write_u48::<LittleEndian>(sid.get())?;
        }

        write_compact_size(wtr, self.prefilled.len() as u64)?;
        let mut deltas = DeltaEncoder::new();
        for entry in &self.prefilled {
            write_compact_size(wtr, deltas.next(entry.index)?)?;
            entry.proof.encode(wtr)?;
        }

        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.encode(&mut buf)?;
        Ok(buf)
    }

    pub fn decode<R: Read>(rdr: &mut R) -> Result<Self> {
        Self::decode_with_limits(rdr, &DecodeLimits::default())
    }

    /// Decodes and validates an announcement. Nothing is returned unless the
    /// whole message is well formed.
    pub fn decode_with_limits<R: Read>(rdr: &mut R, limits: &DecodeLimits) -> Result<Self> {
        let k0 = rdr.read_u64::<LittleEndian>()?;
        let k1 = rdr.read_u64::<LittleEndian>()?;

        let short_count = read_length(rdr, limits.max_short_ids)?;
        let mut short_ids = Vec::with_capacity(short_count.min(MAX_PREALLOC));
        for _ in 0..short_count {
            short_ids.push(ShortId::new(rdr.read_u48::<LittleEndian>()?));
        }

        let prefilled_count = read_length(rdr, limits.max_prefilled)?;
        let mut prefilled = Vec::with_capacity(prefilled_count.min(MAX_PREALLOC));
        let mut deltas = DeltaDecoder::new();
        for _ in 0..prefilled_count {
            let index = deltas.next::<u32>(read_compact_size(rdr)?)?;
            let proof = P::decode(rdr)?;
            prefilled.push(PrefilledProof { index, proof });
        }

        let proofs = Self {
            keyer: ShortIdKeyer::new(k0, k1),
            short_ids,
            prefilled,
        };

        if let Err(e) = proofs.check_indexes() {
            tracing::warn!(
                short_ids = proofs.short_ids.len(),
                prefilled = proofs.prefilled.len(),
                "rejecting compact proofs: {}",
                e
            );
            return Err(e);
        }

        tracing::debug!(
            short_ids = proofs.short_ids.len(),
            prefilled = proofs.prefilled.len(),
            "decoded compact proofs"
        );
        Ok(proofs)
    }

    /// Decodes a complete buffer, rejecting trailing bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_limits(data, &DecodeLimits::default())
    }

    pub fn from_bytes_with_limits(data: &[u8], limits: &DecodeLimits) -> Result<Self> {
        let mut rdr = Cursor::new(data);
        let proofs = Self::decode_with_limits(&mut rdr, limits)?;
        let consumed = rdr.position() as usize;
        if consumed != data.len() {
            return Err(CodecError::TrailingBytes(data.len() - consumed));
        }
        Ok(proofs)
    }
}

/// Iterator over the logical positions of a [`CompactProofs`].
#[derive(Debug)]
pub struct Entries<'a, P> {
    position: u64,
    short_ids: slice::Iter<'a, ShortId>,
    prefilled: Peekable<slice::Iter<'a, PrefilledProof<P>>>,
}

impl<'a, P> Iterator for Entries<'a, P> {
    type Item = Entry<'a, P>;

    fn next(&mut self) -> Option<Self::Item> {
        let at_prefilled = matches!(
            self.prefilled.peek(),
            Some(entry) if u64::from(entry.index) == self.position
        );
        let entry = if at_prefilled {
            self.prefilled.next().map(|entry| Entry::Prefilled(&entry.proof))
        } else {
            self.short_ids.next().map(|sid| Entry::Short(*sid))
        }?;
        self.position += 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.short_ids.len() + self.prefilled.len();
        (remaining, Some(remaining))
    }
}

impl<'a, P> ExactSizeIterator for Entries<'a, P> {}
