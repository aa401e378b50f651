// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Receiver-side reconstruction of an announced proof sequence.
//!
//! Prefilled proofs are placed directly. Every short id position is filled by
//! the first local proof hashing to it under the message keys. Positions that
//! stay empty, or that turn out ambiguous, end up in a [`ProofsRequest`].
//!
//! A position is ambiguous when the message repeats its short id, or when two
//! distinct local proofs hash to it.

use crate::compact::{CompactProofs, Entry};
use crate::config::MAX_BUCKET_SIZE;
use crate::error::{CodecError, Result};
use crate::proof::Proof;
use crate::request::ProofsRequest;
use crate::shortid::ShortIdKeyer;
use crate::types::ShortId;
use rustc_hash::FxHashMap;
use std::collections::hash_map;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// No announced short id matches this proof.
    Unknown,
    Matched(u32),
    /// The same proof was already placed here.
    AlreadyMatched(u32),
    /// The position is ambiguous and must be requested.
    Collision(u32),
}

#[derive(Debug)]
enum Slot<P> {
    Prefilled(P),
    Matched(P),
    Empty,
    Collided,
}

#[derive(Debug)]
pub struct ShortIdMatcher<P> {
    keyer: ShortIdKeyer,
    slots: Vec<Slot<P>>,
    short_ids: Vec<Option<ShortId>>,
    positions: FxHashMap<ShortId, u32>,
    evenly_distributed: bool,
}

impl<P: Proof + Clone> ShortIdMatcher<P> {
    pub fn new(proofs: &CompactProofs<P>) -> Self {
        let mut slots = Vec::with_capacity(proofs.len());
        let mut short_ids = Vec::with_capacity(proofs.len());
        let mut positions = FxHashMap::default();
        positions.reserve(proofs.short_ids().len());

        for (index, entry) in (0..=u32::MAX).zip(proofs.entries()) {
            match entry {
                Entry::Prefilled(proof) => {
                    slots.push(Slot::Prefilled(proof.clone()));
                    short_ids.push(None);
                }
                Entry::Short(sid) => {
                    short_ids.push(Some(sid));
                    match positions.entry(sid) {
                        hash_map::Entry::Occupied(first) => {
                            tracing::trace!(
                                short_id = %sid,
                                index,
                                "duplicate short id in message"
                            );
                            slots[*first.get() as usize] = Slot::Collided;
                            slots.push(Slot::Collided);
                        }
                        hash_map::Entry::Vacant(vacant) => {
                            vacant.insert(index);
                            slots.push(Slot::Empty);
                        }
                    }
                }
            }
        }

        Self {
            keyer: proofs.keyer().clone(),
            slots,
            short_ids,
            positions,
            evenly_distributed: evenly_distributed(proofs.short_ids()),
        }
    }

    /// Whether the short ids spread over buckets the way keyed hashes should.
    ///
    /// A skewed message suggests a sender grinding keys to degrade lookups;
    /// callers may choose not to spend effort reconciling it.
    pub fn is_evenly_distributed(&self) -> bool {
        self.evenly_distributed
    }

    pub fn match_known(&mut self, proof: P) -> MatchOutcome {
        let proof_id = proof.proof_id();
        let sid = self.keyer.short_id(&proof_id);
        let Some(&index) = self.positions.get(&sid) else {
            return MatchOutcome::Unknown;
        };

        let slot = &mut self.slots[index as usize];
        let outcome = match &*slot {
            Slot::Empty => MatchOutcome::Matched(index),
            Slot::Matched(known) if known.proof_id() == proof_id => {
                MatchOutcome::AlreadyMatched(index)
            }
            Slot::Matched(_) | Slot::Collided => MatchOutcome::Collision(index),
            Slot::Prefilled(_) => MatchOutcome::Unknown,
        };

        match outcome {
            MatchOutcome::Matched(_) => *slot = Slot::Matched(proof),
            MatchOutcome::Collision(_) => {
                tracing::trace!(short_id = %sid, index, "short id collision with local proof");
                *slot = Slot::Collided;
            }
            _ => {}
        }
        outcome
    }

    /// Number of positions still lacking a proof.
    pub fn missing(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Empty | Slot::Collided))
            .count()
    }

    pub fn finish(self) -> Reconciliation<P> {
        let mut proofs = Vec::with_capacity(self.slots.len());
        let mut missing = Vec::new();
        let mut expected = Vec::new();

        for ((index, slot), sid) in (0..=u32::MAX).zip(self.slots).zip(self.short_ids) {
            match slot {
                Slot::Prefilled(proof) | Slot::Matched(proof) => proofs.push(Some(proof)),
                Slot::Empty | Slot::Collided => {
                    proofs.push(None);
                    missing.push(index);
                    // Only short id positions can be missing.
                    expected.push(sid.unwrap_or_default());
                }
            }
        }

        tracing::debug!(
            total = proofs.len(),
            missing = missing.len(),
            "reconciled compact proofs"
        );

        Reconciliation {
            keyer: self.keyer,
            proofs,
            request: ProofsRequest::from_sorted(missing),
            expected,
        }
    }
}

/// Matches every local proof against `proofs` and collects the result.
pub fn reconcile<P, I>(proofs: &CompactProofs<P>, local: I) -> Reconciliation<P>
where
    P: Proof + Clone,
    I: IntoIterator<Item = P>,
{
    let mut matcher = ShortIdMatcher::new(proofs);
    for proof in local {
        matcher.match_known(proof);
    }
    matcher.finish()
}

#[derive(Debug)]
pub struct Reconciliation<P> {
    keyer: ShortIdKeyer,
    proofs: Vec<Option<P>>,
    request: ProofsRequest,
    expected: Vec<ShortId>,
}

impl<P: Proof> Reconciliation<P> {
    /// Proofs in announced order, `None` where one must still be fetched.
    pub fn proofs(&self) -> &[Option<P>] {
        &self.proofs
    }

    pub fn request(&self) -> &ProofsRequest {
        &self.request
    }

    pub fn is_complete(&self) -> bool {
        self.request.is_empty()
    }

    /// Fills the requested positions with `received`, given in request order,
    /// checking each proof against the short id announced for its position.
    pub fn complete(mut self, received: Vec<P>) -> Result<Vec<P>> {
        if received.len() != self.request.len() {
            return Err(CodecError::ResponseMismatch {
                expected: self.request.len(),
                found: received.len(),
            });
        }

        for ((&index, &sid), proof) in self
            .request
            .indices()
            .iter()
            .zip(&self.expected)
            .zip(received)
        {
            if self.keyer.short_id(&proof.proof_id()) != sid {
                return Err(CodecError::ShortIdMismatch { index });
            }
            self.proofs[index as usize] = Some(proof);
        }

        Ok(self.proofs.into_iter().flatten().collect())
    }
}

fn evenly_distributed(short_ids: &[ShortId]) -> bool {
    let buckets = short_ids.len().next_power_of_two();
    let mask = (buckets - 1) as u64;
    let mut sizes = vec![0usize; buckets];
    for sid in short_ids {
        let size = &mut sizes[(sid.get() & mask) as usize];
        *size += 1;
        if *size > MAX_BUCKET_SIZE {
            return false;
        }
    }
    true
}
