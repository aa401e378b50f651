//! End-to-end announcement between two peers sharing most of their proofs.

use compact_proofs::{
    reconcile, CodecError, CompactProofs, DecodeLimits, Proof, ProofsRequest, RawProof,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::collections::HashSet;
use std::sync::Arc;

fn pool(range: std::ops::Range<u32>) -> Vec<Arc<RawProof>> {
    range
        .map(|i| Arc::new(RawProof::new(i.to_le_bytes().repeat(8))))
        .collect()
}

#[test]
fn test_announce_request_complete() {
    let mut rng = ChaCha20Rng::seed_from_u64(2024);

    // Sender knows 0..200; receiver knows 0..150 plus some it never announced.
    let sender = pool(0..200);
    let receiver: Vec<Arc<RawProof>> = pool(0..150).into_iter().chain(pool(500..520)).collect();

    // The sender chooses to push the last 10 in full.
    let announced = CompactProofs::from_enumerator(
        sender.iter().cloned().enumerate().map(|(i, p)| (p, i >= 190)),
        &mut rng,
    );
    let wire = announced.to_bytes().unwrap();
    assert!(wire.len() < 200 * 32, "announcement should be smaller than the ids alone");

    let received = CompactProofs::<Arc<RawProof>>::from_bytes(&wire).unwrap();
    assert_eq!(received.len(), 200);
    assert_eq!(received.keys(), announced.keys());

    let outcome = reconcile(&received, receiver.iter().cloned());
    let expected_missing: Vec<u32> = (150..190).collect();
    assert_eq!(outcome.request().indices(), expected_missing.as_slice());

    let request_wire = outcome.request().to_bytes().unwrap();
    let request = ProofsRequest::from_bytes(&request_wire).unwrap();
    let response: Vec<Arc<RawProof>> = request
        .answer(&sender)
        .unwrap()
        .into_iter()
        .cloned()
        .collect();

    let completed = outcome.complete(response).unwrap();
    let got: Vec<_> = completed.iter().map(|p| p.proof_id()).collect();
    let want: Vec<_> = sender.iter().map(|p| p.proof_id()).collect();
    assert_eq!(got, want);
}

#[test]
fn test_short_ids_unique_for_large_set() {
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    let proofs = pool(0..5000);
    let compact = CompactProofs::from_enumerator(proofs.into_iter().map(|p| (p, false)), &mut rng);
    let unique: HashSet<_> = compact.short_ids().iter().collect();
    assert_eq!(unique.len(), 5000);
}

#[test]
fn test_limits_reject_before_reading_entries() {
    let mut rng = ChaCha20Rng::seed_from_u64(8);
    let compact =
        CompactProofs::from_enumerator(pool(0..20).into_iter().map(|p| (p, true)), &mut rng);
    let wire = compact.to_bytes().unwrap();

    let limits = DecodeLimits {
        max_short_ids: 0,
        max_prefilled: 10,
    };
    let err = CompactProofs::<Arc<RawProof>>::from_bytes_with_limits(&wire, &limits).unwrap_err();
    assert!(matches!(err, CodecError::OversizedVector { len: 20, max: 10 }));
}
