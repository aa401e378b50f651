
use crate::proof::RawProof;
use crate::wire::write_compact_size;
use byteorder::{LittleEndian, WriteBytesExt};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

pub(crate) fn rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// `count` distinct proofs with small payloads.
pub(crate) fn proofs(count: usize) -> Vec<RawProof> {
    (0..count)
        .map(|i| RawProof::new(format!("proof-{}", i).into_bytes()))
        .collect()
}

/// Hand-assembles a message so tests can express inputs the encoder refuses
/// to produce.
pub(crate) fn raw_message(
    k0: u64,
    k1: u64,
    short_ids: &[u64],
    prefilled: &[(u64, &RawProof)],
) -> Vec<u8> {
    use crate::proof::Encodable;

    let mut buf = Vec::new();
    buf.write_u64::<LittleEndian>(k0).unwrap();
    buf.write_u64::<LittleEndian>(k1).unwrap();
    write_compact_size(&mut buf, short_ids.len() as u64).unwrap();
    for &sid in short_ids {
        buf.write_u48::<LittleEndian>(sid).unwrap();
    }
    write_compact_size(&mut buf, prefilled.len() as u64).unwrap();
    for (delta, proof) in prefilled {
        write_compact_size(&mut buf, *delta).unwrap();
        proof.encode(&mut buf).unwrap();
    }
    buf
}
