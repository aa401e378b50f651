use anyhow::{Context, Result};
use compact_proofs::CompactProofs;
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::collections::BTreeSet;
use std::path::Path;

use crate::input::read_proofs;

/// Encodes the proofs listed in `input` as a compact announcement.
///
/// Positions in `prefill` are sent in full. A `seed` makes the keys
/// reproducible; otherwise they come from the thread RNG.
pub fn run(input: &Path, prefill: &[u32], out: &Path, seed: Option<u64>) -> Result<()> {
    let bytes = match seed {
        Some(seed) => encode(input, prefill, &mut ChaCha20Rng::seed_from_u64(seed))?,
        None => encode(input, prefill, &mut rand::thread_rng())?,
    };
    std::fs::write(out, &bytes).with_context(|| format!("Failed to write {}", out.display()))?;
    println!("Wrote {} bytes to {}", bytes.len(), out.display());
    Ok(())
}

fn encode<R: RngCore + CryptoRng>(input: &Path, prefill: &[u32], rng: &mut R) -> Result<Vec<u8>> {
    let proofs = read_proofs(input)?;
    let prefill: BTreeSet<u32> = prefill.iter().copied().collect();

    if let Some(&beyond) = prefill.iter().find(|&&index| index as usize >= proofs.len()) {
        anyhow::bail!("Prefill index {} out of range for {} proofs", beyond, proofs.len());
    }

    let compact = CompactProofs::from_enumerator(
        (0..=u32::MAX)
            .zip(proofs)
            .map(|(index, proof)| (proof, prefill.contains(&index))),
        rng,
    );

    tracing::info!(
        total = compact.len(),
        prefilled = compact.prefilled().len(),
        "encoded announcement"
    );
    Ok(compact.to_bytes()?)
}
