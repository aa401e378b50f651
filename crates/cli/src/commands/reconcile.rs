use anyhow::Context;
use compact_proofs::{CompactProofs, ProofsRequest, RawProof, ShortIdMatcher};
use std::path::Path;

use crate::input::read_proofs;

/// Matches an announcement against local proofs and reports what must be
/// requested. The encoded request is written to `out` when given.
pub fn run(message: &Path, local: &Path, out: Option<&Path>) -> anyhow::Result<ProofsRequest> {
    let bytes = std::fs::read(message)
        .with_context(|| format!("Failed to read {}", message.display()))?;
    let compact = CompactProofs::<RawProof>::from_bytes(&bytes)?;

    let mut matcher = ShortIdMatcher::new(&compact);
    if !matcher.is_evenly_distributed() {
        tracing::warn!("short ids are unevenly distributed; the sender may be grinding keys");
    }
    for proof in read_proofs(local)? {
        matcher.match_known(proof);
    }
    let outcome = matcher.finish();
    let request = outcome.request().clone();

    println!(
        "Resolved {} of {} proofs, {} to request",
        compact.len() - request.len(),
        compact.len(),
        request.len()
    );
    if !request.is_empty() {
        let listed: Vec<String> = request.indices().iter().map(|i| i.to_string()).collect();
        println!("Missing indices: {}", listed.join(","));
    }

    if let Some(out) = out {
        std::fs::write(out, request.to_bytes()?)
            .with_context(|| format!("Failed to write {}", out.display()))?;
    }

    Ok(request)
}
