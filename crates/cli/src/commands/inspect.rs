use comfy_table::presets::UTF8_FULL;
use anyhow::Context;
use comfy_table::{ContentArrangement, Table};
use compact_proofs::{CompactProofs, Proof, RawProof};
use serde::Serialize;
use std::path::Path;

use crate::input::read_limits;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Summary {
    pub k0: u64,
    pub k1: u64,
    pub total: usize,
    pub short_ids: Vec<String>,
    pub prefilled: Vec<PrefilledSummary>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PrefilledSummary {
    pub index: u32,
    pub proof_id: String,
    pub size: usize,
}

pub fn summarize(compact: &CompactProofs<RawProof>) -> Summary {
    let (k0, k1) = compact.keys();
    Summary {
        k0,
        k1,
        total: compact.len(),
        short_ids: compact.short_ids().iter().map(|sid| sid.to_string()).collect(),
        prefilled: compact
            .prefilled()
            .iter()
            .map(|entry| PrefilledSummary {
                index: entry.index,
                proof_id: entry.proof.proof_id().to_hex(),
                size: entry.proof.payload().len(),
            })
            .collect(),
    }
}

pub fn run(path: &Path, limits_path: Option<&Path>, json: bool) -> anyhow::Result<Summary> {
    let limits = read_limits(limits_path)?;
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read message from {}", path.display()))?;
    let compact = CompactProofs::<RawProof>::from_bytes_with_limits(&bytes, &limits)?;
    let summary = summarize(&compact);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(summary);
    }

    println!("\nCompact Proofs");
    println!("--------------");
    println!("Keys:  {:016x} {:016x}", summary.k0, summary.k1);
    println!(
        "Total: {} ({} short ids, {} prefilled)\n",
        summary.total,
        summary.short_ids.len(),
        summary.prefilled.len()
    );

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Index", "Kind", "Details"]);

    for (index, entry) in compact.entries().enumerate() {
        match entry {
            compact_proofs::Entry::Prefilled(proof) => {
                table.add_row(vec![
                    index.to_string(),
                    "PREFILLED".to_string(),
                    format!("{} ({} bytes)", proof.proof_id(), proof.payload().len()),
                ]);
            }
            compact_proofs::Entry::Short(sid) => {
                table.add_row(vec![index.to_string(), "SHORT".to_string(), sid.to_string()]);
            }
        }
    }

    println!("{table}\n");

    Ok(summary)
}
