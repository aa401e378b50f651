//! File helpers shared by the commands.

use anyhow::{Context, Result};
use compact_proofs::{DecodeLimits, RawProof};
use std::path::Path;

/// Reads newline-separated hex payloads. Blank lines and `#` comments are skipped.
pub fn read_proofs(path: &Path) -> Result<Vec<RawProof>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read proofs from {}", path.display()))?;

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(n, line)| {
            RawProof::from_hex(line)
                .with_context(|| format!("{}:{}: bad proof payload", path.display(), n + 1))
        })
        .collect()
}

pub fn write_proofs(path: &Path, proofs: &[RawProof]) -> Result<()> {
    let mut content = String::new();
    for proof in proofs {
        content.push_str(&proof.to_hex());
        content.push('\n');
    }
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write proofs to {}", path.display()))?;
    Ok(())
}

/// Loads decode limits from JSON, or the defaults when no file is given.
pub fn read_limits(path: Option<&Path>) -> Result<DecodeLimits> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read limits from {}", path.display()))?;
            Ok(serde_json::from_str(&content)?)
        }
        None => Ok(DecodeLimits::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_proof_file_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("proofs.txt");
        let proofs = vec![RawProof::new(vec![1, 2, 3]), RawProof::new(vec![0xff])];
        write_proofs(&path, &proofs).unwrap();
        assert_eq!(read_proofs(&path).unwrap(), proofs);
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("proofs.txt");
        std::fs::write(&path, "# header\n\n0a0b\n  \n0c\n").unwrap();
        let proofs = read_proofs(&path).unwrap();
        assert_eq!(proofs.len(), 2);
        assert_eq!(proofs[1].payload(), &[0x0c]);
    }

    #[test]
    fn test_bad_hex_reports_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("proofs.txt");
        std::fs::write(&path, "0a\nzz\n").unwrap();
        let err = read_proofs(&path).unwrap_err();
        assert!(format!("{:#}", err).contains(":2:"));
    }

    #[test]
    fn test_default_limits() {
        assert_eq!(read_limits(None).unwrap(), DecodeLimits::default());
    }
}
