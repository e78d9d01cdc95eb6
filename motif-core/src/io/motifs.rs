//! Motif file loading
//!
//! One motif per line. Lines are trimmed and blank lines ignored; the order
//! of the remaining lines fixes each motif's color index.

use std::path::Path;

use anyhow::{Context, Result};

use crate::error::AnnotateResult;
use crate::types::MotifSet;

/// Compile the motifs listed in `text`.
pub fn parse_motifs(text: &str) -> AnnotateResult<MotifSet> {
    MotifSet::compile(
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty()),
    )
}

/// Read and compile a motif file.
pub fn load_motifs_path<P: AsRef<Path>>(path: P) -> Result<MotifSet> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read motif file: {}", path.display()))?;
    let motifs = parse_motifs(&text)
        .with_context(|| format!("Invalid motif in {}", path.display()))?;
    log::info!("Loaded {} motifs from {}", motifs.len(), path.display());
    Ok(motifs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnnotateError;

    #[test]
    fn test_blank_lines_skipped() {
        let set = parse_motifs("ygcy\n\n  GCAUG \r\ncatag\n\n").unwrap();
        let texts: Vec<&str> = set.iter().map(|m| m.raw_text.as_str()).collect();
        assert_eq!(texts, vec!["ygcy", "GCAUG", "catag"]);
        assert_eq!(set.get(2).unwrap().color_index, 3);
    }

    #[test]
    fn test_invalid_symbol_propagates() {
        let err = parse_motifs("ACGT\nAC*T\n").unwrap_err();
        assert_eq!(err, AnnotateError::invalid_symbol("AC*T", '*', 2));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("motifs.txt");
        std::fs::write(&path, "YGCY\nUGCAUGU\n").unwrap();
        let set = load_motifs_path(&path).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(1).unwrap().length(), 7);

        let missing = load_motifs_path(dir.path().join("nope.txt"));
        assert!(missing.is_err());
    }
}
