use serde::{Deserialize, Serialize};

use crate::error::{AnnotateError, AnnotateResult};
use crate::exon;
use crate::iupac::{self, Pattern};
use crate::scan;

/// Exon extent inside a sequence.
///
/// `length` is `last_uppercase - first_uppercase`, not inclusive of the
/// final base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExonSpan {
    pub start: usize,
    pub length: usize,
}

impl ExonSpan {
    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

/// A compiled motif with its legend position.
#[derive(Debug, Clone)]
pub struct MotifSpec {
    /// Motif text as written in the motif file
    pub raw_text: String,
    /// 1-based order of appearance, drives the legend color
    pub color_index: usize,
    pattern: Pattern,
}

impl MotifSpec {
    pub fn new<S: Into<String>>(raw_text: S, color_index: usize) -> AnnotateResult<Self> {
        let raw_text = raw_text.into();
        let pattern = iupac::compile(&raw_text)?;
        Ok(Self {
            raw_text,
            color_index,
            pattern,
        })
    }

    /// Symbol count, equal to the length of every match.
    pub fn length(&self) -> usize {
        self.pattern.len()
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }
}

/// Ordered, immutable list of motifs shared by every record.
#[derive(Debug, Clone, Default)]
pub struct MotifSet {
    motifs: Vec<MotifSpec>,
}

impl MotifSet {
    /// Compile motifs in order; color indices are assigned 1, 2, 3, ...
    pub fn compile<I, S>(motifs: I) -> AnnotateResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let motifs = motifs
            .into_iter()
            .enumerate()
            .map(|(i, text)| MotifSpec::new(text, i + 1))
            .collect::<AnnotateResult<Vec<_>>>()?;
        Ok(Self { motifs })
    }

    pub fn len(&self) -> usize {
        self.motifs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.motifs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MotifSpec> {
        self.motifs.iter()
    }

    pub fn get(&self, index: usize) -> Option<&MotifSpec> {
        self.motifs.get(index)
    }
}

impl<'a> IntoIterator for &'a MotifSet {
    type Item = &'a MotifSpec;
    type IntoIter = std::slice::Iter<'a, MotifSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.motifs.iter()
    }
}

/// One named sequence and the annotations derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    pub id: String,
    /// Case-preserved bases: uppercase exonic, lowercase intronic
    pub sequence: Vec<u8>,
    /// 1-based vertical slot in the diagram
    pub display_slot: usize,
    exon: Option<ExonSpan>,
    motif_matches: Option<Vec<Vec<usize>>>,
}

impl SequenceRecord {
    pub fn new<S: Into<String>>(id: S, sequence: Vec<u8>, display_slot: usize) -> Self {
        Self {
            id: id.into(),
            sequence,
            display_slot,
            exon: None,
            motif_matches: None,
        }
    }

    pub fn length(&self) -> usize {
        self.sequence.len()
    }

    /// Label drawn above the backbone.
    pub fn label(&self) -> String {
        format!("{} ({} bases)", self.id, self.length())
    }

    pub fn exon(&self) -> Option<ExonSpan> {
        self.exon
    }

    /// Start offsets per motif, aligned with the motif set. `None` until scanned.
    pub fn motif_matches(&self) -> Option<&[Vec<usize>]> {
        self.motif_matches.as_deref()
    }

    pub fn is_annotated(&self) -> bool {
        self.exon.is_some() && self.motif_matches.is_some()
    }

    /// Scan every motif, reusing the compiled patterns.
    pub fn scan_motifs(&mut self, motifs: &MotifSet) {
        let upper = self.sequence.to_ascii_uppercase();
        let matches = motifs
            .iter()
            .map(|motif| scan::scan_uppercase(motif.pattern(), &upper))
            .collect();
        self.motif_matches = Some(matches);
    }

    pub fn locate_exon(&mut self) -> AnnotateResult<ExonSpan> {
        let span = exon::locate(&self.id, &self.sequence)?;
        self.exon = Some(span);
        Ok(span)
    }

    /// Scan motifs and locate the exon. Empty sequences are rejected.
    pub fn annotate(&mut self, motifs: &MotifSet) -> AnnotateResult<()> {
        if self.sequence.is_empty() {
            return Err(AnnotateError::empty_sequence(&self.id));
        }
        self.scan_motifs(motifs);
        self.locate_exon()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motif_set_assigns_color_indices_in_order() {
        let set = MotifSet::compile(["ygcy", "GCAUG", "catag"]).unwrap();
        let indices: Vec<usize> = set.iter().map(|m| m.color_index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        assert_eq!(set.get(1).unwrap().raw_text, "GCAUG");
        assert_eq!(set.get(1).unwrap().length(), 5);
    }

    #[test]
    fn test_motif_set_propagates_invalid_symbol() {
        let err = MotifSet::compile(["ACGT", "AXG"]).unwrap_err();
        assert!(matches!(err, AnnotateError::InvalidSymbol { symbol: 'X', .. }));
    }

    #[test]
    fn test_record_annotation() {
        let motifs = MotifSet::compile(["AT", "GGG"]).unwrap();
        let mut record = SequenceRecord::new("r1", b"atATatgc".to_vec(), 1);
        assert!(record.motif_matches().is_none());
        assert!(!record.is_annotated());

        record.annotate(&motifs).unwrap();
        assert!(record.is_annotated());
        assert_eq!(record.exon(), Some(ExonSpan { start: 2, length: 1 }));
        let matches = record.motif_matches().unwrap();
        assert_eq!(matches[0], vec![0, 2, 4]);
        assert!(matches[1].is_empty()); // scanned, nothing found
        assert_eq!(record.label(), "r1 (8 bases)");
    }

    #[test]
    fn test_record_without_exon_fails() {
        let motifs = MotifSet::compile(["AT"]).unwrap();
        let mut record = SequenceRecord::new("r2", b"atatat".to_vec(), 1);
        let err = record.annotate(&motifs).unwrap_err();
        assert_eq!(err, AnnotateError::no_exon("r2"));
        assert!(record.exon().is_none());
    }

    #[test]
    fn test_empty_record_rejected() {
        let motifs = MotifSet::compile(["AT"]).unwrap();
        let mut record = SequenceRecord::new("r3", Vec::new(), 1);
        assert_eq!(
            record.annotate(&motifs).unwrap_err(),
            AnnotateError::empty_sequence("r3")
        );
    }
}
