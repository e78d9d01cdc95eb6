//! Annotation pipeline
//!
//! Records are taken in arrival order. Empty sequences are skipped and do not
//! consume a display slot; every other record gets the next slot, is scanned
//! for every motif and has its exon located, then the whole batch is laid out.
//! Any exon or layout error aborts the run: a malformed record is never drawn
//! with made-up geometry.

use rayon::prelude::*;

use crate::error::{AnnotateError, AnnotateResult};
use crate::layout::{LayoutConfig, LayoutEngine, LayoutGeometry};
use crate::types::{MotifSet, SequenceRecord};

/// Output of one pipeline run.
#[derive(Debug, Clone)]
pub struct AnnotationRun {
    /// Annotated records in slot order
    pub records: Vec<SequenceRecord>,
    pub layout: LayoutGeometry,
    /// Ids of records skipped because their sequence was empty
    pub skipped: Vec<String>,
}

/// Drives motif scanning, exon location and layout over a batch of sequences.
#[derive(Debug, Clone)]
pub struct Annotator {
    motifs: MotifSet,
    engine: LayoutEngine,
    parallel: bool,
}

impl Annotator {
    pub fn new(motifs: MotifSet, config: LayoutConfig) -> Self {
        Self {
            motifs,
            engine: LayoutEngine::new(config),
            parallel: false,
        }
    }

    /// Annotate records on the rayon thread pool. Slots are fixed before the
    /// parallel step, so the result is identical to a serial run.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn motifs(&self) -> &MotifSet {
        &self.motifs
    }

    /// Run the pipeline over `(id, sequence)` pairs.
    pub fn annotate<I, S, B>(&self, inputs: I, title: Option<&str>) -> AnnotateResult<AnnotationRun>
    where
        I: IntoIterator<Item = (S, B)>,
        S: Into<String>,
        B: Into<Vec<u8>>,
    {
        let (mut records, skipped) = self.assign_slots(inputs);
        log::info!(
            "Annotating {} sequences with {} motifs",
            records.len(),
            self.motifs.len()
        );

        if self.parallel {
            records
                .par_iter_mut()
                .map(|record| self.annotate_record(record))
                .collect::<AnnotateResult<Vec<()>>>()?;
        } else {
            for record in records.iter_mut() {
                self.annotate_record(record)?;
            }
        }

        let layout = self.engine.layout(&records, &self.motifs, title)?;
        Ok(AnnotationRun {
            records,
            layout,
            skipped,
        })
    }

    fn assign_slots<I, S, B>(&self, inputs: I) -> (Vec<SequenceRecord>, Vec<String>)
    where
        I: IntoIterator<Item = (S, B)>,
        S: Into<String>,
        B: Into<Vec<u8>>,
    {
        let mut records = Vec::new();
        let mut skipped = Vec::new();

        for (id, sequence) in inputs {
            let id = id.into();
            let sequence = sequence.into();
            if sequence.is_empty() {
                log::warn!("{}", AnnotateError::empty_sequence(&id));
                skipped.push(id);
                continue;
            }
            let slot = records.len() + 1;
            records.push(SequenceRecord::new(id, sequence, slot));
        }

        (records, skipped)
    }

    fn annotate_record(&self, record: &mut SequenceRecord) -> AnnotateResult<()> {
        record.annotate(&self.motifs)?;
        if let (Some(exon), Some(matches)) = (record.exon(), record.motif_matches()) {
            log::debug!(
                "{} (slot {}): {} bases, exon {}+{}, {} motif hits",
                record.id,
                record.display_slot,
                record.length(),
                exon.start,
                exon.length,
                matches.iter().map(Vec::len).sum::<usize>()
            );
        }
        Ok(())
    }
}
