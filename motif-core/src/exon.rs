//! Exon location from case-encoded sequences
//!
//! Uppercase bases are exonic and lowercase bases intronic. Only the outer
//! span from the first to the last uppercase base is reported; a sequence
//! with several uppercase runs yields one span covering the lowercase gaps.

use crate::error::{AnnotateError, AnnotateResult};
use crate::types::ExonSpan;

/// Locate the exon span of sequence `id`.
///
/// `length` is the offset of the last uppercase base minus the offset of the
/// first one, so a single uppercase base gives a zero-length span.
pub fn locate(id: &str, sequence: &[u8]) -> AnnotateResult<ExonSpan> {
    let mut first = None;
    let mut last = 0;
    let mut runs = 0usize;
    let mut in_run = false;

    for (idx, base) in sequence.iter().enumerate() {
        if base.is_ascii_uppercase() {
            if first.is_none() {
                first = Some(idx);
            }
            last = idx;
            if !in_run {
                runs += 1;
                in_run = true;
            }
        } else {
            in_run = false;
        }
    }

    let start = first.ok_or_else(|| AnnotateError::no_exon(id))?;
    if runs > 1 {
        log::debug!(
            "{}: {} uppercase runs, reporting outer span {}..={}",
            id,
            runs,
            start,
            last
        );
    }

    Ok(ExonSpan {
        start,
        length: last - start,
    })
}
