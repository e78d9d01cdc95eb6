//! Overlapping motif scanning

use crate::iupac::Pattern;

/// Find every start offset where `pattern` matches `sequence`.
///
/// The sequence is uppercased first, so mixed-case input (exon/intron
/// encoding) scans the same as its uppercase form. Matches may overlap:
/// after a hit at `i` the search resumes at `i + 1`. Offsets come back in
/// ascending order; no hit yields an empty vector.
pub fn scan(pattern: &Pattern, sequence: &[u8]) -> Vec<usize> {
    let upper = sequence.to_ascii_uppercase();
    scan_uppercase(pattern, &upper)
}

/// Same as [`scan`] for a sequence that is already uppercase.
pub fn scan_uppercase(pattern: &Pattern, upper: &[u8]) -> Vec<usize> {
    let mut offsets = Vec::new();
    if pattern.is_empty() || upper.len() < pattern.len() {
        return offsets;
    }

    let regex = pattern.regex();
    let mut from = 0;
    while from < upper.len() {
        match regex.find_at(upper, from) {
            Some(m) => {
                offsets.push(m.start());
                from = m.start() + 1;
            }
            None => break,
        }
    }
    offsets
}
