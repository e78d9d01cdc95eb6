//! IUPAC motif compilation
//!
//! Every motif symbol maps to a fixed class of accepted bases. `T` and `U`
//! are interchangeable so the same motif matches DNA and RNA input.
//!
//! | symbol | bases     | symbol | bases     |
//! |--------|-----------|--------|-----------|
//! | A      | A         | R      | A G       |
//! | C      | C         | Y      | C T U     |
//! | G      | G         | B      | C G T U   |
//! | T      | T U       | D      | A G T U   |
//! | U      | T U       | H      | A C T U   |
//! | W      | A T U     | V      | A C G U   |
//! | S      | C G       | N      | A C G T U |
//! | M      | A C       | K      | G T U     |

use regex::bytes::Regex;

use crate::error::{AnnotateError, AnnotateResult};

const BASE_A: u8 = 1;
const BASE_C: u8 = 2;
const BASE_G: u8 = 4;
const BASE_T: u8 = 8;
const BASE_U: u8 = 16;
const BASE_TU: u8 = BASE_T | BASE_U;

/// Base letters in the order they are written into a regex class.
const CLASS_ORDER: [(u8, u8); 5] = [
    (BASE_A, b'A'),
    (BASE_C, b'C'),
    (BASE_G, b'G'),
    (BASE_T, b'T'),
    (BASE_U, b'U'),
];

/// All motif symbols accepted by [`IupacClass::from_symbol`].
pub const IUPAC_SYMBOLS: &[u8; 16] = b"ACGTUWSMKRYBDHVN";

/// Bitmask of the bases a single motif position accepts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct IupacClass(u8);

impl IupacClass {
    /// Class for a motif symbol (case-insensitive), `None` outside the alphabet.
    pub fn from_symbol(symbol: u8) -> Option<Self> {
        let mask = match symbol.to_ascii_uppercase() {
            b'A' => BASE_A,
            b'C' => BASE_C,
            b'G' => BASE_G,
            b'T' | b'U' => BASE_TU,
            b'W' => BASE_A | BASE_TU,
            b'S' => BASE_C | BASE_G,
            b'M' => BASE_A | BASE_C,
            b'K' => BASE_G | BASE_TU,
            b'R' => BASE_A | BASE_G,
            b'Y' => BASE_C | BASE_TU,
            b'B' => BASE_C | BASE_G | BASE_TU,
            b'D' => BASE_A | BASE_G | BASE_TU,
            b'H' => BASE_A | BASE_C | BASE_TU,
            b'V' => BASE_A | BASE_C | BASE_G | BASE_U,
            b'N' => BASE_A | BASE_C | BASE_G | BASE_TU,
            _ => return None,
        };
        Some(Self(mask))
    }

    /// Whether an (uppercase) sequence base falls in this class.
    #[inline]
    pub fn matches(self, base: u8) -> bool {
        let bit = match base {
            b'A' => BASE_A,
            b'C' => BASE_C,
            b'G' => BASE_G,
            b'T' => BASE_T,
            b'U' => BASE_U,
            _ => 0,
        };
        self.0 & bit != 0
    }

    /// Accepted bases in `ACGTU` order.
    pub fn bases(self) -> Vec<u8> {
        CLASS_ORDER
            .iter()
            .filter(|(bit, _)| self.0 & bit != 0)
            .map(|&(_, letter)| letter)
            .collect()
    }

    fn to_regex_class(self) -> String {
        let mut class = String::with_capacity(7);
        class.push('[');
        for letter in self.bases() {
            class.push(letter as char);
        }
        class.push(']');
        class
    }
}

/// A compiled motif: one character class per position, plus the regex
/// built from those classes for scanning.
#[derive(Debug, Clone)]
pub struct Pattern {
    classes: Vec<IupacClass>,
    regex: Regex,
}

impl Pattern {
    /// Number of positions, which is also the length of every match.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub(crate) fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Regex source the pattern was built from, e.g. `[AG][CTU]`.
    pub fn as_regex_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Whether the pattern matches `sequence` (already uppercased) starting at `offset`.
    pub fn matches_at(&self, sequence: &[u8], offset: usize) -> bool {
        match sequence.get(offset..offset + self.len()) {
            Some(window) => self
                .classes
                .iter()
                .zip(window)
                .all(|(class, &base)| class.matches(base)),
            None => false,
        }
    }
}

/// Compile a motif string into a [`Pattern`].
///
/// Fails with [`AnnotateError::InvalidSymbol`] on the first character outside
/// the IUPAC alphabet and with [`AnnotateError::EmptyMotif`] on empty input.
pub fn compile(motif: &str) -> AnnotateResult<Pattern> {
    if motif.is_empty() {
        return Err(AnnotateError::EmptyMotif);
    }

    let mut classes = Vec::with_capacity(motif.len());
    for (position, symbol) in motif.chars().enumerate() {
        let class = u8::try_from(symbol)
            .ok()
            .and_then(IupacClass::from_symbol)
            .ok_or_else(|| AnnotateError::invalid_symbol(motif, symbol, position))?;
        classes.push(class);
    }

    let source: String = classes.iter().map(|c| c.to_regex_class()).collect();
    let regex = Regex::new(&source).map_err(|e| AnnotateError::PatternTooLarge {
        motif: motif.to_string(),
        reason: e.to_string(),
    })?;

    Ok(Pattern { classes, regex })
}
