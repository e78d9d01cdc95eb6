//! Error types for the annotation engine

use thiserror::Error;

/// Structural input errors raised while compiling motifs, annotating
/// sequences or laying out the diagram.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnnotateError {
    #[error("Invalid symbol '{symbol}' at position {position} in motif '{motif}'")]
    InvalidSymbol {
        motif: String,
        symbol: char,
        position: usize,
    },

    #[error("Empty motif definition")]
    EmptyMotif,

    #[error("Motif '{motif}' could not be compiled: {reason}")]
    PatternTooLarge { motif: String, reason: String },

    #[error("No exon found in sequence '{id}' (no uppercase bases)")]
    NoExonFound { id: String },

    #[error("Sequence '{id}' is empty")]
    EmptySequence { id: String },

    #[error("Sequence '{id}' has not been annotated")]
    NotAnnotated { id: String },

    #[error("Color palette is empty")]
    EmptyPalette,

    #[error("Invalid color '{value}': expected #RRGGBB")]
    InvalidColor { value: String },
}

impl AnnotateError {
    pub fn invalid_symbol<S: Into<String>>(motif: S, symbol: char, position: usize) -> Self {
        Self::InvalidSymbol {
            motif: motif.into(),
            symbol,
            position,
        }
    }

    pub fn no_exon<S: Into<String>>(id: S) -> Self {
        Self::NoExonFound { id: id.into() }
    }

    pub fn empty_sequence<S: Into<String>>(id: S) -> Self {
        Self::EmptySequence { id: id.into() }
    }

    pub fn not_annotated<S: Into<String>>(id: S) -> Self {
        Self::NotAnnotated { id: id.into() }
    }
}

/// Result type for engine operations
pub type AnnotateResult<T> = Result<T, AnnotateError>;
