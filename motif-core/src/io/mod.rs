//! Input parsing for sequences and motif lists

pub mod fasta;
pub mod motifs;

pub use fasta::{write_oneline, FastaError, FastaReader, FastaRecord};
pub use motifs::{load_motifs_path, parse_motifs};
