//! FASTA input
//!
//! Parses multi-line FASTA with the needletail library and hands records to
//! the annotator as one header plus one sequence each. Sequence case is kept
//! as-is because it carries the exon/intron encoding.

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use needletail::parse_fastx_reader;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FastaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Empty file or no sequences found")]
    EmptyFile,
}

pub type FastaResult<T> = Result<T, FastaError>;

/// One normalized FASTA record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    /// Full header line without the leading `>`
    pub header: String,
    /// First whitespace-delimited token of the header
    pub id: String,
    /// Sequence joined onto one line, case preserved
    pub sequence: Vec<u8>,
}

impl FastaRecord {
    pub fn new<S: Into<String>>(header: S, sequence: Vec<u8>) -> Self {
        let header = header.into();
        let id = header
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();
        Self {
            header,
            id,
            sequence,
        }
    }
}

/// FASTA reader for sequence files
pub struct FastaReader;

impl FastaReader {
    /// Read every record from a file; `.gz` paths are decompressed.
    pub fn read_path<P: AsRef<Path>>(path: P) -> FastaResult<Vec<FastaRecord>> {
        let path = path.as_ref();
        let file = File::open(path)?;
        if path.extension().is_some_and(|ext| ext == "gz") {
            Self::read_reader(BufReader::new(GzDecoder::new(file)))
        } else {
            Self::read_reader(BufReader::new(file))
        }
    }

    /// Read every record from any readable source.
    pub fn read_reader<R: Read + Send>(reader: R) -> FastaResult<Vec<FastaRecord>> {
        let mut fastx_reader =
            parse_fastx_reader(reader).map_err(|e| FastaError::Parse(e.to_string()))?;

        let mut records = Vec::new();
        while let Some(record) = fastx_reader.next() {
            let record = record.map_err(|e| FastaError::Parse(e.to_string()))?;
            let header = String::from_utf8_lossy(record.id()).trim().to_string();
            records.push(FastaRecord::new(header, record.seq().to_vec()));
        }

        if records.is_empty() {
            return Err(FastaError::EmptyFile);
        }
        log::debug!("Read {} FASTA records", records.len());
        Ok(records)
    }
}

/// Write records as two-line FASTA (header, unwrapped sequence).
pub fn write_oneline<W: Write>(records: &[FastaRecord], writer: &mut W) -> FastaResult<()> {
    for record in records {
        writeln!(writer, ">{}", record.header)?;
        writer.write_all(&record.sequence)?;
        writeln!(writer)?;
    }
    Ok(())
}
