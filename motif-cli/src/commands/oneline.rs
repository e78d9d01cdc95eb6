//! Oneline command implementation - rewrite a FASTA file with unwrapped sequences

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use motif_core::io::{write_oneline, FastaReader};

use crate::error::CliError;

/// Normalize `input` into two-line records at `output`; returns the record count.
pub fn execute(input: PathBuf, output: PathBuf) -> Result<usize> {
    if !input.exists() {
        return Err(CliError::file_not_found(input).into());
    }

    let records = FastaReader::read_path(&input)
        .with_context(|| format!("Failed to read FASTA file: {}", input.display()))?;

    let file = File::create(&output)
        .with_context(|| format!("Failed to create output file: {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    write_oneline(&records, &mut writer)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    writer.flush()?;

    log::info!(
        "Wrote {} records from {} to {}",
        records.len(),
        input.display(),
        output.display()
    );
    Ok(records.len())
}
