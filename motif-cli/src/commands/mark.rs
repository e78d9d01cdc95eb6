//! Mark command implementation - annotate a FASTA file and draw the motif diagram

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use motif_core::io::{load_motifs_path, FastaReader};
use motif_core::Annotator;
use motif_render::{PngRenderer, Renderer, SvgRenderer};

use crate::config::Config;
use crate::error::CliError;
use crate::OutputFormat;

/// Run the full pipeline and return the paths of every file written.
#[allow(clippy::too_many_arguments)]
pub fn execute(
    config: &Config,
    fasta: PathBuf,
    motifs: PathBuf,
    output: Option<PathBuf>,
    format: OutputFormat,
    layout_json: Option<PathBuf>,
    title: Option<String>,
    parallel: bool,
) -> Result<Vec<PathBuf>> {
    log::info!("Input FASTA: {}", fasta.display());
    log::info!("Motif file: {}", motifs.display());

    for path in [&fasta, &motifs] {
        if !path.exists() {
            return Err(CliError::file_not_found(path.clone()).into());
        }
    }

    let motif_set = load_motifs_path(&motifs)?;
    let records = FastaReader::read_path(&fasta)
        .with_context(|| format!("Failed to read FASTA file: {}", fasta.display()))?;

    let title = title.unwrap_or_else(|| default_title(&fasta));
    let prefix = output.unwrap_or_else(|| PathBuf::from(&title));

    let parallel = parallel || config.general.parallel;
    let annotator = Annotator::new(motif_set, config.layout.clone()).with_parallel(parallel);
    let run = annotator
        .annotate(
            records.into_iter().map(|r| (r.id, r.sequence)),
            Some(title.as_str()),
        )
        .context("Annotation failed")?;

    if !run.skipped.is_empty() {
        log::warn!(
            "Skipped {} empty record(s): {}",
            run.skipped.len(),
            run.skipped.join(", ")
        );
    }
    log::info!(
        "Annotated {} records (parallel: {})",
        run.records.len(),
        parallel
    );

    let mut written = Vec::new();

    if let Some(json_path) = layout_json {
        let file = File::create(&json_path)
            .with_context(|| format!("Failed to create layout file: {}", json_path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &run.layout)
            .context("Failed to serialize layout")?;
        writer.flush()?;
        log::info!("Wrote layout JSON {}", json_path.display());
        written.push(json_path);
    }

    for renderer in renderers(config, format) {
        let path = with_suffix(&prefix, renderer.extension());
        renderer
            .render_to_file(&run.layout, &path)
            .map_err(|e| CliError::rendering(format!("{:#}", e)))?;
        written.push(path);
    }

    Ok(written)
}

fn renderers(config: &Config, format: OutputFormat) -> Vec<Box<dyn Renderer>> {
    let svg = || Box::new(SvgRenderer::new(config.render.clone())) as Box<dyn Renderer>;
    let png = || Box::new(PngRenderer::new(config.render.clone())) as Box<dyn Renderer>;
    match format {
        OutputFormat::Svg => vec![svg()],
        OutputFormat::Png => vec![png()],
        OutputFormat::All => vec![svg(), png()],
    }
}

/// File name of the FASTA input without its extension (and without `.gz`).
fn default_title(fasta: &Path) -> String {
    let path = match fasta.extension() {
        Some(ext) if ext == "gz" => fasta.with_extension(""),
        _ => fasta.to_path_buf(),
    };
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "motif-mark".to_string())
}

/// `prefix` + `.` + `ext`, keeping any dots already in the prefix.
fn with_suffix(prefix: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(prefix.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}
