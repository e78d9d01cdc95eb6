//! Error handling for the motif-mark CLI

use motif_core::io::FastaError;
use motif_core::AnnotateError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for motif-mark CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Input/Output error: {message}")]
    Io { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid FASTA input: {message}")]
    Fasta { message: String },

    #[error("Invalid motif: {message}")]
    Motif { message: String },

    #[error("Annotation error: {message}")]
    Annotation { message: String },

    #[error("Rendering error: {message}")]
    Rendering { message: String },
}

impl CliError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io { message: message.into() }
    }

    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    pub fn fasta<S: Into<String>>(message: S) -> Self {
        Self::Fasta { message: message.into() }
    }

    pub fn motif<S: Into<String>>(message: S) -> Self {
        Self::Motif { message: message.into() }
    }

    pub fn annotation<S: Into<String>>(message: S) -> Self {
        Self::Annotation { message: message.into() }
    }

    pub fn rendering<S: Into<String>>(message: S) -> Self {
        Self::Rendering { message: message.into() }
    }
}

impl From<anyhow::Error> for CliError {
    /// Classify an error chain from a command into the closest CLI error.
    fn from(err: anyhow::Error) -> Self {
        let err = match err.downcast::<CliError>() {
            Ok(cli_err) => return cli_err,
            Err(err) => err,
        };
        let message = format!("{:#}", err);
        for cause in err.chain() {
            if let Some(e) = cause.downcast_ref::<AnnotateError>() {
                return match e {
                    AnnotateError::InvalidSymbol { .. }
                    | AnnotateError::EmptyMotif
                    | AnnotateError::PatternTooLarge { .. } => Self::motif(message),
                    AnnotateError::EmptyPalette | AnnotateError::InvalidColor { .. } => {
                        Self::config(message)
                    }
                    _ => Self::annotation(message),
                };
            }
            if cause.downcast_ref::<FastaError>().is_some() {
                return Self::fasta(message);
            }
            if let Some(e) = cause.downcast_ref::<toml::de::Error>() {
                return Self::config(format!("TOML parsing error: {}", e));
            }
        }
        Self::io(message)
    }
}

/// Provide helpful error messages and suggestions
pub fn format_error_with_suggestions(error: &CliError) -> String {
    let mut message = error.to_string();

    match error {
        CliError::FileNotFound { path } => {
            message.push_str(&format!(
                "\n\nSuggestions:\n\
                 • Check that the file path is correct: {}\n\
                 • Ensure you have read permissions for the file\n\
                 • Compressed FASTA must use the .gz extension",
                path.display()
            ));
        }

        CliError::Fasta { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Each record needs a '>' header line followed by sequence lines\n\
                 • Ensure the file is not empty or truncated",
            );
        }

        CliError::Motif { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Put one motif per line\n\
                 • Use only IUPAC symbols: A C G T U R Y S W K M B D H V N",
            );
        }

        CliError::Annotation { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Mark the exon of every sequence in uppercase and introns in lowercase",
            );
        }

        CliError::Config { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Check your motif-mark.toml configuration file\n\
                 • Use 'motif-mark config --example' to generate a sample configuration\n\
                 • Colors are written as \"#rrggbb\"",
            );
        }

        _ => {}
    }

    message
}

/// Print error with helpful suggestions and exit
pub fn print_error_and_exit(error: &CliError) -> ! {
    eprintln!("Error: {}", format_error_with_suggestions(error));
    std::process::exit(1);
}
