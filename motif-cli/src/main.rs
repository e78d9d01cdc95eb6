use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod commands;
mod config;
mod error;

use config::Config;
use error::{print_error_and_exit, CliError};

#[derive(Parser)]
#[command(name = "motif-mark")]
#[command(about = "Motif Mark - motif and exon/intron diagrams for nucleotide sequences")]
#[command(version)]
#[command(long_about = "
Motif Mark draws one track per FASTA record: introns in lowercase, the exon in
uppercase, and a colored tick at every (overlapping) match of each IUPAC motif.

Examples:
  motif-mark mark -f Figure_1.fasta -m Fig_1_motifs.txt
  motif-mark mark -f Figure_1.fasta -m Fig_1_motifs.txt -o out/fig1 --format svg
  motif-mark mark -f Figure_1.fasta -m Fig_1_motifs.txt --layout-json fig1.json --parallel
  motif-mark oneline -i Figure_1.fasta -o Figure_1.fasta.oneline
  motif-mark config --example > motif-mark.toml
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of threads to use in parallel mode
    #[arg(short, long, global = true)]
    pub threads: Option<usize>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Annotate motifs and exons and draw the diagram
    Mark {
        /// Input FASTA file (exon uppercase, introns lowercase; .gz accepted)
        #[arg(short, long)]
        fasta: PathBuf,

        /// Motif file, one IUPAC motif per line
        #[arg(short, long)]
        motifs: PathBuf,

        /// Output path prefix (defaults to the title)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Image format(s) to write
        #[arg(long, default_value = "all")]
        format: OutputFormat,

        /// Also write the layout geometry as JSON
        #[arg(long)]
        layout_json: Option<PathBuf>,

        /// Figure title (defaults to the FASTA file stem)
        #[arg(long)]
        title: Option<String>,

        /// Annotate records in parallel
        #[arg(long)]
        parallel: bool,
    },

    /// Rewrite a FASTA file with one sequence line per record
    Oneline {
        /// Input FASTA file
        #[arg(short, long)]
        input: PathBuf,

        /// Output FASTA file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Use the default configuration instead of the loaded one
        #[arg(long)]
        example: bool,

        /// Write the configuration to this file instead of stdout
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    All,
}

fn setup_logging(verbose: u8, quiet: bool) -> Result<()> {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .try_init()
        .context("Failed to initialize logger")?;

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    // Set global thread count if specified
    if let Some(threads) = cli.threads.or(config.general.threads) {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to set thread count")?;
    }

    match cli.command {
        Commands::Mark {
            fasta,
            motifs,
            output,
            format,
            layout_json,
            title,
            parallel,
        } => {
            let written = commands::mark::execute(
                &config,
                fasta,
                motifs,
                output,
                format,
                layout_json,
                title,
                parallel,
            )?;
            for path in written {
                log::info!("Output: {}", path.display());
            }
        }

        Commands::Oneline { input, output } => {
            commands::oneline::execute(input, output)?;
        }

        Commands::Config { example, save } => {
            commands::config::execute(&config, example, save)?;
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = setup_logging(cli.verbose, cli.quiet) {
        eprintln!("Warning: {:#}", err);
    }

    if let Err(err) = run(cli) {
        print_error_and_exit(&CliError::from(err));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_mark_defaults() {
        let cli = Cli::try_parse_from(["motif-mark", "mark", "-f", "a.fasta", "-m", "m.txt"]).unwrap();
        match cli.command {
            Commands::Mark {
                fasta,
                output,
                format,
                title,
                parallel,
                ..
            } => {
                assert_eq!(fasta, PathBuf::from("a.fasta"));
                assert_eq!(output, None);
                assert_eq!(format, OutputFormat::All);
                assert_eq!(title, None);
                assert!(!parallel);
            }
            _ => panic!("expected mark"),
        }
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "motif-mark", "mark", "-f", "a.fa", "-m", "m.txt", "--format", "png", "-vv",
            "--config", "custom.toml", "--parallel",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(
            cli.command,
            Commands::Mark { format: OutputFormat::Png, parallel: true, .. }
        ));
    }

    #[test]
    fn test_parse_config_command() {
        let cli = Cli::try_parse_from(["motif-mark", "config", "--example", "--save", "m.toml"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config { example: true, save: Some(_) }
        ));
    }

    #[test]
    fn test_mark_requires_inputs() {
        assert!(Cli::try_parse_from(["motif-mark", "mark", "-f", "a.fa"]).is_err());
    }
}
