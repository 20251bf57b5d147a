//! Command line argument parsing for the nearspan CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// nearspan - ordered proximity matching over a document file
#[derive(Parser, Debug, Clone)]
#[command(name = "nearspan")]
#[command(about = "Find ordered near matches of terms in a JSONL document file")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct NearSpanArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl NearSpanArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Find terms in order, within a slop
    Near(NearArgs),

    /// Find terms as an exact phrase
    Phrase(PhraseArgs),
}

/// Arguments for near matching
#[derive(Parser, Debug, Clone)]
pub struct NearArgs {
    /// Document file (JSONL, one object per line)
    #[arg(value_name = "DOCUMENT_FILE")]
    pub document_file: PathBuf,

    /// Terms, in the order they must appear
    #[arg(value_name = "TERMS", required = true, num_args = 2..)]
    pub terms: Vec<String>,

    /// Field to search in
    #[arg(long, default_value = "content")]
    pub field: String,

    /// Maximum total gap between the terms (overrides the config file)
    #[arg(short, long)]
    pub slop: Option<u32>,

    /// Query configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Maximum number of documents to report (overrides the config file)
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for phrase matching
#[derive(Parser, Debug, Clone)]
pub struct PhraseArgs {
    /// Document file (JSONL, one object per line)
    #[arg(value_name = "DOCUMENT_FILE")]
    pub document_file: PathBuf,

    /// Terms of the phrase
    #[arg(value_name = "TERMS", required = true, num_args = 2..)]
    pub terms: Vec<String>,

    /// Field to search in
    #[arg(long, default_value = "content")]
    pub field: String,

    /// Maximum number of documents to report
    #[arg(short, long)]
    pub limit: Option<usize>,
}

impl From<PhraseArgs> for NearArgs {
    fn from(args: PhraseArgs) -> Self {
        NearArgs {
            document_file: args.document_file,
            terms: args.terms,
            field: args.field,
            slop: Some(0),
            config: None,
            limit: args.limit,
        }
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
