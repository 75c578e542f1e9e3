//! Command line argument parsing for the homophony CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Homophony - homophone-based spelling mistakes for training corpora
#[derive(Parser, Debug, Clone)]
#[command(name = "homophony")]
#[command(about = "Generate homophone spelling mistakes for grammar-correction corpora")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct HomophonyArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format of command summaries
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Generator configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl HomophonyArgs {
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
    /// Print the phonetic key of each word
    Normalize(NormalizeArgs),

    /// Build the homonym index from a dictionary and print it as JSON
    Homonyms(HomonymsArgs),

    /// Generate training samples from corpus files
    Generate(GenerateArgs),
}

impl Command {
    /// Name of the subcommand, as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Normalize(_) => "normalize",
            Command::Homonyms(_) => "homonyms",
            Command::Generate(_) => "generate",
        }
    }
}

/// Arguments for printing phonetic keys
#[derive(Parser, Debug, Clone)]
pub struct NormalizeArgs {
    /// Words to normalize
    #[arg(value_name = "WORD", required = true)]
    pub words: Vec<String>,
}

/// Arguments for building the homonym index
#[derive(Parser, Debug, Clone)]
pub struct HomonymsArgs {
    /// Dictionary file, one word per line
    #[arg(short, long, env = "HOMOPHONY_DICTIONARY", value_name = "DICTIONARY")]
    pub dictionary: Option<PathBuf>,

    /// Write the index here instead of stdout
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    pub output: Option<PathBuf>,

    /// Number of threads to use
    #[arg(short, long)]
    pub threads: Option<usize>,
}

/// Arguments for generating training samples
#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    /// Corpus files, one paragraph per line
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Directory receiving one JSON-lines shard per input file
    #[arg(short, long, value_name = "OUTPUT_DIR")]
    pub output: PathBuf,

    /// Directory holding the homonym cache
    #[arg(long, env = "HOMOPHONY_DATA_DIR", value_name = "DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Dictionary used when the cache must be rebuilt
    #[arg(short, long, env = "HOMOPHONY_DICTIONARY", value_name = "DICTIONARY")]
    pub dictionary: Option<PathBuf>,

    /// Seed for reproducible output
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Number of threads to use
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Upper bound of the per-sentence mistake probability
    #[arg(long, value_name = "PROBABILITY")]
    pub max_mistake_probability: Option<f64>,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
