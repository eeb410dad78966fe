//! Command line argument parsing for Pelta CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Pelta - fake/real news classification
#[derive(Parser, Debug, Clone)]
#[command(name = "pelta")]
#[command(about = "Classify news articles as real or fake")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct PeltaArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Model artifact file
    #[arg(
        long,
        env = "PELTA_MODEL_PATH",
        default_value = "models/news_classifier.bin",
        global = true
    )]
    pub model_path: PathBuf,

    /// Pipeline configuration file (JSON)
    #[arg(long, env = "PELTA_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl PeltaArgs {
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
    /// Train a model and save it
    Train(TrainArgs),

    /// Classify an article given its title and content
    Classify(ClassifyArgs),

    /// Classify a piece of text
    Predict(PredictArgs),

    /// Show metadata of the saved model
    Describe,

    /// Report whether a model is available
    Health,

    /// Show the tokens a text normalizes to
    Normalize(NormalizeArgs),
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Corpus file: JSON array of {"text", "label"} records (default: built-in corpus)
    #[arg(short, long, value_name = "CORPUS_FILE")]
    pub corpus: Option<PathBuf>,

    /// Train even if a model already exists
    #[arg(short, long)]
    pub retrain: bool,
}

/// Arguments for classifying an article
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Article title
    #[arg(short, long, default_value = "")]
    pub title: String,

    /// Article content
    #[arg(short, long)]
    pub content: String,
}

/// Arguments for classifying text
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Text to classify; several values are classified separately
    #[arg(value_name = "TEXT", required = true)]
    pub texts: Vec<String>,
}

/// Arguments for normalizing text
#[derive(Parser, Debug, Clone)]
pub struct NormalizeArgs {
    /// Text to normalize
    #[arg(value_name = "TEXT")]
    pub text: String,
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
