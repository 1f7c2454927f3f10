//! CLI interface for the resume ranker

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-ranker")]
#[command(about = "Extract structured profiles from resumes and rank candidates against job descriptions")]
#[command(long_about = "Parse PDF and DOCX resumes into skills, education and experience, vectorize them with TF-IDF or Model2Vec embeddings, and rank candidates for a job with explainable match breakdowns")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format: console, json, markdown
    #[arg(short, long, global = true, value_parser = parse_output_format)]
    pub output: Option<OutputFormat>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the plain text of a PDF or DOCX file
    Extract {
        file: PathBuf,
    },

    /// Extract a structured profile from a file without storing it
    Parse {
        file: PathBuf,

        /// Treat the file as a job description (no contact details)
        #[arg(long)]
        job: bool,
    },

    /// Parse, vectorize and store a resume
    AddResume {
        file: PathBuf,

        /// Owner (user) id of the candidate
        #[arg(long)]
        owner: String,

        /// Candidate display name
        #[arg(long)]
        name: Option<String>,
    },

    /// Parse, vectorize and store a job description
    AddJob {
        /// Read the description from a PDF or DOCX file
        #[arg(long, conflicts_with = "text", required_unless_present = "text")]
        file: Option<PathBuf>,

        /// Description text given inline
        #[arg(long)]
        text: Option<String>,

        /// Owner (recruiter) id
        #[arg(long)]
        owner: String,

        #[arg(long)]
        title: String,

        #[arg(long)]
        company: Option<String>,
    },

    /// Rank stored candidates for a job
    Rank {
        job_id: String,

        /// Show at most this many candidates
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Explain how one candidate matches one job
    Explain {
        candidate_id: String,
        job_id: String,
    },

    /// TF-IDF model management
    Model {
        #[command(subcommand)]
        action: ModelAction,
    },

    /// Language analysis lexicon management
    Lexicon {
        #[command(subcommand)]
        action: LexiconAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ModelAction {
    /// Fit a new TF-IDF generation on stored records plus extra corpus files,
    /// then re-vectorize every stored record
    Fit {
        /// Additional PDF or DOCX documents to include in the corpus
        #[arg(long, num_args = 1..)]
        corpus: Vec<PathBuf>,
    },

    /// Show the active vectorizer and model version
    Info,
}

#[derive(Subcommand)]
pub enum LexiconAction {
    /// Write the bundled English lexicon to the configured path
    Install {
        /// Overwrite an existing lexicon
        #[arg(short, long)]
        force: bool,
    },

    /// Show the installed lexicon
    Info,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}
