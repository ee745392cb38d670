//! Clap argument definitions for the `vodsearch` CLI.

use clap::{ArgAction, Args, Parser, Subcommand};
use vodsearch_index::QueryKind;

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "vodsearch")]
#[command(about = "Find what was said, and when, across VOD transcripts")]
pub struct Cli {
    /// Log more (-v for load details, -vv for per-query tracing)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output mode flags for `vodsearch search`.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output the raw result as JSON
    #[arg(long, conflicts_with_all = ["list", "timeline"])]
    pub json: bool,

    /// Output one line per video with its clip count
    #[arg(long, conflicts_with = "timeline")]
    pub list: bool,

    /// Output clip counts per upload date, oldest first
    #[arg(long)]
    pub timeline: bool,
}

/// Rendering chosen by the output flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Clips grouped per video.
    Full,
    /// Per-video counts.
    List,
    /// Per-day counts.
    Timeline,
    /// Serialized result.
    Json,
}

impl OutputArgs {
    /// The selected mode. The flags are mutually exclusive.
    pub fn mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.list {
            OutputMode::List
        } else if self.timeline {
            OutputMode::Timeline
        } else {
            OutputMode::Full
        }
    }
}

/// Arguments for `vodsearch search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Word or phrase; several arguments are joined with spaces
    #[arg(required = true)]
    pub query: Vec<String>,

    /// Look the query up in the word index, even if it contains spaces
    #[arg(long, conflicts_with = "phrase")]
    pub word: bool,

    /// Scan transcripts for the query, even if it is a single word
    #[arg(long)]
    pub phrase: bool,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

impl SearchCommand {
    /// The query as one string.
    pub fn joined_query(&self) -> String {
        self.query.join(" ")
    }

    /// The lookup forced by flags, if any.
    pub fn forced_kind(&self) -> Option<QueryKind> {
        if self.word {
            Some(QueryKind::Word)
        } else if self.phrase {
            Some(QueryKind::Phrase)
        } else {
            None
        }
    }
}

/// Arguments for `vodsearch top`.
#[derive(Args, Debug, Clone)]
pub struct TopCommand {
    /// Number of words to list [default: output.top_limit]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `vodsearch init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.vodsearch.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `vodsearch` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Find clips where a word or phrase was said
    #[command(after_help = "\
QUERY KINDS:
  word              Looked up in the precomputed word index (case-insensitive)
  two words         Anything with a space is matched literally in the transcripts

EXAMPLES:
  vodsearch search speedrunning
  vodsearch search love speedrunning
  vodsearch search --phrase 'what?!'
  vodsearch search poggers --timeline")]
    Search(SearchCommand),

    /// List the most-mentioned indexed words
    Top(TopCommand),

    /// Show configuration, corpus location and corpus statistics
    Status,

    /// Show effective configuration settings
    Config,

    /// Initialize vodsearch configuration in current directory
    Init(InitCommand),
}
