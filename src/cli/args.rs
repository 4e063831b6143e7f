//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, item::ItemCommands, place::PlaceCommands, search::SearchArgs,
};

#[derive(Parser)]
#[command(name = "storeman")]
#[command(author, version, about = "Inventory manager for storage places and items")]
#[command(
    long_about = "Catalog storage places (boxes, shelves) and the items kept in them, persisted in a local SQLite database."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format (default: tsv, or the configured default)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Database file (default: ./storeman.db, or the configured path)
    #[arg(long, short = 'd', global = true, env = "STOREMAN_DB")]
    pub database: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Storage place management (boxes, shelves, ...)
    #[command(subcommand)]
    Place(PlaceCommands),

    /// Item management
    #[command(subcommand)]
    Item(ItemCommands),

    /// Search items by name substring
    Search(SearchArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Output format for list commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns for terminals
    Tsv,
    /// RFC 4180 CSV for spreadsheets
    Csv,
    /// Markdown table
    Md,
    /// JSON array
    Json,
    /// Bare ids, one per line (for piping)
    Id,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tsv" => Ok(OutputFormat::Tsv),
            "csv" => Ok(OutputFormat::Csv),
            "md" => Ok(OutputFormat::Md),
            "json" => Ok(OutputFormat::Json),
            "id" => Ok(OutputFormat::Id),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}
