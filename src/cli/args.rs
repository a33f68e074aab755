use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sheet-tl")]
#[command(about = "Translate a column of spreadsheet words with an AI chat model")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Args {
    /// CSV sheet to translate in place (row 1 holds the languages in A1 and B1)
    pub sheet: Option<PathBuf>,

    /// Selected word cells, a single column (e.g., C2:C20)
    #[arg(short = 'r', long, value_name = "RANGE")]
    pub range: Option<String>,

    /// The column right of the selection holds per-row context
    #[arg(long, conflicts_with = "no_context")]
    pub context: bool,

    /// There is no context column (skips the prompt)
    #[arg(long)]
    pub no_context: bool,

    /// Cell holding the source language [default: A1]
    #[arg(long, value_name = "CELL")]
    pub source_cell: Option<String>,

    /// Cell holding the target language [default: B1]
    #[arg(long, value_name = "CELL")]
    pub target_cell: Option<String>,

    /// Provider name from the config file
    #[arg(short = 'p', long)]
    pub provider: Option<String>,

    /// Model name
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Pause after each translated row, in milliseconds [default: 200]
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Suppress progress and status output
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log requests and per-row results to stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Args {
    /// The context-column answer given on the command line, if any.
    pub const fn context_answer(&self) -> Option<bool> {
        if self.context {
            Some(true)
        } else if self.no_context {
            Some(false)
        } else {
            None
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List configured providers
    Providers {
        /// Show details for a specific provider
        provider: Option<String>,
    },
}
