//! # sheet-tl - Spreadsheet Column Translation
//!
//! `sheet-tl` translates a column of words in a CSV sheet using an
//! OpenAI-compatible chat completion endpoint, writing each translation into
//! the column next to the words (or next to an optional context column).
//!
//! ## Quick Start
//!
//! ```bash
//! # A1 = source language, B1 = target language, words in C2:C20
//! export OPENAI_API_KEY=sk-...
//! sheet-tl words.csv --range C2:C20
//!
//! # Column D holds per-row context, translations go to column E
//! sheet-tl words.csv --range C2:C20 --context
//! ```
//!
//! Rows are translated one at a time with a short pause between requests.
//! A failed row gets an `ERROR: ...` marker in its output cell and the run
//! continues with the next row.
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/sheet-tl/config.toml`:
//!
//! ```toml
//! [sheet_tl]
//! provider = "openai"
//! delay_ms = 200
//!
//! [providers.openai]
//! endpoint = "https://api.openai.com"
//! api_key_env = "OPENAI_API_KEY"
//! model = "gpt-4-turbo"
//! ```

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and provider settings.
pub mod config;

/// Errors that stop a run before any request is sent.
pub mod error;

/// File system utilities.
pub mod fs;

/// Global output configuration (quiet mode, colors, stderr/stdout routing).
pub mod output;

/// XDG-style path utilities for configuration.
pub mod paths;

/// The sequential row-processing loop and its pacing.
pub mod processor;

/// CSV-backed spreadsheet access.
pub mod sheet;

/// Translation client for OpenAI-compatible APIs.
pub mod translation;

/// Terminal UI components (progress bar, prompts, colors).
pub mod ui;
