//! Errors that stop a run before any translation request is sent.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please specify source language in {source_cell} and target language in {target_cell}")]
    MissingLanguages {
        source_cell: String,
        target_cell: String,
    },

    #[error("Please select a single column containing words to translate. (selection spans {columns} columns)")]
    NotSingleColumn { columns: usize },

    #[error("Invalid cell reference: '{0}' (expected A1 notation, e.g. C2)")]
    InvalidCellRef(String),

    #[error("Invalid range: '{0}' (expected A1 notation, e.g. C2:C20)")]
    InvalidRange(String),
}
