use std::fmt;
use std::str::FromStr;

use super::cell_ref::{CellRef, column_letters};
use crate::error::ValidationError;

/// A rectangular block of cells, as typed by the user (`C2:C20`, `C2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub top_left: CellRef,
    pub bottom_right: CellRef,
}

impl Selection {
    pub const fn num_rows(&self) -> usize {
        self.bottom_right.row - self.top_left.row + 1
    }

    pub const fn num_columns(&self) -> usize {
        self.bottom_right.col - self.top_left.col + 1
    }

    /// Narrows the selection to a word column, rejecting any other shape.
    pub const fn single_column(&self) -> Result<RowRange, ValidationError> {
        if self.num_columns() != 1 {
            return Err(ValidationError::NotSingleColumn {
                columns: self.num_columns(),
            });
        }

        Ok(RowRange {
            start_row: self.top_left.row,
            word_column: self.top_left.col,
            num_rows: self.num_rows(),
        })
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.top_left == self.bottom_right {
            write!(f, "{}", self.top_left)
        } else {
            write!(f, "{}:{}", self.top_left, self.bottom_right)
        }
    }
}

impl FromStr for Selection {
    type Err = ValidationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidRange(input.to_string());

        let (first, second) = match input.split_once(':') {
            Some((a, b)) => (a, b),
            None => (input, input),
        };

        let a: CellRef = first.parse().map_err(|_| invalid())?;
        let b: CellRef = second.parse().map_err(|_| invalid())?;

        // Corners may be given in any order
        Ok(Self {
            top_left: CellRef::new(a.row.min(b.row), a.col.min(b.col)),
            bottom_right: CellRef::new(a.row.max(b.row), a.col.max(b.col)),
        })
    }
}

/// A validated single-column selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub start_row: usize,
    pub word_column: usize,
    pub num_rows: usize,
}

impl RowRange {
    /// Sheet row for the `index`-th selected row.
    pub const fn sheet_row(&self, index: usize) -> usize {
        self.start_row + index
    }

    pub const fn layout(&self, has_context: bool) -> ColumnLayout {
        ColumnLayout::new(self.word_column, has_context)
    }
}

/// Where words, context and translations live relative to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub word_column: usize,
    /// Only read when the user declared a context column.
    pub context_column: Option<usize>,
    pub output_column: usize,
}

impl ColumnLayout {
    pub const fn new(word_column: usize, has_context: bool) -> Self {
        if has_context {
            Self {
                word_column,
                context_column: Some(word_column + 1),
                output_column: word_column + 2,
            }
        } else {
            Self {
                word_column,
                context_column: None,
                output_column: word_column + 1,
            }
        }
    }

    pub fn output_letters(&self) -> String {
        column_letters(self.output_column)
    }
}
