use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Columns beyond `XFD` are rejected, matching common spreadsheet limits.
pub const MAX_COLUMNS: usize = 16_384;

/// A single cell coordinate, zero-based internally.
///
/// Parsed from and displayed as A1 notation (`A1` is row 0, column 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letters(self.col), self.row + 1)
    }
}

impl FromStr for CellRef {
    type Err = ValidationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidCellRef(input.to_string());
        let trimmed = input.trim();

        // Letters first, then digits
        let letter_end = trimmed
            .chars()
            .take_while(char::is_ascii_alphabetic)
            .count();
        if letter_end == 0 {
            return Err(invalid());
        }

        let (col_str, row_str) = trimmed.split_at(letter_end);
        if row_str.is_empty() || !row_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let col = column_index(col_str)
            .filter(|&col| col < MAX_COLUMNS)
            .ok_or_else(invalid)?;
        let row = row_str
            .parse::<usize>()
            .ok()
            .and_then(|r| r.checked_sub(1))
            .ok_or_else(invalid)?;

        Ok(Self { row, col })
    }
}

/// Converts a column index to letters (0 -> A, 25 -> Z, 26 -> AA).
pub fn column_letters(col: usize) -> String {
    let mut result = String::new();
    let mut n = col;
    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}

/// Converts column letters to an index (A -> 0, AA -> 26). Case-insensitive.
pub fn column_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }

    letters
        .chars()
        .try_fold(0usize, |acc, c| {
            if !c.is_ascii_alphabetic() {
                return None;
            }
            let digit = (c.to_ascii_uppercase() as usize) - ('A' as usize) + 1;
            acc.checked_mul(26)?.checked_add(digit)
        })
        .map(|n| n - 1)
}
