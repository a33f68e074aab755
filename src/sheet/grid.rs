use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

use super::cell_ref::CellRef;
use crate::fs::atomic_write;

const MAX_SHEET_SIZE: u64 = 16 * 1024 * 1024; // 16MB

/// A CSV file viewed as a grid of text cells.
///
/// There is no header row: the first CSV record is sheet row 1. Rows may have
/// different lengths; cells outside the data read as empty.
#[derive(Debug, Clone)]
pub struct Sheet {
    path: PathBuf,
    rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn load(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to access sheet: {}", path.display()))?;

        let size = metadata.len();
        if size > MAX_SHEET_SIZE {
            bail!(
                "Sheet size ({:.1} MB) exceeds maximum allowed size (16 MB).",
                size as f64 / 1024.0 / 1024.0
            );
        }

        let bytes =
            fs::read(path).with_context(|| format!("Failed to read sheet: {}", path.display()))?;
        let rows = parse_rows(&bytes)
            .with_context(|| format!("Failed to parse sheet: {}", path.display()))?;

        tracing::debug!(path = %path.display(), rows = rows.len(), "loaded sheet");

        Ok(Self {
            path: path.to_path_buf(),
            rows,
        })
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Cell text, or `""` for cells beyond the data.
    pub fn get(&self, cell: CellRef) -> &str {
        self.rows
            .get(cell.row)
            .and_then(|row| row.get(cell.col))
            .map_or("", String::as_str)
    }

    /// Sets a cell, growing the grid as needed.
    pub fn set(&mut self, cell: CellRef, value: impl Into<String>) {
        if self.rows.len() <= cell.row {
            self.rows.resize_with(cell.row + 1, Vec::new);
        }
        let row = &mut self.rows[cell.row];
        if row.len() <= cell.col {
            row.resize(cell.col + 1, String::new());
        }
        row[cell.col] = value.into();
    }

    /// Reads up to `num_rows` cells of one column starting at `start_row`,
    /// stopping at the last row of the data.
    pub fn column_values(&self, start_row: usize, col: usize, num_rows: usize) -> Vec<String> {
        let available = self.num_rows().saturating_sub(start_row).min(num_rows);
        (start_row..start_row + available)
            .map(|row| self.get(CellRef::new(row, col)).to_string())
            .collect()
    }

    /// Writes the grid back to the file it was loaded from.
    pub fn save(&self) -> Result<()> {
        let bytes = self.to_csv_bytes()?;
        atomic_write(&self.path, &bytes)
    }

    fn to_csv_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());

        for row in &self.rows {
            // A record with no fields would be written as nothing at all
            if row.is_empty() {
                writer.write_record([""])?;
            } else {
                writer.write_record(row)?;
            }
        }

        writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to serialize sheet: {e}"))
    }
}

/// Parses CSV records into rows, keeping blank lines as empty rows so that
/// row numbers match the file's line layout.
fn parse_rows(bytes: &[u8]) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    // (start byte, newlines embedded in quoted fields) of the previous record
    let mut previous: Option<(usize, usize)> = None;

    for record in reader.records() {
        let record = record?;
        let start = record.position().map_or(0, |p| p.byte() as usize);

        let blank_lines = match previous {
            None => count_newlines(bytes.get(..start).unwrap_or_default()),
            Some((prev_start, embedded)) => {
                count_newlines(bytes.get(prev_start..start).unwrap_or_default())
                    .saturating_sub(1 + embedded)
            }
        };
        rows.extend(std::iter::repeat_with(Vec::new).take(blank_lines));

        let embedded: usize = record.iter().map(|field| count_newlines(field.as_bytes())).sum();
        rows.push(record.iter().map(str::to_string).collect());
        previous = Some((start, embedded));
    }

    Ok(rows)
}

fn count_newlines(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| b == b'\n').count()
}
