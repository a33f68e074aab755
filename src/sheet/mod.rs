//! CSV-backed spreadsheet: cell coordinates, selections and the cell grid.

mod cell_ref;
mod grid;
mod selection;

pub use cell_ref::{CellRef, column_index, column_letters};
pub use grid::Sheet;
pub use selection::{ColumnLayout, RowRange, Selection};
