//! Row/column matrix of sheet cells.

use crate::utils::eq_folded;

/// A 2-D matrix of trimmed cell text in absolute sheet coordinates
/// (row 0 / column 0 is A1). Empty cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellGrid {
    rows: Vec<Vec<Option<String>>>,
}

impl CellGrid {
    pub fn new(rows: Vec<Vec<Option<String>>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| cell.map(|c| c.trim().to_string()).filter(|c| !c.is_empty()))
                    .collect()
            })
            .collect();
        Self { rows }
    }

    /// Build a grid from plain strings; empty strings become empty cells.
    pub fn from_strings<R, S>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(|c| Some(c.as_ref().to_string())).collect())
                .collect(),
        )
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|row| is_blank(row))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<String>]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn row(&self, index: usize) -> Option<&[Option<String>]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| cell(r, col))
    }

    /// Text of cell A1
    pub fn first_cell(&self) -> Option<&str> {
        self.cell(0, 0)
    }
}

/// Text of a cell in a row, `None` when empty or out of range
pub fn cell(row: &[Option<String>], col: usize) -> Option<&str> {
    row.get(col).and_then(|c| c.as_deref())
}

/// Text of a cell in a row, empty string when absent
pub fn cell_or_empty(row: &[Option<String>], col: Option<usize>) -> &str {
    col.and_then(|c| cell(row, c)).unwrap_or("")
}

pub fn is_blank(row: &[Option<String>]) -> bool {
    row.iter().all(Option::is_none)
}

/// Index of the first cell whose text equals `label` (case/accent-insensitive)
pub fn find_column(row: &[Option<String>], label: &str) -> Option<usize> {
    row.iter()
        .position(|c| c.as_deref().is_some_and(|text| eq_folded(text, label)))
}
