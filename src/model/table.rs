//! Table grid types.

use serde::{Deserialize, Serialize};

/// Headers and body rows extracted from one table.
///
/// Rows may be shorter or longer than the header row; nothing pads or
/// truncates them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    /// Header cell text, in document order
    pub headers: Vec<String>,

    /// Body rows, each in document order
    pub rows: Vec<Vec<String>>,
}

impl Grid {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a grid with headers and no rows.
    pub fn with_headers<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a row.
    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Add a row from text values.
    pub fn push_row<S: Into<String>>(&mut self, values: impl IntoIterator<Item = S>) {
        self.rows.push(values.into_iter().map(Into::into).collect());
    }

    /// Number of body rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (based on the header row).
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Whether the grid has no body rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether at least one body row has a cell.
    pub fn has_cells(&self) -> bool {
        self.rows.iter().any(|row| !row.is_empty())
    }

    /// Position of a header by exact name. Empty headers never match.
    pub fn header_index(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| !h.is_empty() && h == name)
    }

    /// Cell text at a row and column.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
    }

    /// Whether some rows do not match the header width.
    pub fn is_ragged(&self) -> bool {
        self.rows.iter().any(|r| r.len() != self.headers.len())
    }

    /// Tab-separated plain text representation.
    pub fn plain_text(&self) -> String {
        std::iter::once(&self.headers)
            .chain(self.rows.iter())
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
