//! Table types and the table block builder.

use serde::{Deserialize, Serialize};

/// A table, built from a raw row/cell grid.
///
/// Tables are atomic placement units: the flow engine never splits a
/// table's rows across a page boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table; row 0 is the header row
    pub rows: Vec<TableRow>,

    /// Cosmetic styling attached to the table
    #[serde(default)]
    pub style: TableStyle,
}

impl Table {
    /// Build a table from a raw row/cell grid.
    ///
    /// Cells are trimmed of surrounding whitespace. A row whose cells are
    /// all blank is dropped. A blank cell in a surviving row becomes a
    /// single space, never an empty string, so a renderer cannot collapse
    /// the cell to zero width. Returns `None` when no row survives.
    pub fn from_grid<S: AsRef<str>>(grid: &[Vec<S>]) -> Option<Self> {
        let mut rows = Vec::new();
        for raw_row in grid {
            let cells: Vec<String> = raw_row
                .iter()
                .map(|c| c.as_ref().trim().to_string())
                .collect();
            if cells.iter().all(|c| c.is_empty()) {
                continue;
            }
            let cells = cells
                .into_iter()
                .map(|c| if c.is_empty() { " ".to_string() } else { c })
                .collect();
            rows.push(TableRow {
                cells,
                is_header: rows.is_empty(),
            });
        }

        if rows.is_empty() {
            return None;
        }
        Some(Self {
            rows,
            style: TableStyle::default(),
        })
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on the first row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.cells.len()).unwrap_or(0)
    }

    /// Get the header row, if any.
    pub fn header(&self) -> Option<&TableRow> {
        self.rows.first().filter(|r| r.is_header)
    }

    /// Get body (non-header) rows.
    pub fn body(&self) -> &[TableRow] {
        let skip = usize::from(self.rows.first().is_some_and(|r| r.is_header));
        &self.rows[skip..]
    }

    /// Get a plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A table row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRow {
    /// Cell texts; always non-empty strings
    pub cells: Vec<String>,

    /// Whether this is the header row
    #[serde(default)]
    pub is_header: bool,
}

impl TableRow {
    /// Get a plain text representation of the row.
    pub fn plain_text(&self) -> String {
        self.cells.join("\t")
    }
}

/// Cosmetic table attributes for a downstream renderer.
///
/// The header row is visually distinct from body rows, and body rows
/// alternate background banding. These are carried on the block and play
/// no part in placement decisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableStyle {
    /// Header row background color (hex)
    pub header_background: String,

    /// Header row text color (hex)
    pub header_color: String,

    /// Header row uses a bold face
    pub header_bold: bool,

    /// Alternating body row backgrounds (hex), applied in order
    pub body_banding: [String; 2],

    /// Grid line color (hex)
    pub grid_color: String,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            header_background: "#808080".to_string(),
            header_color: "#F5F5F5".to_string(),
            header_bold: true,
            body_banding: ["#F5F5DC".to_string(), "#FFFFFF".to_string()],
            grid_color: "#000000".to_string(),
        }
    }
}
