//! In-memory model of the persisted BOM sheet: string cells with a visual
//! marker each, plus the header-driven column lookup. IO adapters move this
//! model to and from the workbook file; the reconciliation engine mutates it.

use std::collections::HashMap;

use crate::error::{BomError, Result};
use crate::model::{BOM_SHEET, SYNC_COLUMN};

/// Visual provenance marker attached to a cell, rendered as a fill colour
/// when the sheet is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Marker {
    /// No highlight.
    #[default]
    None,
    /// Cell written while inserting a new row.
    New,
    /// Cell whose value differed from the current extraction.
    Changed,
    /// Footprint cell rewritten only because of normalization drift.
    Translated,
    /// Sync cell of a row absent from the current extraction.
    Obsolete,
}

/// One cell: a plain string value plus its marker.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    pub value: String,
    pub marker: Marker,
}

/// A rectangular-ish sheet; row 0 is the header. Rows may be ragged, cell
/// accessors pad on write and treat absent cells as empty on read.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// Creates an empty sheet with no rows at all.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Creates a fresh store sheet holding only the given header row.
    pub fn with_headers(headers: &[String]) -> Self {
        let mut sheet = Self::new(BOM_SHEET);
        for (col, header) in headers.iter().enumerate() {
            sheet.set_value(0, col, header);
        }
        sheet
    }

    /// Number of rows, header included.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Cell value, or the empty string when the cell does not exist.
    pub fn value(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .map(|cell| cell.value.as_str())
            .unwrap_or("")
    }

    /// Cell marker, `Marker::None` when the cell does not exist.
    pub fn marker(&self, row: usize, col: usize) -> Marker {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .map(|cell| cell.marker)
            .unwrap_or_default()
    }

    /// Writes a cell value, materialising the row and padding as needed.
    pub fn set_value(&mut self, row: usize, col: usize, value: impl Into<String>) {
        self.cell_mut(row, col).value = value.into();
    }

    /// Writes a cell marker, materialising the row and padding as needed.
    pub fn set_marker(&mut self, row: usize, col: usize, marker: Marker) {
        self.cell_mut(row, col).marker = marker;
    }

    /// Clears every marker on the data rows, leaving values untouched.
    /// Markers describe one run's deltas, so each pass starts from none.
    pub fn clear_markers(&mut self) {
        for cells in self.rows.iter_mut().skip(1) {
            for cell in cells {
                cell.marker = Marker::None;
            }
        }
    }

    /// Inserts a blank row before `row`, shifting later rows down.
    pub fn insert_row(&mut self, row: usize) {
        self.rows.insert(row.min(self.rows.len()), Vec::new());
    }

    /// Appends a blank row at the end and returns its index.
    pub fn push_row(&mut self) -> usize {
        self.rows.push(Vec::new());
        self.rows.len() - 1
    }

    fn cell_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        while self.rows.len() <= row {
            self.rows.push(Vec::new());
        }
        let cells = &mut self.rows[row];
        while cells.len() <= col {
            cells.push(Cell::default());
        }
        &mut cells[col]
    }
}

/// Column-header-to-index mapping built once from the header row.
#[derive(Debug, Clone)]
pub struct ColumnLookup {
    columns: HashMap<String, usize>,
}

impl ColumnLookup {
    /// Scans the header row left to right, stopping at the first empty cell.
    ///
    /// `Value` and `Footprint` must both be present; without them the store
    /// is unusable and reconciliation cannot start.
    pub fn from_header(sheet: &Sheet) -> Result<Self> {
        let mut columns = HashMap::new();
        let mut col = 0;
        loop {
            let header = sheet.value(0, col);
            if header.is_empty() {
                break;
            }
            columns.insert(header.to_string(), col);
            col += 1;
        }

        let lookup = Self { columns };
        for required in ["Value", "Footprint"] {
            if lookup.get(required).is_none() {
                return Err(BomError::MissingColumn(required));
            }
        }
        Ok(lookup)
    }

    /// Index of the named column, if the header declares it.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.columns.get(name).copied()
    }

    /// Index of the sync marker column, when the store carries one.
    pub fn sync(&self) -> Option<usize> {
        self.get(SYNC_COLUMN)
    }
}
