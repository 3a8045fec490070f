//! Loads the persisted BOM sheet into the in-memory [`Sheet`] model.

use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};

use crate::error::Result;
use crate::store::Sheet;

/// Reads the named worksheet from an existing workbook.
///
/// Returns `Ok(None)` when the workbook opens but holds no sheet of that
/// name, leaving the degraded-mode decision to the caller. Cell styling is
/// not read back; markers describe only the current run's deltas.
pub fn read_sheet(path: &Path, name: &str) -> Result<Option<Sheet>> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let Some(range_result) = workbook.worksheet_range(name) else {
        return Ok(None);
    };
    let range = range_result?;

    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let mut sheet = Sheet::new(name);
    for (row_offset, row) in range.rows().enumerate() {
        for (col_offset, cell) in row.iter().enumerate() {
            let value = cell_to_string(cell);
            if value.is_empty() {
                continue;
            }
            sheet.set_value(
                start_row as usize + row_offset,
                start_col as usize + col_offset,
                value,
            );
        }
    }

    Ok(Some(sheet))
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(value) => value.clone(),
        DataType::Float(value) => value.to_string(),
        DataType::Int(value) => value.to_string(),
        DataType::Bool(value) => value.to_string(),
        DataType::Empty => String::new(),
        other => other.to_string(),
    }
}
