//! Persists the in-memory [`Sheet`] model as an XLSX workbook, rendering
//! cell markers as fill colours for the human reviewer.

use std::path::Path;

use rust_xlsxwriter::{Color, Format, Workbook};

use crate::error::Result;
use crate::store::{Marker, Sheet};

const NEW_COLOR: Color = Color::RGB(0x00F200);
const CHANGED_COLOR: Color = Color::RGB(0xFFF200);
const TRANSLATED_COLOR: Color = Color::RGB(0x00B0F0);
const OBSOLETE_COLOR: Color = Color::RGB(0xF20000);

/// Writes the sheet to the given path. This is the run's only durable
/// mutation; everything upstream of it works on the in-memory model.
pub fn write_sheet(path: &Path, sheet: &Sheet) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&sheet.name)?;

    let header_format = Format::new().set_bold();
    let new_format = fill(NEW_COLOR);
    let changed_format = fill(CHANGED_COLOR);
    let translated_format = fill(TRANSLATED_COLOR);
    let obsolete_format = fill(OBSOLETE_COLOR);

    for col in 0..sheet.column_count() {
        let header = sheet.value(0, col);
        if header.is_empty() {
            continue;
        }
        worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
    }

    for row in 1..sheet.row_count() {
        for col in 0..sheet.column_count() {
            let value = sheet.value(row, col);
            let format = match sheet.marker(row, col) {
                Marker::None => None,
                Marker::New => Some(&new_format),
                Marker::Changed => Some(&changed_format),
                Marker::Translated => Some(&translated_format),
                Marker::Obsolete => Some(&obsolete_format),
            };
            match (value.is_empty(), format) {
                (true, None) => {}
                // An obsolete sync cell has a fill but no content.
                (true, Some(format)) => {
                    worksheet.write_blank(row as u32, col as u16, format)?;
                }
                (false, None) => {
                    worksheet.write_string(row as u32, col as u16, value)?;
                }
                (false, Some(format)) => {
                    worksheet.write_string_with_format(row as u32, col as u16, value, format)?;
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

fn fill(color: Color) -> Format {
    Format::new().set_background_color(color)
}
