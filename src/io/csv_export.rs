//! Plain delimited-text export of the merged part summaries.
//!
//! The CSV is a side channel independent of the workbook reconciliation: it
//! reflects only the current extraction and is overwritten on every run.

use std::path::Path;

use csv::{QuoteStyle, WriterBuilder};

use crate::error::Result;
use crate::model::{Field, PartSummary};

/// Writes the summaries as fully quoted, comma-delimited records, one per
/// group, preceded by the header row.
pub fn write_summaries(path: &Path, summaries: &[PartSummary]) -> Result<()> {
    // The header is written explicitly so it appears even with no records.
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(Field::ALL.iter().map(|field| field.header()))?;
    for summary in summaries {
        writer.serialize(summary)?;
    }
    writer.flush()?;
    Ok(())
}
