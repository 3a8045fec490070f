//! End-to-end orchestration: netlist in, CSV export and reconciled workbook
//! out. The workbook write happens once, after the full reconciliation pass,
//! so a failure anywhere upstream leaves the previous persisted state intact.

use std::path::Path;

use tracing::{info, instrument, warn};

use crate::error::Result;
use crate::group;
use crate::io::{csv_export, excel_read, excel_write, netlist};
use crate::model::{BOM_SHEET, default_headers};
use crate::reconcile::{Session, SyncReport};
use crate::store::Sheet;

/// Behaviour switches for one synchronisation run.
#[derive(Debug, Clone, Copy)]
pub struct SyncOptions {
    /// Match and store footprints in translated form. When off, footprint
    /// equality is raw string equality.
    pub translate: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self { translate: true }
    }
}

/// Runs a full synchronisation: reads the netlist, groups it into part
/// summaries, exports them as CSV, and reconciles them into the workbook.
#[instrument(
    level = "info",
    skip_all,
    fields(netlist = %netlist.display(), workbook = %workbook.display())
)]
pub fn run(
    netlist: &Path,
    workbook: &Path,
    csv: &Path,
    options: SyncOptions,
) -> Result<SyncReport> {
    let components = netlist::read_components(netlist)?;
    info!(component_count = components.len(), "netlist loaded");

    let summaries = group::summarize(&components, options.translate);
    info!(part_count = summaries.len(), "components grouped");

    // Validate the store before producing any artifact, so a fatal
    // precondition failure modifies nothing on disk.
    let mut sheet = load_or_create_sheet(workbook)?;
    let mut session = Session::new(&mut sheet, options.translate)?;

    csv_export::write_summaries(csv, &summaries)?;

    session.begin();
    for part in &summaries {
        session.apply(part);
    }
    let report = session.finish();
    info!(
        new = report.new,
        changed = report.changed,
        obsolete = report.obsolete,
        "reconciliation finished"
    );

    excel_write::write_sheet(workbook, &sheet)?;
    Ok(report)
}

fn load_or_create_sheet(path: &Path) -> Result<Sheet> {
    if !path.exists() {
        info!("workbook not found, starting a fresh '{BOM_SHEET}' sheet");
        return Ok(Sheet::with_headers(&default_headers()));
    }
    match excel_read::read_sheet(path, BOM_SHEET)? {
        Some(sheet) => Ok(sheet),
        None => {
            warn!("workbook has no '{BOM_SHEET}' sheet, starting a fresh one");
            Ok(Sheet::with_headers(&default_headers()))
        }
    }
}
