//! The reconciliation engine. One [`Session`] reconciles the current part
//! summaries against the persisted sheet: matching rows are confirmed and
//! field-synced in place, unmatched summaries become new rows placed after
//! the last touched row, and rows the pass never revisits are flagged
//! obsolete. The sheet itself is never shrunk; removal is left to a human.

use tracing::{info, warn};

use crate::error::Result;
use crate::model::{Field, PartSummary, SYNC_COLUMN};
use crate::normalize::translate_footprint;
use crate::store::{ColumnLookup, Marker, Sheet};

/// Counters summarising one reconciliation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Rows inserted for parts with no existing match.
    pub new: usize,
    /// Existing rows with at least one field rewritten.
    pub changed: usize,
    /// Rows flagged as absent from the current extraction.
    pub obsolete: usize,
}

/// One reconciliation pass over a sheet.
///
/// The session owns the column lookup, the footprint equality mode, and the
/// last-placement cursor, so independent sessions never share state.
#[derive(Debug)]
pub struct Session<'a> {
    sheet: &'a mut Sheet,
    columns: ColumnLookup,
    value_col: usize,
    footprint_col: usize,
    translate: bool,
    /// Row index of the most recently matched or inserted row; new rows go
    /// directly below it. Starts at the header.
    last_placement: usize,
    report: SyncReport,
}

impl<'a> Session<'a> {
    /// Builds a session for the sheet, failing when the header lacks the
    /// required `Value` or `Footprint` column. A missing sync column is only
    /// a warning: the run proceeds without obsolescence detection.
    pub fn new(sheet: &'a mut Sheet, translate: bool) -> Result<Self> {
        let columns = ColumnLookup::from_header(sheet)?;
        if columns.sync().is_none() {
            warn!(
                sheet = %sheet.name,
                "no '{SYNC_COLUMN}' column; obsolete entries cannot be detected"
            );
        }
        // Presence of both columns is checked by `ColumnLookup::from_header`.
        let value_col = columns.get("Value").unwrap_or_default();
        let footprint_col = columns.get("Footprint").unwrap_or_default();
        Ok(Self {
            sheet,
            columns,
            value_col,
            footprint_col,
            translate,
            last_placement: 0,
            report: SyncReport::default(),
        })
    }

    /// Pre-pass: drops every data-cell marker left over from an earlier
    /// pass, then marks every row unconfirmed by clearing the sync column so
    /// the per-part pass can re-confirm the rows it touches.
    pub fn begin(&mut self) {
        self.sheet.clear_markers();
        let Some(sync) = self.columns.sync() else {
            return;
        };
        for row in 1..self.sheet.row_count() {
            self.sheet.set_value(row, sync, "");
        }
    }

    /// Reconciles one part summary against the sheet.
    pub fn apply(&mut self, part: &PartSummary) {
        for row in 1..self.sheet.row_count() {
            if self.sheet.value(row, self.value_col) != part.value {
                continue;
            }
            if !self.footprints_equal(self.sheet.value(row, self.footprint_col), &part.footprint) {
                continue;
            }

            // First matching row wins; duplicates are left to the post-pass.
            self.update_row(row, part);
            self.last_placement = row;
            return;
        }

        self.insert_row(part);
    }

    /// Post-pass: flags every still-unconfirmed row that holds content as
    /// obsolete, leaving its values intact for the reviewer. Returns the
    /// run's counters.
    pub fn finish(mut self) -> SyncReport {
        let Some(sync) = self.columns.sync() else {
            return self.report;
        };

        for row in 1..self.sheet.row_count() {
            if !self.sheet.value(row, sync).trim().is_empty() {
                continue;
            }
            let value = self.sheet.value(row, self.value_col);
            let footprint = self.sheet.value(row, self.footprint_col);
            if value.is_empty() && footprint.is_empty() {
                continue;
            }
            warn!(value, footprint, "obsolete component");
            self.sheet.set_marker(row, sync, Marker::Obsolete);
            self.report.obsolete += 1;
        }

        self.report
    }

    fn footprints_equal(&self, stored: &str, current: &str) -> bool {
        if self.translate {
            translate_footprint(stored) == current
        } else {
            stored == current
        }
    }

    /// Confirms a matched row and rewrites every differing field.
    fn update_row(&mut self, row: usize, part: &PartSummary) {
        if let Some(sync) = self.columns.sync() {
            self.sheet.set_value(row, sync, "1");
            self.sheet.set_marker(row, sync, Marker::None);
        }

        let mut first_change = true;
        for field in Field::ALL {
            let Some((col, new_value)) = self.comparable_field(field, part) else {
                continue;
            };

            let old_value = self.sheet.value(row, col).trim().to_string();
            if old_value == new_value {
                continue;
            }

            if first_change {
                first_change = false;
                info!(
                    value = %part.value,
                    footprint = %part.footprint,
                    "change(s) found for component"
                );
                self.report.changed += 1;
            }
            info!(
                field = field.header(),
                old = %old_value,
                new = %new_value,
                "field changed"
            );

            // A footprint mismatch under active translation can only come
            // from normalization drift: the match itself already required
            // translated equality.
            let marker = if field == Field::Footprint && self.translate {
                Marker::Translated
            } else {
                Marker::Changed
            };
            self.sheet.set_value(row, col, new_value);
            self.sheet.set_marker(row, col, marker);
        }
    }

    /// Places a summary with no existing match as a fresh row below the
    /// last-placement cursor.
    fn insert_row(&mut self, part: &PartSummary) {
        info!(
            value = %part.value,
            footprint = %part.footprint,
            "new component"
        );

        self.last_placement += 1;
        if self.sheet.row_count() <= self.last_placement {
            // Past the current extent: materialise rows up to the cursor,
            // which appends at the end instead of inserting.
            while self.sheet.row_count() <= self.last_placement {
                self.sheet.push_row();
            }
        } else {
            // Inside the extent: insert, shifting later rows down, so new
            // parts interleave in sorted position.
            self.sheet.insert_row(self.last_placement);
        }

        let row = self.last_placement;
        for field in Field::ALL {
            let Some((col, new_value)) = self.comparable_field(field, part) else {
                continue;
            };
            self.sheet.set_value(row, col, new_value);
            self.sheet.set_marker(row, col, Marker::New);
        }

        if let Some(sync) = self.columns.sync() {
            self.sheet.set_value(row, sync, "1");
            self.sheet.set_marker(row, sync, Marker::New);
        }

        self.report.new += 1;
    }

    /// Resolves a field to its column and comparable value. Fields with an
    /// empty trimmed value or no matching column are skipped: value absence
    /// is not a change, and the store may carry a subset of known fields.
    fn comparable_field(&self, field: Field, part: &PartSummary) -> Option<(usize, String)> {
        let new_value = part.field_value(field);
        if new_value.is_empty() {
            return None;
        }
        let col = self.columns.get(field.header())?;
        let new_value = if field == Field::Footprint && self.translate {
            translate_footprint(&new_value)
        } else {
            new_value
        };
        Some((col, new_value))
    }
}
