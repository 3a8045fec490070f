use bom_sync::error::BomError;
use bom_sync::model::{PartSummary, default_headers};
use bom_sync::reconcile::Session;
use bom_sync::store::{Marker, Sheet};

fn part(value: &str, footprint: &str, refs: &str, qty: usize) -> PartSummary {
    PartSummary {
        refs: refs.to_string(),
        qty,
        value: value.to_string(),
        rating: String::new(),
        footprint: footprint.to_string(),
        description: String::new(),
        mpn: String::new(),
        farnell: String::new(),
        mouser: String::new(),
        dni: String::new(),
    }
}

fn fresh_sheet() -> Sheet {
    Sheet::with_headers(&default_headers())
}

/// Column indices under the default header layout.
const SYNC: usize = 0;
const REF: usize = 1;
const QTY: usize = 2;
const VALUE: usize = 3;
const FOOTPRINT: usize = 5;

fn reconcile(sheet: &mut Sheet, parts: &[PartSummary]) -> bom_sync::reconcile::SyncReport {
    let mut session = Session::new(sheet, true).expect("session built");
    session.begin();
    for part in parts {
        session.apply(part);
    }
    session.finish()
}

#[test]
fn unmatched_part_becomes_exactly_one_new_row() {
    let mut sheet = fresh_sheet();
    let report = reconcile(&mut sheet, &[part("4.7k", "R 0402", "R1, R2", 2)]);

    assert_eq!(report.new, 1);
    assert_eq!(sheet.row_count(), 2);
    assert_eq!(sheet.value(1, REF), "R1, R2");
    assert_eq!(sheet.value(1, QTY), "2");
    assert_eq!(sheet.value(1, VALUE), "4.7k");
    assert_eq!(sheet.value(1, FOOTPRINT), "R 0402");
    assert_eq!(sheet.value(1, SYNC), "1");
    assert_eq!(sheet.marker(1, VALUE), Marker::New);
    assert_eq!(sheet.marker(1, SYNC), Marker::New);
}

#[test]
fn reconciliation_is_idempotent() {
    let parts = vec![
        part("100n", "C 0402", "C1", 1),
        part("4.7k", "R 0402", "R1, R2", 2),
    ];

    let mut sheet = fresh_sheet();
    let first = reconcile(&mut sheet, &parts);
    assert_eq!(first.new, 2);

    let second = reconcile(&mut sheet, &parts);
    assert_eq!(second.new, 0);
    assert_eq!(second.changed, 0);
    assert_eq!(second.obsolete, 0);
    // Every row is confirmed again, with no leftover highlight anywhere:
    // the first run's "new" fills must not survive into the second pass.
    for row in 1..sheet.row_count() {
        assert_eq!(sheet.value(row, SYNC), "1");
        for col in [SYNC, REF, QTY, VALUE, FOOTPRINT] {
            assert_eq!(sheet.marker(row, col), Marker::None, "row {row} col {col}");
        }
    }
}

#[test]
fn changed_field_is_rewritten_and_marked() {
    let mut sheet = fresh_sheet();
    reconcile(&mut sheet, &[part("4.7k", "R 0402", "R1", 1)]);

    let mut updated = part("4.7k", "R 0402", "R1, R5", 2);
    updated.mpn = "RC0402JR-074K7L".to_string();
    let report = reconcile(&mut sheet, &[updated]);

    assert_eq!(report.new, 0);
    assert_eq!(report.changed, 1);
    assert_eq!(sheet.value(1, REF), "R1, R5");
    assert_eq!(sheet.marker(1, REF), Marker::Changed);
    assert_eq!(sheet.value(1, QTY), "2");
    assert_eq!(sheet.marker(1, QTY), Marker::Changed);
    // Untouched cells keep no marker.
    assert_eq!(sheet.marker(1, VALUE), Marker::None);
}

#[test]
fn footprint_drift_is_marked_translated() {
    // A hand-maintained row still carrying the verbose footprint form.
    let mut sheet = fresh_sheet();
    sheet.set_value(1, VALUE, "4.7k");
    sheet.set_value(1, FOOTPRINT, "Resistor_SMD:R_0402_1005Metric");
    sheet.set_value(1, REF, "R1");
    sheet.set_value(1, QTY, "1");

    let report = reconcile(&mut sheet, &[part("4.7k", "R 0402", "R1", 1)]);

    // Matched via translated equality, then the cell itself is updated.
    assert_eq!(report.new, 0);
    assert_eq!(sheet.value(1, FOOTPRINT), "R 0402");
    assert_eq!(sheet.marker(1, FOOTPRINT), Marker::Translated);
}

#[test]
fn stale_row_is_flagged_obsolete_but_kept() {
    let mut sheet = fresh_sheet();
    reconcile(&mut sheet, &[part("1k", "R 0402", "R9", 1)]);

    let report = reconcile(&mut sheet, &[part("100n", "C 0402", "C1", 1)]);

    assert_eq!(report.new, 1);
    assert_eq!(report.obsolete, 1);
    // The new row inserts above; the stale row keeps its content below.
    assert_eq!(sheet.value(1, VALUE), "100n");
    assert_eq!(sheet.value(2, VALUE), "1k");
    assert_eq!(sheet.value(2, SYNC), "");
    assert_eq!(sheet.marker(2, SYNC), Marker::Obsolete);
}

#[test]
fn new_rows_interleave_below_the_last_match() {
    let mut sheet = fresh_sheet();
    reconcile(
        &mut sheet,
        &[part("1k", "R 0402", "R1", 1), part("10k", "R 0402", "R3", 1)],
    );

    // A part matching row 1 followed by a brand new one: the new row lands
    // between the two existing rows instead of at the end.
    reconcile(
        &mut sheet,
        &[
            part("1k", "R 0402", "R1", 1),
            part("4.7k", "R 0402", "R2", 1),
            part("10k", "R 0402", "R3", 1),
        ],
    );

    let values: Vec<&str> = (1..sheet.row_count())
        .map(|row| sheet.value(row, VALUE))
        .collect();
    assert_eq!(values, ["1k", "4.7k", "10k"]);
}

#[test]
fn first_matching_row_wins_over_duplicates() {
    let mut sheet = fresh_sheet();
    for row in [1, 2] {
        sheet.set_value(row, VALUE, "1k");
        sheet.set_value(row, FOOTPRINT, "R 0402");
        sheet.set_value(row, REF, "R1");
    }

    let report = reconcile(&mut sheet, &[part("1k", "R 0402", "R1", 1)]);

    // Only the first duplicate is confirmed; the second, never revisited,
    // falls out as obsolete in the post-pass.
    assert_eq!(sheet.value(1, SYNC), "1");
    assert_eq!(sheet.value(2, SYNC), "");
    assert_eq!(sheet.marker(2, SYNC), Marker::Obsolete);
    assert_eq!(report.obsolete, 1);
}

#[test]
fn sheet_without_sync_column_reconciles_without_obsolescence() {
    let headers: Vec<String> = ["Ref", "Qty", "Value", "Footprint"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    let mut sheet = Sheet::with_headers(&headers);
    sheet.set_value(1, 2, "1k");
    sheet.set_value(1, 3, "R 0402");

    let report = reconcile(&mut sheet, &[part("100n", "C 0402", "C1", 1)]);

    // The stale 1k row cannot be detected without a sync column.
    assert_eq!(report.new, 1);
    assert_eq!(report.obsolete, 0);
}

#[test]
fn missing_required_column_is_fatal() {
    let headers: Vec<String> = ["Sync", "Ref", "Qty"].iter().map(|h| h.to_string()).collect();
    let mut sheet = Sheet::with_headers(&headers);

    let error = Session::new(&mut sheet, true).expect_err("session must fail");
    assert!(matches!(error, BomError::MissingColumn("Value")));
}

#[test]
fn column_lookup_stops_at_the_first_empty_header() {
    // A gap in the header row hides everything after it.
    let mut sheet = Sheet::new("BOM");
    sheet.set_value(0, 0, "Value");
    sheet.set_value(0, 2, "Footprint");

    let error = Session::new(&mut sheet, true).expect_err("session must fail");
    assert!(matches!(error, BomError::MissingColumn("Footprint")));
}

#[test]
fn raw_equality_treats_translated_forms_as_different() {
    let mut sheet = fresh_sheet();
    sheet.set_value(1, VALUE, "4.7k");
    sheet.set_value(1, FOOTPRINT, "Resistor_SMD:R_0402_1005Metric");

    let mut session = Session::new(&mut sheet, false).expect("session built");
    session.begin();
    session.apply(&part("4.7k", "R 0402", "R1", 1));
    let report = session.finish();

    // No translation: the verbose row does not match and goes obsolete.
    assert_eq!(report.new, 1);
    assert_eq!(report.obsolete, 1);
}
