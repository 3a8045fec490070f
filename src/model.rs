use std::collections::BTreeMap;

use serde::Serialize;

/// Values that mark a part as excluded from the physical build. A part whose
/// value matches one of these sentinels never reaches the BOM.
pub const DO_NOT_PLACE_VALUES: [&str; 5] = ["DNI", "DNP", "LOGO", "mousebite", "inf"];

/// Sheet name holding the persisted BOM inside the workbook.
pub const BOM_SHEET: &str = "BOM";

/// Header of the per-row sync marker column.
pub const SYNC_COLUMN: &str = "Sync";

/// One component instance extracted from the netlist. Multiple components may
/// share identical electrical characteristics and differ only by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Reference designator, e.g. `R12`.
    pub reference: String,
    /// Human-written magnitude or part value, e.g. `4.7k`.
    pub value: String,
    /// Library-qualified footprint identifier as exported.
    pub footprint: String,
    /// Free-text description from the library source.
    pub description: String,
    /// Remaining named fields (MPN, Farnell, Mouser, Rating, DNI, ...).
    pub fields: BTreeMap<String, String>,
}

impl Component {
    /// Returns the named extra field, or the empty string when absent.
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }
}

/// The closed set of columns the tool emits, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Ref,
    Qty,
    Value,
    Rating,
    Footprint,
    Description,
    Mpn,
    Farnell,
    Mouser,
    Dni,
}

impl Field {
    /// Every emitted field in output column order.
    pub const ALL: [Field; 10] = [
        Field::Ref,
        Field::Qty,
        Field::Value,
        Field::Rating,
        Field::Footprint,
        Field::Description,
        Field::Mpn,
        Field::Farnell,
        Field::Mouser,
        Field::Dni,
    ];

    /// Column header text used both in the workbook and the CSV export.
    pub fn header(self) -> &'static str {
        match self {
            Field::Ref => "Ref",
            Field::Qty => "Qty",
            Field::Value => "Value",
            Field::Rating => "Rating",
            Field::Footprint => "Footprint",
            Field::Description => "Description",
            Field::Mpn => "MPN",
            Field::Farnell => "Farnell",
            Field::Mouser => "Mouser",
            Field::Dni => "DNI",
        }
    }
}

/// Header row written into a freshly created BOM sheet: the sync marker
/// column followed by every emitted field. Reordering columns in a persisted
/// sheet is safe (lookup is by name), renaming `Value`/`Footprint` is not.
pub fn default_headers() -> Vec<String> {
    let mut headers = vec![SYNC_COLUMN.to_string()];
    headers.extend(Field::ALL.iter().map(|field| field.header().to_string()));
    headers
}

/// Merged record representing one group of physically identical components.
///
/// Serializes in [`Field::ALL`] order under the column header names, which
/// is what the CSV export relies on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartSummary {
    /// Comma-joined reference designators of every member.
    #[serde(rename = "Ref")]
    pub refs: String,
    /// Number of grouped components; always equals the reference count.
    #[serde(rename = "Qty")]
    pub qty: usize,
    #[serde(rename = "Value")]
    pub value: String,
    /// Union of the rating tokens observed across the group.
    #[serde(rename = "Rating")]
    pub rating: String,
    /// Group footprint; already translated when translation is active.
    #[serde(rename = "Footprint")]
    pub footprint: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "MPN")]
    pub mpn: String,
    #[serde(rename = "Farnell")]
    pub farnell: String,
    #[serde(rename = "Mouser")]
    pub mouser: String,
    #[serde(rename = "DNI")]
    pub dni: String,
}

impl PartSummary {
    /// Returns the value of the given field, already trimmed. `Qty` renders
    /// as a plain integer.
    pub fn field_value(&self, field: Field) -> String {
        let raw = match field {
            Field::Ref => &self.refs,
            Field::Qty => return self.qty.to_string(),
            Field::Value => &self.value,
            Field::Rating => &self.rating,
            Field::Footprint => &self.footprint,
            Field::Description => &self.description,
            Field::Mpn => &self.mpn,
            Field::Farnell => &self.farnell,
            Field::Mouser => &self.mouser,
            Field::Dni => &self.dni,
        };
        raw.trim().to_string()
    }

    /// True when the part must never reach the BOM: sentinel value, value
    /// prefixed with `DNI`, or a non-empty do-not-install field.
    pub fn is_do_not_place(&self) -> bool {
        let value = self.value.trim();
        DO_NOT_PLACE_VALUES.contains(&value)
            || value.starts_with("DNI")
            || !self.dni.trim().is_empty()
    }
}
