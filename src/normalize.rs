//! Normalizers shared by the grouper and the reconciliation engine: a value
//! comparator aware of engineering-notation suffixes, and a footprint
//! translation that strips library verbosity while keeping packages distinct.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9.]+)\s*([^0-9]?)").unwrap());

static PASSIVE_PACKAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*\s[0-9]+)\s+[0-9]+[Mm]etric$").unwrap());

/// Parses a magnitude string like `4.7k` or `100n` into its numeric value.
///
/// The leading numeral may be followed by a single engineering-notation
/// suffix spanning yocto (1e-24) through Yotta (1e24); both `u` and `µ` mean
/// micro, both `k` and `K` mean kilo. An unknown suffix multiplies by 1.
/// Returns `None` when the string holds no parseable numeral.
pub fn to_numeric(magnitude: &str) -> Option<f64> {
    let captures = NUMERIC.captures(magnitude)?;
    let number: f64 = captures[1].parse().ok()?;
    let multiplier = match &captures[2] {
        "y" => 1e-24,
        "z" => 1e-21,
        "a" => 1e-18,
        "f" => 1e-15,
        "p" => 1e-12,
        "n" => 1e-9,
        "µ" | "u" => 1e-6,
        "m" => 1e-3,
        "c" => 1e-2,
        "d" => 1e-1,
        "h" => 1e2,
        "k" | "K" => 1e3,
        "M" => 1e6,
        "G" => 1e9,
        "T" => 1e12,
        "P" => 1e15,
        "E" => 1e18,
        "Z" => 1e21,
        "Y" => 1e24,
        _ => 1.0,
    };
    Some(number * multiplier)
}

/// Orders two magnitude strings.
///
/// When both parse numerically the sign of their difference decides; anything
/// else falls back to lexicographic comparison of the raw strings, so the
/// ordering is total and two distinct non-numeric values never tie.
pub fn compare_values(a: &str, b: &str) -> Ordering {
    if let (Some(a_num), Some(b_num)) = (to_numeric(a), to_numeric(b)) {
        let diff = a_num - b_num;
        if diff < 0.0 {
            return Ordering::Less;
        }
        if diff > 0.0 {
            return Ordering::Greater;
        }
        return Ordering::Equal;
    }
    a.cmp(b)
}

/// Translates a footprint identifier into a simpler human-readable form.
///
/// Strips the library prefix up to the first `:`, turns underscores into
/// spaces, and drops the redundant metric size suffix of passive packages
/// (`R 0402 1005Metric` becomes `R 0402`). The translation only removes
/// verbosity; genuinely different packages never collapse to the same
/// string, so the result stays usable as a grouping key. Idempotent.
pub fn translate_footprint(footprint: &str) -> String {
    if footprint.is_empty() {
        return String::new();
    }

    // Keep the original when there is no prefix or the remainder is empty.
    let stripped = match footprint.split_once(':') {
        Some((_, rest)) if !rest.is_empty() => rest,
        _ => footprint,
    };

    let readable = stripped.replace('_', " ");
    let readable = readable.trim();

    match PASSIVE_PACKAGE.captures(readable) {
        Some(captures) => captures[1].to_string(),
        None => readable.to_string(),
    }
}
