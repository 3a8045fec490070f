//! Partitions the flat component list into groups of physically identical
//! parts and derives one [`PartSummary`] per group.

use std::collections::HashMap;

use tracing::debug;

use crate::model::{Component, PartSummary};
use crate::normalize::{compare_values, translate_footprint};

/// A non-empty run of components sharing one value + footprint key.
#[derive(Debug)]
pub struct Group<'a> {
    /// Footprint key of the group; translated when translation is active.
    pub footprint: String,
    /// Members in natural reference order.
    pub members: Vec<&'a Component>,
}

/// Groups components by value and footprint.
///
/// Components sort by natural reference order first, and groups form in
/// first-seen order of their key, so the result is deterministic for a given
/// netlist. Two components share a group iff their values are identical and
/// their footprints are equal under the configured equality: raw string
/// equality, or equality after translation when `translate` is set.
pub fn group_components(components: &[Component], translate: bool) -> Vec<Group<'_>> {
    let mut sorted: Vec<&Component> = components.iter().collect();
    sorted.sort_by(|a, b| natord::compare(&a.reference, &b.reference));

    let mut groups: Vec<Group<'_>> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for component in sorted {
        let footprint = if translate {
            translate_footprint(&component.footprint)
        } else {
            component.footprint.clone()
        };
        let key = (component.value.clone(), footprint.clone());
        match index.get(&key) {
            Some(&at) => groups[at].members.push(component),
            None => {
                index.insert(key, groups.len());
                groups.push(Group {
                    footprint,
                    members: vec![component],
                });
            }
        }
    }

    groups
}

/// Derives the merged summary record for one group.
///
/// References join with `", "` and the quantity always equals the member
/// count. Rating tokens union across every member in first-seen order.
/// Pass-through fields come from the last member iterated; that tie-break is
/// deliberate, not an artifact.
pub fn summarize_group(group: &Group<'_>) -> PartSummary {
    let refs: Vec<&str> = group
        .members
        .iter()
        .map(|component| component.reference.as_str())
        .collect();

    let mut ratings: Vec<String> = Vec::new();
    for component in &group.members {
        for token in component.field("Rating").split(',') {
            let token = token.trim();
            if !token.is_empty() && !ratings.iter().any(|seen| seen == token) {
                ratings.push(token.to_string());
            }
        }
    }

    // Last member wins for the pass-through fields.
    let representative = group.members[group.members.len() - 1];

    PartSummary {
        refs: refs.join(", "),
        qty: group.members.len(),
        value: representative.value.trim().to_string(),
        rating: ratings.join(", "),
        footprint: group.footprint.trim().to_string(),
        description: representative.description.trim().to_string(),
        mpn: representative.field("MPN").trim().to_string(),
        farnell: representative.field("Farnell").trim().to_string(),
        mouser: representative.field("Mouser").trim().to_string(),
        dni: representative.field("DNI").trim().to_string(),
    }
}

/// Produces the ordered, filtered part summaries for a component list.
///
/// Do-not-place parts are dropped here so they can never reach the store.
/// The output sorts by the engineering-notation value comparator, then by
/// footprint, then by reference list.
pub fn summarize(components: &[Component], translate: bool) -> Vec<PartSummary> {
    let mut summaries: Vec<PartSummary> = group_components(components, translate)
        .iter()
        .map(summarize_group)
        .filter(|summary| {
            let keep = !summary.is_do_not_place();
            if !keep {
                debug!(
                    value = %summary.value,
                    footprint = %summary.footprint,
                    "skipping do-not-place part"
                );
            }
            keep
        })
        .collect();

    summaries.sort_by(|a, b| {
        compare_values(&a.value, &b.value)
            .then_with(|| a.footprint.cmp(&b.footprint))
            .then_with(|| a.refs.cmp(&b.refs))
    });

    summaries
}
