//! Reader for the KiCad generic netlist export (XML).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use roxmltree::{Document, Node};

use crate::error::{BomError, Result};
use crate::model::Component;

/// Loads every component from a netlist file.
pub fn read_components(path: &Path) -> Result<Vec<Component>> {
    let xml = fs::read_to_string(path)?;
    parse_components(&xml)
}

/// Parses the components section of a netlist document.
///
/// Virtual components such as power symbols (references starting with `#`)
/// are skipped; they never appear on the physical board.
pub fn parse_components(xml: &str) -> Result<Vec<Component>> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();
    if root.tag_name().name() != "export" {
        return Err(BomError::InvalidNetlist(format!(
            "expected root element 'export', found '{}'",
            root.tag_name().name()
        )));
    }

    let components_node = root
        .children()
        .filter(|node| node.is_element())
        .find(|node| node.tag_name().name() == "components")
        .ok_or_else(|| BomError::InvalidNetlist("missing 'components' section".into()))?;

    let mut components = Vec::new();
    for comp in components_node
        .children()
        .filter(|node| node.is_element() && node.tag_name().name() == "comp")
    {
        let reference = comp
            .attribute("ref")
            .ok_or_else(|| BomError::InvalidNetlist("'comp' element without 'ref'".into()))?;
        if reference.starts_with('#') {
            continue;
        }
        components.push(parse_component(reference, &comp));
    }

    Ok(components)
}

fn parse_component(reference: &str, comp: &Node) -> Component {
    let mut value = String::new();
    let mut footprint = String::new();
    let mut description = String::new();
    let mut fields: BTreeMap<String, String> = BTreeMap::new();

    for child in comp.children().filter(|node| node.is_element()) {
        match child.tag_name().name() {
            "value" => value = element_text(&child),
            "footprint" => footprint = element_text(&child),
            "libsource" => {
                if let Some(text) = child.attribute("description") {
                    description = text.trim().to_string();
                }
            }
            "fields" => {
                for field in child
                    .children()
                    .filter(|node| node.is_element() && node.tag_name().name() == "field")
                {
                    if let Some(name) = field.attribute("name") {
                        fields.insert(name.to_string(), element_text(&field));
                    }
                }
            }
            _ => {}
        }
    }

    // Older exports carry the description as a plain field instead.
    if description.is_empty() {
        if let Some(text) = fields.get("Description") {
            description = text.clone();
        }
    }

    Component {
        reference: reference.to_string(),
        value,
        footprint,
        description,
        fields,
    }
}

fn element_text(node: &Node) -> String {
    node.text().unwrap_or("").trim().to_string()
}
