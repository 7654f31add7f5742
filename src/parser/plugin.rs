//! `<plugin>` assembly and `<reference>` resolution.

use super::concrete::ConcreteDictionary;
use super::element::parse_attributes;
use super::helpers::{children_named, get_string, get_value};
use crate::error::ParseError;
use crate::model::*;
use log::warn;
use roxmltree::Node;

/// Where a plugin `<reference>` landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceMatch<'a> {
    /// Exact element name match.
    Element(&'a ElementRef),
    /// Match on an element's ListOf name or ListOf class name.
    ListOf(&'a ElementRef),
    Unresolved,
}

/// Resolve a reference name against the finished element list: exact name
/// first, then the ListOf names of elements that have a ListOf.
pub fn resolve_reference<'a>(elements: &'a [ElementRef], name: &str) -> ReferenceMatch<'a> {
    if let Some(e) = elements.iter().find(|e| e.name == name) {
        return ReferenceMatch::Element(e);
    }
    elements
        .iter()
        .filter(|e| e.is_list_of)
        .find(|e| {
            e.list_of_name.eq_ignore_ascii_case(name)
                || e.list_of_class_name.eq_ignore_ascii_case(name)
        })
        .map(ReferenceMatch::ListOf)
        .unwrap_or(ReferenceMatch::Unresolved)
}

/// Build one [`Plugin`]. Unresolved references are dropped with a warning, or
/// fail the parse when `strict` is set.
pub fn parse_plugin_node(
    node: Node,
    elements: &[ElementRef],
    concretes: &ConcreteDictionary,
    strict: bool,
) -> Result<Plugin, ParseError> {
    let sbase = get_string(node, "extensionPoint").unwrap_or_default();
    let mut extension = Vec::new();
    let mut lo_extension = Vec::new();

    for reference in children_named(node, "references", "reference") {
        let name = get_value(reference, "name").unwrap_or("");
        match resolve_reference(elements, name) {
            ReferenceMatch::Element(e) => extension.push(e.clone()),
            ReferenceMatch::ListOf(e) => lo_extension.push(e.clone()),
            ReferenceMatch::Unresolved if strict => {
                return Err(ParseError::UnresolvedReference {
                    plugin: sbase,
                    reference: name.to_string(),
                });
            }
            ReferenceMatch::Unresolved => {
                warn!(
                    "plugin on '{}' references unknown element '{}'; dropping it",
                    sbase, name
                );
            }
        }
    }

    Ok(Plugin {
        attribs: parse_attributes(node, "attributes", "attribute", concretes)?,
        extension,
        lo_extension,
        package: get_string(node, "package").filter(|s| !s.is_empty()),
        typecode: get_string(node, "typecode").filter(|s| !s.is_empty()),
        additional_decls: get_string(node, "additionalDecls").filter(|s| !s.is_empty()),
        additional_defs: get_string(node, "additionalDefs").filter(|s| !s.is_empty()),
        sbase,
    })
}

/// Every `<plugin>` in document order. Needs the complete element list.
pub fn parse_plugins(
    root: Node,
    elements: &[ElementRef],
    concretes: &ConcreteDictionary,
    strict: bool,
) -> Result<Vec<Plugin>, ParseError> {
    root.descendants()
        .filter(|n| n.is_element() && n.has_tag_name("plugin"))
        .map(|node| parse_plugin_node(node, elements, concretes, strict))
        .collect()
}
