//! `<enum>` assembly.

use super::helpers::{children_named, get_string};
use crate::model::{Enum, EnumValue};
use roxmltree::Node;

pub fn parse_enum_node(node: Node) -> Enum {
    let values = children_named(node, "enumValues", "enumValue")
        .map(|v| EnumValue {
            name: get_string(v, "name").unwrap_or_default(),
            value: get_string(v, "value").unwrap_or_default(),
        })
        .collect();
    Enum {
        name: get_string(node, "name").unwrap_or_default(),
        values,
    }
}

/// Every `<enum>` in document order; value order is kept as written.
pub fn parse_enums(root: Node) -> Vec<Enum> {
    root.descendants()
        .filter(|n| n.is_element() && n.has_tag_name("enum"))
        .map(parse_enum_node)
        .collect()
}
