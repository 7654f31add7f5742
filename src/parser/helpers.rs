//! Helper functions for reading Deviser XML values (coercion, type names, ListOf naming).

use crate::config::LanguageConfig;
use crate::model::AttributeType;
use roxmltree::Node;

/// Attribute value of `node`, or `None` when the attribute is absent.
pub fn get_value<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name)
}

/// Owned variant of [`get_value`] for optional string fields.
pub fn get_string(node: Node, name: &str) -> Option<String> {
    get_value(node, name).map(|s| s.to_string())
}

/// `yes`, `true` and `1` (any case) are true; anything else, including absence, is false.
pub fn to_bool(value: Option<&str>) -> bool {
    match value {
        Some(v) => {
            let v = v.trim();
            v.eq_ignore_ascii_case("yes") || v.eq_ignore_ascii_case("true") || v == "1"
        }
        None => false,
    }
}

/// Integer value going through a float parse, so `"3.0"` reads as `3`.
/// Absent or unparsable values read as `0`.
pub fn to_int(value: Option<&str>) -> i64 {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|f| f.is_finite())
        .map(|f| f.trunc() as i64)
        .unwrap_or(0)
}

/// Map a type name from the description onto its canonical [`AttributeType`].
///
/// Unknown names are passed through verbatim.
pub fn standardize_types(name: &str) -> AttributeType {
    let lower = name.to_ascii_lowercase();
    match lower.as_str() {
        "boolean" | "bool" => AttributeType::Bool,
        "unsigned integer" | "unsigned int" | "uint" => AttributeType::UInt,
        "integer" | "int" => AttributeType::Int,
        "double" => AttributeType::Double,
        "string" => AttributeType::String,
        "sid" => AttributeType::SId,
        "sidref" => AttributeType::SIdRef,
        "unitsid" => AttributeType::UnitSId,
        "unitsidref" => AttributeType::UnitSIdRef,
        "enum" => AttributeType::Enum,
        "element" => AttributeType::Element,
        "lo_element" => AttributeType::LoElement,
        "inline_lo_element" => AttributeType::InlineLoElement,
        _ => AttributeType::Other(name.to_string()),
    }
}

/// Element children of `node` with the given tag name, in document order.
///
/// Children may sit directly under `node` or inside a plural wrapper such as
/// `<attributes>`; only the wrapper's own children are considered.
pub fn children_named<'a, 'input>(
    node: Node<'a, 'input>,
    wrapper: &'static str,
    tag: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(|c| c.is_element())
        .flat_map(move |c| {
            if c.has_tag_name(tag) {
                vec![c]
            } else if c.has_tag_name(wrapper) {
                c.children()
                    .filter(|w| w.is_element() && w.has_tag_name(tag))
                    .collect()
            } else {
                Vec::new()
            }
        })
}

pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// English plural used for ListOf names.
pub fn plural(name: &str) -> String {
    if name.ends_with('s') || name.ends_with("nformation") {
        name.to_string()
    } else if name.ends_with("hild") {
        format!("{}ren", name)
    } else if name.ends_with('x') || name.ends_with("ch") || name.ends_with("sh") {
        format!("{}es", name)
    } else if let Some(stem) = name.strip_suffix('y') {
        match stem.chars().last() {
            Some(c) if !"aeiouAEIOU".contains(c) => format!("{}ies", stem),
            _ => format!("{}s", name),
        }
    } else {
        format!("{}s", name)
    }
}

/// ListOf class name of an element: explicit `listOfClassName`, else derived
/// from an explicit `listOfName`, else `ListOf` + plural.
pub fn list_of_class_name(
    language: &LanguageConfig,
    name: &str,
    lo_element_name: Option<&str>,
    lo_class_name: Option<&str>,
) -> String {
    match (lo_class_name, lo_element_name) {
        (Some(class), _) => class.to_string(),
        (None, Some(xml)) => upper_first(xml),
        (None, None) => format!("{}{}", language.list_of_prefix, plural(&upper_first(name))),
    }
}

/// ListOf XML name of an element: explicit `listOfName`, else derived from an
/// explicit `listOfClassName`, else `listOf` + plural.
pub fn list_of_name(
    language: &LanguageConfig,
    name: &str,
    lo_element_name: Option<&str>,
    lo_class_name: Option<&str>,
) -> String {
    match (lo_element_name, lo_class_name) {
        (Some(xml), _) => xml.to_string(),
        (None, Some(class)) => lower_first(class),
        (None, None) => format!(
            "{}{}",
            lower_first(&language.list_of_prefix),
            plural(&upper_first(name))
        ),
    }
}
